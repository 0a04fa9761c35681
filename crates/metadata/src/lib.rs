//! External metadata lookup: OMDb (movies/series by IMDB id or title)
//! and Kitsu (anime by numeric id).
//!
//! [`MetadataResolver`] combines both clients behind the
//! [`MetadataProvider`] trait so the addition pipeline can be tested
//! with a stub provider.

pub mod error;
pub mod kitsu;
pub mod omdb;
pub mod provider;
pub mod types;

pub use error::MetadataError;
pub use kitsu::KitsuClient;
pub use omdb::OmdbClient;
pub use provider::{MetadataProvider, MetadataResolver};
pub use types::ResolvedMetadata;
