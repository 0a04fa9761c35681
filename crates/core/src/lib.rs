//! Shared domain types for the groupwatch workspace.
//!
//! Everything here is dependency-light on purpose: the parser and the
//! type aliases are used by every other crate, including test doubles.

pub mod error;
pub mod ident;
pub mod types;

pub use ident::{parse_content_id, ContentRef};
pub use types::{ContentType, DbId, Timestamp};
