use serde::{Deserialize, Serialize};

use groupwatch_core::types::ContentType;

/// Canonical metadata for one title, as resolved from OMDb.
///
/// Transient: consumed by the addition pipeline to populate a content
/// entry and carried in `content-added` events; `year`, `plot`, and
/// `imdb_rating` are surfaced to clients but not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub poster: Option<String>,
    /// Comma-joined genre list.
    pub genres: Option<String>,
    pub year: Option<String>,
    pub plot: Option<String>,
    pub imdb_rating: Option<String>,
}
