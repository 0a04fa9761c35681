//! Content entry entity model.

use serde::Serialize;
use sqlx::FromRow;

use groupwatch_core::types::{DbId, Timestamp};

/// A row from the `content` table.
///
/// Entries are created by the addition pipeline and deleted
/// individually; they are never updated in place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentEntry {
    pub id: DbId,
    pub group_id: String,
    /// Canonical identifier, always of the form `tt<digits>`.
    pub imdb_id: String,
    pub title: String,
    /// `"movie"` or `"series"` (enforced by a CHECK constraint).
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub content_type: String,
    pub poster_url: Option<String>,
    /// Comma-joined genre list as reported by the metadata service.
    pub genres: Option<String>,
    pub added_at: Timestamp,
}
