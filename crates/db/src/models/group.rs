//! Group entity model.

use serde::Serialize;
use sqlx::FromRow;

use groupwatch_core::types::Timestamp;

/// A row from the `groups` table.
///
/// The password hash is never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    /// Opaque short id (first 8 hex chars of a UUID v4).
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Presentation preferences for the Stremio catalogs.
    pub catalog_settings: sqlx::types::Json<serde_json::Value>,
    pub created_at: Timestamp,
}
