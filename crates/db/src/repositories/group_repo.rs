//! Repository for the `groups` table.

use sqlx::SqlitePool;

use crate::models::group::Group;

/// Column list for `groups` queries.
const GROUP_COLUMNS: &str = "id, name, password_hash, catalog_settings, created_at";

/// Provides group creation and lookup.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group and return the created row.
    ///
    /// The id is caller-generated; a collision surfaces as a unique
    /// violation on the primary key.
    pub async fn create(
        pool: &SqlitePool,
        id: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO groups (id, name, password_hash) \
             VALUES (?, ?, ?) \
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(name)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a group by its id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {GROUP_COLUMNS} FROM groups WHERE id = ?");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a group's catalog settings blob.
    ///
    /// Returns the number of rows updated (0 when the group is absent).
    pub async fn update_catalog_settings(
        pool: &SqlitePool,
        id: &str,
        settings: &serde_json::Value,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE groups SET catalog_settings = ? WHERE id = ?")
            .bind(settings.to_string())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
