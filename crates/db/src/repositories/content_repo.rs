//! Repository for the `content` table.
//!
//! `insert` relies on the `UNIQUE (group_id, imdb_id)` constraint to
//! reject duplicates atomically; callers distinguish that case with
//! [`crate::is_unique_violation`].

use sqlx::SqlitePool;

use groupwatch_core::types::{ContentType, DbId};

use crate::models::content::ContentEntry;

/// Column list for `content` queries.
const CONTENT_COLUMNS: &str = "id, group_id, imdb_id, title, type, poster_url, genres, added_at";

/// Fields for a new content row; everything except the row id and the
/// insertion timestamp.
#[derive(Debug, Clone)]
pub struct NewContent<'a> {
    pub group_id: &'a str,
    pub imdb_id: &'a str,
    pub title: &'a str,
    pub content_type: ContentType,
    pub poster_url: Option<&'a str>,
    pub genres: Option<&'a str>,
}

/// Provides content entry CRUD for group catalogs.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a content entry and return the created row.
    ///
    /// A concurrent insert of the same `(group_id, imdb_id)` loses here
    /// with a unique violation rather than creating a second row.
    pub async fn insert(
        pool: &SqlitePool,
        content: &NewContent<'_>,
    ) -> Result<ContentEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO content (group_id, imdb_id, title, type, poster_url, genres) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {CONTENT_COLUMNS}"
        );
        sqlx::query_as::<_, ContentEntry>(&query)
            .bind(content.group_id)
            .bind(content.imdb_id)
            .bind(content.title)
            .bind(content.content_type.as_str())
            .bind(content.poster_url)
            .bind(content.genres)
            .fetch_one(pool)
            .await
    }

    /// Find a group's entry by IMDB id.
    pub async fn find_by_imdb_id(
        pool: &SqlitePool,
        group_id: &str,
        imdb_id: &str,
    ) -> Result<Option<ContentEntry>, sqlx::Error> {
        let query =
            format!("SELECT {CONTENT_COLUMNS} FROM content WHERE group_id = ? AND imdb_id = ?");
        sqlx::query_as::<_, ContentEntry>(&query)
            .bind(group_id)
            .bind(imdb_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an entry by row id, scoped to a group.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
        group_id: &str,
    ) -> Result<Option<ContentEntry>, sqlx::Error> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM content WHERE id = ? AND group_id = ?");
        sqlx::query_as::<_, ContentEntry>(&query)
            .bind(id)
            .bind(group_id)
            .fetch_optional(pool)
            .await
    }

    /// List a group's catalog, newest first, optionally filtered by type.
    pub async fn list_by_group(
        pool: &SqlitePool,
        group_id: &str,
        type_filter: Option<ContentType>,
    ) -> Result<Vec<ContentEntry>, sqlx::Error> {
        match type_filter {
            Some(content_type) => {
                let query = format!(
                    "SELECT {CONTENT_COLUMNS} FROM content \
                     WHERE group_id = ? AND type = ? \
                     ORDER BY added_at DESC, id DESC"
                );
                sqlx::query_as::<_, ContentEntry>(&query)
                    .bind(group_id)
                    .bind(content_type.as_str())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {CONTENT_COLUMNS} FROM content \
                     WHERE group_id = ? \
                     ORDER BY added_at DESC, id DESC"
                );
                sqlx::query_as::<_, ContentEntry>(&query)
                    .bind(group_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Delete an entry by id within a group.
    ///
    /// Returns the number of rows removed; 0 for an unknown id is a
    /// normal outcome, not an error.
    pub async fn delete(pool: &SqlitePool, id: DbId, group_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content WHERE id = ? AND group_id = ?")
            .bind(id)
            .bind(group_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
