//! The content addition pipeline.
//!
//! Orchestrates identifier parsing, external metadata resolution, the
//! race-safe catalog insert, and the group broadcast. The pipeline holds
//! no lock across its steps: concurrent submissions of the same
//! identifier are resolved by the storage layer's unique constraint,
//! and the loser's violation is recovered into a `Duplicate` outcome.

use std::sync::Arc;

use groupwatch_core::ident::{parse_content_id, ContentRef};
use groupwatch_db::models::ContentEntry;
use groupwatch_db::repositories::content_repo::NewContent;
use groupwatch_db::repositories::{ContentRepo, GroupRepo};
use groupwatch_db::DbPool;
use groupwatch_events::{EventBus, GroupEvent, CONTENT_ADDED, CONTENT_REMOVED};
use groupwatch_metadata::{MetadataError, MetadataProvider, ResolvedMetadata};

/// Result of a successful [`ContentPipeline::add_content`] call.
#[derive(Debug)]
pub enum AddOutcome {
    /// A new entry was created and a `content-added` event published.
    Added {
        entry: ContentEntry,
        metadata: ResolvedMetadata,
    },
    /// The group already holds this title (detected either by the
    /// pre-check or by the insert losing a race). Nothing was written
    /// and nothing is broadcast.
    Duplicate { title: String },
}

/// Failure taxonomy for content addition. `Duplicate` is deliberately
/// not here; it is a normal outcome, not an error.
#[derive(Debug, thiserror::Error)]
pub enum AddContentError {
    /// The identifier matched none of the accepted surface forms.
    #[error("Invalid content ID format: \"{0}\". Use IMDB format (tt1234567) or Kitsu ID (12345).")]
    InvalidFormat(String),

    /// No group with this id exists.
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// The Kitsu id could not be mapped to any IMDB id.
    #[error("Could not find IMDB match for Kitsu anime {0}")]
    UnresolvedContent(String),

    /// The metadata service has no record for a confirmed IMDB id.
    #[error("{0}")]
    MetadataNotFound(String),

    /// An external service could not be reached or misbehaved.
    #[error("Metadata service unavailable: {0}")]
    Dependency(#[source] MetadataError),

    /// A storage failure other than the recovered constraint race.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MetadataError> for AddContentError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::NotFound(msg) => AddContentError::MetadataNotFound(msg),
            other => AddContentError::Dependency(other),
        }
    }
}

/// Errors from [`ContentPipeline::remove_content`].
#[derive(Debug, thiserror::Error)]
pub enum RemoveContentError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Orchestrates catalog mutations for group watch-lists.
///
/// Collaborators are injected so tests can substitute a stub metadata
/// provider; the pool and bus are shared with the HTTP layer.
pub struct ContentPipeline {
    pool: DbPool,
    provider: Arc<dyn MetadataProvider>,
    bus: Arc<EventBus>,
}

impl ContentPipeline {
    pub fn new(pool: DbPool, provider: Arc<dyn MetadataProvider>, bus: Arc<EventBus>) -> Self {
        Self {
            pool,
            provider,
            bus,
        }
    }

    /// Add a title to a group's catalog from a raw identifier.
    ///
    /// Steps, in order:
    /// 1. Parse the identifier.
    /// 2. Resolve Kitsu ids to an IMDB id (best-effort; no match fails).
    /// 3. Verify the group exists.
    /// 4. Pre-check for an existing entry (fast duplicate path that
    ///    skips the metadata call).
    /// 5. Fetch canonical metadata.
    /// 6. Insert. A unique violation here means a concurrent request
    ///    won the race between steps 4 and 6; the winner's row is
    ///    re-fetched and reported as a duplicate.
    /// 7. Publish `content-added` to the group.
    pub async fn add_content(
        &self,
        group_id: &str,
        raw_identifier: &str,
    ) -> Result<AddOutcome, AddContentError> {
        let parsed = parse_content_id(raw_identifier)
            .ok_or_else(|| AddContentError::InvalidFormat(raw_identifier.to_string()))?;

        let imdb_id = match parsed {
            ContentRef::Imdb(id) => id,
            ContentRef::Kitsu(id) => self
                .provider
                .resolve_kitsu_to_imdb(&id)
                .await
                .ok_or(AddContentError::UnresolvedContent(id))?,
        };

        let group = GroupRepo::find_by_id(&self.pool, group_id)
            .await?
            .ok_or_else(|| AddContentError::GroupNotFound(group_id.to_string()))?;

        // Advisory fast path; the insert below is the authority.
        if let Some(existing) = ContentRepo::find_by_imdb_id(&self.pool, &group.id, &imdb_id).await?
        {
            tracing::debug!(group_id, %imdb_id, "Duplicate detected by pre-check");
            return Ok(AddOutcome::Duplicate {
                title: existing.title,
            });
        }

        let metadata = self.provider.resolve_imdb(&imdb_id).await?;

        let new_content = NewContent {
            group_id: &group.id,
            imdb_id: &imdb_id,
            title: &metadata.title,
            content_type: metadata.content_type,
            poster_url: metadata.poster.as_deref(),
            genres: metadata.genres.as_deref(),
        };

        let entry = match ContentRepo::insert(&self.pool, &new_content).await {
            Ok(entry) => entry,
            Err(err) if groupwatch_db::is_unique_violation(&err) => {
                // A concurrent request inserted the same title between
                // the pre-check and this insert. Report the winner's
                // row; fall back to the freshly resolved title if it
                // was already deleted again.
                tracing::info!(group_id, %imdb_id, "Concurrent insert detected, reporting duplicate");
                let title = ContentRepo::find_by_imdb_id(&self.pool, &group.id, &imdb_id)
                    .await?
                    .map(|e| e.title)
                    .unwrap_or(metadata.title);
                return Ok(AddOutcome::Duplicate { title });
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(group_id, %imdb_id, title = %metadata.title, "Content added");
        self.bus.publish(GroupEvent::new(
            &group.id,
            CONTENT_ADDED,
            serde_json::to_value(&metadata).unwrap_or_default(),
        ));

        Ok(AddOutcome::Added { entry, metadata })
    }

    /// Remove an entry from a group's catalog by row id.
    ///
    /// Returns the removed entry, or `None` when no such entry exists
    /// in this group (a zero-removed count is a normal outcome).
    /// Publishes `content-removed` on success.
    pub async fn remove_content(
        &self,
        group_id: &str,
        content_id: groupwatch_core::types::DbId,
    ) -> Result<Option<ContentEntry>, RemoveContentError> {
        let group = GroupRepo::find_by_id(&self.pool, group_id)
            .await?
            .ok_or_else(|| RemoveContentError::GroupNotFound(group_id.to_string()))?;

        let Some(entry) = ContentRepo::find_by_id(&self.pool, content_id, &group.id).await? else {
            return Ok(None);
        };

        let removed = ContentRepo::delete(&self.pool, entry.id, &group.id).await?;
        if removed == 0 {
            // Deleted concurrently; nothing to broadcast.
            return Ok(None);
        }

        tracing::info!(group_id, content_id = entry.id, title = %entry.title, "Content removed");
        self.bus.publish(GroupEvent::new(
            &group.id,
            CONTENT_REMOVED,
            serde_json::json!({
                "id": entry.id,
                "title": entry.title,
                "type": entry.content_type,
            }),
        ));

        Ok(Some(entry))
    }

    /// Read-only existence probe used by the Stremio stream endpoint.
    ///
    /// Parses the identifier and checks the group's catalog; Kitsu ids
    /// are resolved best-effort first. Unparseable or unresolvable
    /// identifiers probe as "absent" rather than failing, so the addon
    /// offers the add action and the real addition reports the error
    /// properly.
    pub async fn find_existing(
        &self,
        group_id: &str,
        raw_identifier: &str,
    ) -> Result<Option<ContentEntry>, sqlx::Error> {
        let Some(parsed) = parse_content_id(raw_identifier) else {
            return Ok(None);
        };

        let imdb_id = match parsed {
            ContentRef::Imdb(id) => id,
            ContentRef::Kitsu(id) => match self.provider.resolve_kitsu_to_imdb(&id).await {
                Some(imdb_id) => imdb_id,
                None => return Ok(None),
            },
        };

        ContentRepo::find_by_imdb_id(&self.pool, group_id, &imdb_id).await
    }
}
