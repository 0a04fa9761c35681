//! The resolver seam between the addition pipeline and the external
//! metadata services.

use async_trait::async_trait;

use crate::error::MetadataError;
use crate::kitsu::KitsuClient;
use crate::omdb::OmdbClient;
use crate::types::ResolvedMetadata;

/// Metadata lookups as consumed by the addition pipeline.
///
/// The pipeline holds an `Arc<dyn MetadataProvider>` so tests can
/// substitute a stub; [`MetadataResolver`] is the production
/// implementation.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch canonical metadata for a confirmed IMDB id.
    ///
    /// A missing record or a network failure is a hard error here;
    /// the caller has nothing to fall back to.
    async fn resolve_imdb(&self, imdb_id: &str) -> Result<ResolvedMetadata, MetadataError>;

    /// Best-effort mapping of a Kitsu anime id to an IMDB id.
    ///
    /// `None` means "no match found", whatever the reason; failures
    /// talking to either service degrade to `None` rather than
    /// propagating.
    async fn resolve_kitsu_to_imdb(&self, kitsu_id: &str) -> Option<String>;
}

/// Production resolver combining the OMDb and Kitsu clients.
pub struct MetadataResolver {
    omdb: OmdbClient,
    kitsu: KitsuClient,
}

impl MetadataResolver {
    pub fn new(omdb: OmdbClient, kitsu: KitsuClient) -> Self {
        Self { omdb, kitsu }
    }

    /// The fallible resolution chain: Kitsu record -> exact title+year
    /// lookup -> free-text search, first hit wins.
    async fn try_resolve_kitsu(&self, kitsu_id: &str) -> Result<Option<String>, MetadataError> {
        let Some(anime) = self.kitsu.fetch_anime(kitsu_id).await? else {
            tracing::debug!(kitsu_id, "No usable Kitsu record");
            return Ok(None);
        };

        tracing::debug!(kitsu_id, title = %anime.title, year = ?anime.year, "Resolving anime title against OMDb");

        if let Some(imdb_id) = self.omdb.lookup_by_title(&anime.title, anime.year).await? {
            tracing::info!(kitsu_id, %imdb_id, "Resolved Kitsu id via exact title lookup");
            return Ok(Some(imdb_id));
        }

        if let Some(imdb_id) = self.omdb.search(&anime.title).await? {
            tracing::info!(kitsu_id, %imdb_id, "Resolved Kitsu id via free-text search");
            return Ok(Some(imdb_id));
        }

        Ok(None)
    }
}

#[async_trait]
impl MetadataProvider for MetadataResolver {
    async fn resolve_imdb(&self, imdb_id: &str) -> Result<ResolvedMetadata, MetadataError> {
        self.omdb.fetch_by_id(imdb_id).await
    }

    async fn resolve_kitsu_to_imdb(&self, kitsu_id: &str) -> Option<String> {
        match self.try_resolve_kitsu(kitsu_id).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(kitsu_id, error = %e, "Kitsu resolution failed, treating as no match");
                None
            }
        }
    }
}
