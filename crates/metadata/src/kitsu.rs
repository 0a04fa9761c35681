//! REST client for the Kitsu anime catalog (JSON:API).

use serde::Deserialize;

use crate::error::MetadataError;

/// HTTP client for the Kitsu API (`https://kitsu.io/api/edge`).
pub struct KitsuClient {
    client: reqwest::Client,
    base_url: String,
}

/// The title and release year of one anime, as needed for the
/// Kitsu-to-IMDB resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitsuAnime {
    pub title: String,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct AnimeResponse {
    data: AnimeData,
}

#[derive(Debug, Deserialize)]
struct AnimeData {
    attributes: AnimeAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnimeAttributes {
    canonical_title: Option<String>,
    titles: Option<AnimeTitles>,
    /// Release date as `YYYY-MM-DD`.
    start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnimeTitles {
    en: Option<String>,
}

impl KitsuClient {
    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch an anime's canonical title and release year by numeric id.
    ///
    /// Returns `Ok(None)` when Kitsu has no such anime or the record
    /// carries no usable title; other failures are real errors.
    pub async fn fetch_anime(&self, kitsu_id: &str) -> Result<Option<KitsuAnime>, MetadataError> {
        let response = self
            .client
            .get(format!("{}/anime/{}", self.base_url, kitsu_id))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MetadataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw: AnimeResponse = response.json().await?;
        Ok(extract_anime(raw.data.attributes))
    }
}

/// Pick the canonical title (falling back to the English title) and the
/// year component of the start date. No title means the record is
/// unusable for IMDB resolution.
fn extract_anime(attrs: AnimeAttributes) -> Option<KitsuAnime> {
    let title = attrs
        .canonical_title
        .or(attrs.titles.and_then(|t| t.en))?;
    let year = attrs
        .start_date
        .as_deref()
        .and_then(|d| d.split('-').next())
        .and_then(|y| y.parse::<i32>().ok());
    Some(KitsuAnime { title, year })
}
