//! REST client for the OMDb API.
//!
//! OMDb signals "no such title" in-band: a 200 response whose body is
//! `{"Response": "False", "Error": "..."}`. Optional fields use the
//! literal string `"N/A"` as an absent sentinel; both quirks are
//! normalized away here.

use serde::Deserialize;

use groupwatch_core::types::ContentType;

use crate::error::MetadataError;
use crate::types::ResolvedMetadata;

/// HTTP client for the OMDb API.
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Raw OMDb title response (`?i=` and `?t=` lookups share this shape).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TitleResponse {
    pub response: String,
    pub error: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "Type")]
    pub content_type: Option<String>,
    pub poster: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub plot: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
}

/// Raw OMDb free-text search response (`?s=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    response: String,
    search: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

impl OmdbClient {
    /// Create a client reusing an existing [`reqwest::Client`] (shared
    /// connection pool and timeout with the Kitsu client).
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Fetch canonical metadata for a confirmed IMDB id.
    ///
    /// Fails with [`MetadataError::NotFound`] when OMDb has no record;
    /// network failures propagate as hard errors.
    pub async fn fetch_by_id(&self, imdb_id: &str) -> Result<ResolvedMetadata, MetadataError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("i", imdb_id), ("apikey", &self.api_key)])
            .send()
            .await?;
        let raw: TitleResponse = Self::parse_response(response).await?;

        if raw.response != "True" {
            return Err(MetadataError::NotFound(
                raw.error
                    .unwrap_or_else(|| format!("Movie/Series not found: {imdb_id}")),
            ));
        }
        Ok(resolve_title(raw))
    }

    /// Exact title lookup, optionally narrowed by release year.
    ///
    /// Returns the matching IMDB id, or `None` when OMDb has no exact
    /// match (the caller falls back to free-text search).
    pub async fn lookup_by_title(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Option<String>, MetadataError> {
        let mut query = vec![("t", title.to_string()), ("apikey", self.api_key.clone())];
        if let Some(year) = year {
            query.push(("y", year.to_string()));
        }

        let response = self.client.get(&self.base_url).query(&query).send().await?;
        let raw: TitleResponse = Self::parse_response(response).await?;

        if raw.response == "True" {
            Ok(raw.imdb_id)
        } else {
            Ok(None)
        }
    }

    /// Free-text search; returns the first result's IMDB id, if any.
    pub async fn search(&self, title: &str) -> Result<Option<String>, MetadataError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("s", title), ("apikey", &self.api_key)])
            .send()
            .await?;
        let raw: SearchResponse = Self::parse_response(response).await?;

        if raw.response != "True" {
            return Ok(None);
        }
        Ok(raw
            .search
            .and_then(|hits| hits.into_iter().next())
            .map(|hit| hit.imdb_id))
    }

    /// Parse a JSON body after checking for a success status.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MetadataError> {
        let status = response.status();
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
        Ok(response.json::<T>().await?)
    }
}

/// Convert a successful title response into [`ResolvedMetadata`].
fn resolve_title(raw: TitleResponse) -> ResolvedMetadata {
    ResolvedMetadata {
        title: raw.title.unwrap_or_default(),
        content_type: ContentType::from_service_type(raw.content_type.as_deref().unwrap_or("")),
        poster: not_na(raw.poster),
        genres: not_na(raw.genre),
        year: not_na(raw.year),
        plot: not_na(raw.plot),
        imdb_rating: not_na(raw.imdb_rating),
    }
}

/// Map OMDb's `"N/A"` sentinel (and missing fields) to `None`.
fn not_na(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "N/A")
}
