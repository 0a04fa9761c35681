//! Catalog content: listing, addition via the pipeline, removal, and
//! the resolve-only info proxy.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use groupwatch_core::ident::{parse_content_id, ContentRef};
use groupwatch_core::types::{ContentType, DbId};
use groupwatch_db::repositories::{ContentRepo, GroupRepo};
use groupwatch_metadata::ResolvedMetadata;
use groupwatch_pipeline::{AddContentError, AddOutcome};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for `GET /api/groups/{id}/content`.
#[derive(Debug, Deserialize)]
pub struct ListContentQuery {
    /// Optional `movie` / `series` filter.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

/// Request body for `POST /api/groups/{id}/content`.
#[derive(Debug, Deserialize)]
pub struct AddContentRequest {
    pub content_id: String,
}

/// Response for the resolve-only info endpoint.
#[derive(Debug, Serialize)]
pub struct ContentInfoResponse {
    pub imdb_id: String,
    #[serde(flatten)]
    pub metadata: ResolvedMetadata,
}

/// GET /api/groups/{group_id}/content
pub async fn list_content(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(query): Query<ListContentQuery>,
) -> AppResult<Json<serde_json::Value>> {
    GroupRepo::find_by_id(&state.pool, &group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group not found: {group_id}")))?;

    let type_filter = match query.content_type.as_deref() {
        None => None,
        Some(raw) => Some(ContentType::from_str(raw).map_err(|_| {
            AppError::BadRequest(format!("Unknown content type: {raw} (expected movie or series)"))
        })?),
    };

    let entries = ContentRepo::list_by_group(&state.pool, &group_id, type_filter).await?;
    Ok(Json(json!({ "content": entries })))
}

/// POST /api/groups/{group_id}/content
pub async fn add_content(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(req): Json<AddContentRequest>,
) -> AppResult<Response> {
    let outcome = state.pipeline.add_content(&group_id, &req.content_id).await?;

    let response = match outcome {
        AddOutcome::Added { metadata, .. } => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": format!("\"{}\" was added to the group.", metadata.title),
                "info": metadata,
            })),
        )
            .into_response(),
        AddOutcome::Duplicate { title } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": format!("\"{title}\" is already in the group list."),
                "code": "CONFLICT",
            })),
        )
            .into_response(),
    };
    Ok(response)
}

/// DELETE /api/groups/{group_id}/content/{content_id}
pub async fn delete_content(
    State(state): State<AppState>,
    Path((group_id, content_id)): Path<(String, DbId)>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = state
        .pipeline
        .remove_content(&group_id, content_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Content not found in this group: {content_id}"))
        })?;

    Ok(Json(json!({
        "success": true,
        "message": format!("\"{}\" was removed from the group.", removed.title),
        "deleted_content": removed,
    })))
}

/// GET /api/content/info/{content_id}
///
/// Resolves an identifier to metadata without touching any group
/// catalog.
pub async fn content_info(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> AppResult<Json<ContentInfoResponse>> {
    let parsed = parse_content_id(&content_id)
        .ok_or_else(|| AppError::AddContent(AddContentError::InvalidFormat(content_id.clone())))?;

    let imdb_id = match parsed {
        ContentRef::Imdb(id) => id,
        ContentRef::Kitsu(id) => state
            .provider
            .resolve_kitsu_to_imdb(&id)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Could not find IMDB match for Kitsu anime {id}"))
            })?,
    };

    let metadata = state.provider.resolve_imdb(&imdb_id).await?;
    Ok(Json(ContentInfoResponse { imdb_id, metadata }))
}

/// GET /api/groups/{group_id}/add-from-stremio/{content_id}
///
/// Runs the addition pipeline and redirects to the HTML result page;
/// the outcome travels in the query string so the page can render a
/// banner.
pub async fn add_from_stremio(
    State(state): State<AppState>,
    Path((group_id, content_id)): Path<(String, String)>,
) -> Redirect {
    let (key, value) = match state.pipeline.add_content(&group_id, &content_id).await {
        Ok(AddOutcome::Added { metadata, .. }) => ("added", metadata.title),
        Ok(AddOutcome::Duplicate { title }) => ("duplicate", title),
        Err(err) => {
            tracing::warn!(group_id = %group_id, content_id = %content_id, error = %err, "Stremio-initiated add failed");
            ("error", err.to_string())
        }
    };

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, &value)
        .finish();
    Redirect::to(&format!("/success/{group_id}?{query}"))
}
