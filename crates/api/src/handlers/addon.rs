//! Stremio addon endpoints (manifest, catalog, stream) and the HTML
//! result page targeted by Stremio-initiated additions.
//!
//! Stremio expects 404 bodies for catalog/stream lookups to still carry
//! the resource envelope (`{"metas": []}` / `{"streams": []}`), so
//! these handlers do not go through [`AppError`](crate::error::AppError).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use groupwatch_core::types::ContentType;
use groupwatch_db::models::{ContentEntry, Group};
use groupwatch_db::repositories::{ContentRepo, GroupRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Catalog id served for movies.
const CATALOG_MOVIES: &str = "shared-movies";
/// Catalog id served for series.
const CATALOG_SERIES: &str = "shared-series";

/// GET /{group_id}/manifest.json
pub async fn manifest(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let group = GroupRepo::find_by_id(&state.pool, &group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group not found: {group_id}")))?;

    let settings = &group.catalog_settings.0;
    let movies_enabled = settings
        .get("movies")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);
    let series_enabled = settings
        .get("series")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);

    let mut catalogs = Vec::new();
    if movies_enabled {
        catalogs.push(json!({
            "type": "movie",
            "id": CATALOG_MOVIES,
            "name": format!("{} - Movies", group.name),
        }));
    }
    if series_enabled {
        catalogs.push(json!({
            "type": "series",
            "id": CATALOG_SERIES,
            "name": format!("{} - Series", group.name),
        }));
    }

    Ok(Json(json!({
        "id": format!("com.groupwatch.{}", group.id),
        "version": "1.0.0",
        "name": format!("{} Watch List", group.name),
        "description": format!("Shared watch list for the \"{}\" group", group.name),
        "resources": ["catalog", "stream"],
        "types": ["movie", "series"],
        "idPrefixes": ["tt", "kitsu"],
        "catalogs": catalogs,
        "behaviorHints": { "configurable": false },
    })))
}

/// GET /{group_id}/catalog/{content_type}/{catalog_id}.json
pub async fn catalog(
    State(state): State<AppState>,
    Path((group_id, _content_type, catalog_id)): Path<(String, String, String)>,
) -> Response {
    let catalog_id = catalog_id.trim_end_matches(".json");

    let type_filter = match catalog_id {
        CATALOG_MOVIES => ContentType::Movie,
        CATALOG_SERIES => ContentType::Series,
        _ => return (StatusCode::NOT_FOUND, Json(json!({ "metas": [] }))).into_response(),
    };

    let group = match GroupRepo::find_by_id(&state.pool, &group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(json!({ "metas": [] }))).into_response()
        }
        Err(err) => return AppError::Database(err).into_response(),
    };

    let entries = match ContentRepo::list_by_group(&state.pool, &group.id, Some(type_filter)).await
    {
        Ok(entries) => entries,
        Err(err) => return AppError::Database(err).into_response(),
    };

    let metas: Vec<_> = entries.iter().map(entry_to_meta).collect();
    Json(json!({ "metas": metas })).into_response()
}

/// GET /{group_id}/stream/{content_type}/{stream_id}.json
///
/// Read-only existence probe: tells Stremio whether this title is
/// already in the group and, if not, offers the add action.
pub async fn stream(
    State(state): State<AppState>,
    Path((group_id, _content_type, stream_id)): Path<(String, String, String)>,
) -> Response {
    let raw_id = stream_id.trim_end_matches(".json");

    let group = match GroupRepo::find_by_id(&state.pool, &group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Json(json!({ "streams": [] }))).into_response()
        }
        Err(err) => return AppError::Database(err).into_response(),
    };

    let existing = match state.pipeline.find_existing(&group.id, raw_id).await {
        Ok(existing) => existing,
        Err(err) => return AppError::Database(err).into_response(),
    };

    let public_url = &state.config.public_url;
    let stream_obj = match existing {
        Some(entry) => json!({
            "name": "Group Watch List",
            "title": format!("✓ \"{}\" is already in the group list", entry.title),
            "externalUrl": format!(
                "{public_url}/success/{}?{}",
                group.id,
                url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("existing", &entry.title)
                    .finish()
            ),
        }),
        None => json!({
            "name": "Group Watch List",
            "title": "➕ Add to group watch list",
            "externalUrl": format!(
                "{public_url}/api/groups/{}/add-from-stremio/{raw_id}",
                group.id
            ),
        }),
    };

    Json(json!({ "streams": [stream_obj] })).into_response()
}

/// Query parameters for the result page; exactly one is normally set.
#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    pub added: Option<String>,
    pub duplicate: Option<String>,
    pub existing: Option<String>,
    pub error: Option<String>,
}

/// GET /success/{group_id}
///
/// Minimal HTML result page: an outcome banner plus the group's
/// catalog split by type.
pub async fn success_page(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(query): Query<SuccessQuery>,
) -> Response {
    let group = match GroupRepo::find_by_id(&state.pool, &group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Html("<h1>Group not found</h1>".to_string()))
                .into_response()
        }
        Err(err) => return AppError::Database(err).into_response(),
    };

    let movies = match ContentRepo::list_by_group(&state.pool, &group.id, Some(ContentType::Movie))
        .await
    {
        Ok(entries) => entries,
        Err(err) => return AppError::Database(err).into_response(),
    };
    let series = match ContentRepo::list_by_group(&state.pool, &group.id, Some(ContentType::Series))
        .await
    {
        Ok(entries) => entries,
        Err(err) => return AppError::Database(err).into_response(),
    };

    Html(render_success_page(&group, &query, &movies, &series)).into_response()
}

/// Map a catalog entry to a Stremio meta preview object.
fn entry_to_meta(entry: &ContentEntry) -> serde_json::Value {
    let genres: Vec<&str> = entry
        .genres
        .as_deref()
        .map(|g| g.split(',').map(str::trim).collect())
        .unwrap_or_default();
    json!({
        "id": entry.imdb_id,
        "type": entry.content_type,
        "name": entry.title,
        "poster": entry.poster_url,
        "genres": genres,
    })
}

fn render_success_page(
    group: &Group,
    query: &SuccessQuery,
    movies: &[ContentEntry],
    series: &[ContentEntry],
) -> String {
    let banner = if let Some(title) = &query.added {
        format!(
            r#"<p class="banner ok">&#10003; "{}" was added to the group.</p>"#,
            escape_html(title)
        )
    } else if let Some(title) = &query.duplicate {
        format!(
            r#"<p class="banner warn">"{}" is already in the group list.</p>"#,
            escape_html(title)
        )
    } else if let Some(title) = &query.existing {
        format!(
            r#"<p class="banner warn">"{}" is already in the group list.</p>"#,
            escape_html(title)
        )
    } else if let Some(message) = &query.error {
        format!(
            r#"<p class="banner err">Could not add content: {}</p>"#,
            escape_html(message)
        )
    } else {
        String::new()
    };

    let list = |entries: &[ContentEntry]| -> String {
        if entries.is_empty() {
            return "<li class=\"empty\">Nothing here yet</li>".to_string();
        }
        entries
            .iter()
            .map(|e| format!("<li>{}</li>", escape_html(&e.title)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{name} Watch List</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }}
.banner {{ padding: 0.75rem; border-radius: 4px; }}
.banner.ok {{ background: #e6f4e6; }}
.banner.warn {{ background: #fdf3d7; }}
.banner.err {{ background: #fbe3e3; }}
h2 {{ margin-top: 2rem; }}
.empty {{ color: #888; }}
</style>
</head>
<body>
<h1>{name} Watch List</h1>
{banner}
<h2>Movies</h2>
<ul>
{movie_items}
</ul>
<h2>Series</h2>
<ul>
{series_items}
</ul>
</body>
</html>
"#,
        name = escape_html(&group.name),
        banner = banner,
        movie_items = list(movies),
        series_items = list(series),
    )
}

/// Minimal HTML escaping for text interpolated into the result page.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
