use axum::routing::get;
use axum::Router;

use crate::handlers::addon;
use crate::state::AppState;

/// Mount the Stremio addon routes and the result page (root-level).
///
/// ```text
/// /success/{group_id}                              HTML result page
/// /{group_id}/manifest.json                        addon manifest
/// /{group_id}/catalog/{type}/{catalog_id}.json     catalog listing
/// /{group_id}/stream/{type}/{id}.json              existence probe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/success/{group_id}", get(addon::success_page))
        .route("/{group_id}/manifest.json", get(addon::manifest))
        .route(
            "/{group_id}/catalog/{content_type}/{catalog_id}",
            get(addon::catalog),
        )
        .route(
            "/{group_id}/stream/{content_type}/{stream_id}",
            get(addon::stream),
        )
}
