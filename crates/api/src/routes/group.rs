use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{content, group};
use crate::state::AppState;

/// Mount group routes (nested under `/api/groups`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(group::create_group))
        .route("/{group_id}", get(group::get_group))
        .route("/{group_id}/join", post(group::join_group))
        .route("/{group_id}/settings", put(group::update_settings))
        .route(
            "/{group_id}/content",
            get(content::list_content).post(content::add_content),
        )
        .route(
            "/{group_id}/content/{content_id}",
            delete(content::delete_content),
        )
        .route(
            "/{group_id}/add-from-stremio/{content_id}",
            get(content::add_from_stremio),
        )
}
