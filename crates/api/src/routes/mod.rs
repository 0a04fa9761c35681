pub mod addon;
pub mod group;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                              WebSocket
///
/// /groups                                          create (POST)
/// /groups/{id}                                     get
/// /groups/{id}/join                                join with password (POST)
/// /groups/{id}/settings                            update catalog settings (PUT)
/// /groups/{id}/content                             list (?type=), add (POST)
/// /groups/{id}/content/{content_id}                remove (DELETE)
/// /groups/{id}/add-from-stremio/{content_id}       add + redirect to result page
///
/// /content/info/{content_id}                       resolve-only metadata proxy
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route(
            "/content/info/{content_id}",
            get(handlers::content::content_info),
        )
        .nest("/groups", group::router())
}
