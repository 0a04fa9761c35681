use std::sync::Arc;

use groupwatch_events::EventBus;
use groupwatch_metadata::MetadataProvider;
use groupwatch_pipeline::ContentPipeline;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: groupwatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager with group subscriptions.
    pub ws_manager: Arc<WsManager>,
    /// Event bus carrying catalog change events.
    pub event_bus: Arc<EventBus>,
    /// The content addition/removal pipeline.
    pub pipeline: Arc<ContentPipeline>,
    /// Metadata lookups for read-only endpoints (content info, stream
    /// probes). The pipeline holds its own reference.
    pub provider: Arc<dyn MetadataProvider>,
}
