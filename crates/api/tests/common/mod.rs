use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use groupwatch_api::config::ServerConfig;
use groupwatch_api::router::build_app_router;
use groupwatch_api::state::AppState;
use groupwatch_api::ws::WsManager;
use groupwatch_core::types::ContentType;
use groupwatch_events::EventBus;
use groupwatch_metadata::{MetadataError, MetadataProvider, ResolvedMetadata};
use groupwatch_pipeline::ContentPipeline;

/// In-memory metadata provider: fixed IMDB catalog plus a Kitsu mapping
/// table, no network.
pub struct StubProvider {
    titles: HashMap<String, ResolvedMetadata>,
    kitsu: HashMap<String, String>,
}

impl StubProvider {
    pub fn new() -> Self {
        let mut titles = HashMap::new();
        titles.insert(
            "tt0111161".to_string(),
            ResolvedMetadata {
                title: "The Shawshank Redemption".to_string(),
                content_type: ContentType::Movie,
                poster: Some("https://img.example/shawshank.jpg".to_string()),
                genres: Some("Drama".to_string()),
                year: Some("1994".to_string()),
                plot: Some("Two imprisoned men bond over a number of years.".to_string()),
                imdb_rating: Some("9.3".to_string()),
            },
        );
        titles.insert(
            "tt0903747".to_string(),
            ResolvedMetadata {
                title: "Breaking Bad".to_string(),
                content_type: ContentType::Series,
                poster: None,
                genres: Some("Crime, Drama, Thriller".to_string()),
                year: Some("2008".to_string()),
                plot: None,
                imdb_rating: Some("9.5".to_string()),
            },
        );
        let mut kitsu = HashMap::new();
        kitsu.insert("12345".to_string(), "tt0903747".to_string());
        Self { titles, kitsu }
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    async fn resolve_imdb(&self, imdb_id: &str) -> Result<ResolvedMetadata, MetadataError> {
        self.titles
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(format!("Movie/Series not found: {imdb_id}")))
    }

    async fn resolve_kitsu_to_imdb(&self, kitsu_id: &str) -> Option<String> {
        self.kitsu.get(kitsu_id).cloned()
    }
}

/// Build a test `ServerConfig` with safe defaults. No network calls are
/// made in tests (the metadata provider is stubbed), so the OMDb/Kitsu
/// fields are placeholders.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        public_url: "http://localhost:7000".to_string(),
        omdb_api_key: "test-key".to_string(),
        omdb_base_url: "http://omdb.invalid".to_string(),
        kitsu_base_url: "http://kitsu.invalid".to_string(),
        http_client_timeout_secs: 10,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and a stubbed metadata provider.
///
/// Mirrors the wiring in `main.rs` so integration tests exercise the
/// same middleware stack that production uses.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let ws_manager = Arc::new(WsManager::new());
    let event_bus = Arc::new(EventBus::default());
    let provider: Arc<dyn MetadataProvider> = Arc::new(StubProvider::new());
    let pipeline = Arc::new(ContentPipeline::new(
        pool.clone(),
        Arc::clone(&provider),
        Arc::clone(&event_bus),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager,
        event_bus,
        pipeline,
        provider,
    };

    build_app_router(state, &config)
}

/// Build a JSON request.
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Build a body-less GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Collect a response body as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Create a group through the API and return its id.
pub async fn create_test_group(app: &Router, name: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/groups",
            serde_json::json!({ "name": name, "password": password }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let body = body_json(response).await;
    body["group_id"]
        .as_str()
        .expect("group_id should be a string")
        .to_string()
}
