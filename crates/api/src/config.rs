/// Server configuration loaded from environment variables.
///
/// All fields except the OMDb API key have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `7000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A `*` entry allows any origin (Stremio clients connect from
    /// arbitrary origins).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Per-task wait during graceful shutdown, in seconds (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// Externally reachable base URL, used to build addon and redirect
    /// URLs handed to Stremio clients.
    pub public_url: String,
    /// OMDb API key. Required.
    pub omdb_api_key: String,
    /// OMDb API base URL.
    pub omdb_base_url: String,
    /// Kitsu API base URL.
    pub kitsu_base_url: String,
    /// Timeout for outbound OMDb/Kitsu requests, in seconds (default: `10`).
    pub http_client_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HOST`                    | `0.0.0.0`                   |
    /// | `PORT`                    | `7000`                      |
    /// | `CORS_ORIGINS`            | `*`                         |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                        |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `5`                         |
    /// | `PUBLIC_URL`              | `http://127.0.0.1:7000`     |
    /// | `OMDB_API_KEY`            | (required)                  |
    /// | `OMDB_BASE_URL`           | `https://www.omdbapi.com`   |
    /// | `KITSU_BASE_URL`          | `https://kitsu.io/api/edge` |
    /// | `HTTP_CLIENT_TIMEOUT_SECS`| `10`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "7000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{port}"))
            .trim_end_matches('/')
            .to_string();

        let omdb_api_key = std::env::var("OMDB_API_KEY").expect("OMDB_API_KEY must be set");

        let omdb_base_url = std::env::var("OMDB_BASE_URL")
            .unwrap_or_else(|_| "https://www.omdbapi.com".into());

        let kitsu_base_url = std::env::var("KITSU_BASE_URL")
            .unwrap_or_else(|_| "https://kitsu.io/api/edge".into());

        let http_client_timeout_secs: u64 = std::env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("HTTP_CLIENT_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            public_url,
            omdb_api_key,
            omdb_base_url,
            kitsu_base_url,
            http_client_timeout_secs,
        }
    }
}
