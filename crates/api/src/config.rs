/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the upstream store API (default: `https://fakestoreapi.com`).
    pub store_api_url: String,
    /// Seconds a catalog snapshot stays fresh before it is refetched
    /// (default: `3600`). `0` refetches on every request.
    pub catalog_revalidate_secs: u64,
    /// Quiet period applied to search input in browse sessions, in
    /// milliseconds (default: `300`).
    pub search_debounce_ms: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `STORE_API_URL`           | `https://fakestoreapi.com` |
    /// | `CATALOG_REVALIDATE_SECS` | `3600`                     |
    /// | `SEARCH_DEBOUNCE_MS`      | `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_api_url =
            std::env::var("STORE_API_URL").unwrap_or_else(|_| "https://fakestoreapi.com".into());

        let catalog_revalidate_secs: u64 = std::env::var("CATALOG_REVALIDATE_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("CATALOG_REVALIDATE_SECS must be a valid u64");

        let search_debounce_ms: u64 = std::env::var("SEARCH_DEBOUNCE_MS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("SEARCH_DEBOUNCE_MS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_api_url,
            catalog_revalidate_secs,
            search_debounce_ms,
        }
    }
}
