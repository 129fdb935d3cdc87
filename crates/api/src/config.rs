/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `600`).
    ///
    /// Generous because `POST /generate` runs a full generation inside the
    /// request.
    pub request_timeout_secs: u64,
    /// Maximum concurrent generation calls (default: `2`, bounded by
    /// accelerator memory).
    pub max_concurrent_generations: usize,
    /// Base URL of the inference server (default: `http://localhost:8188`).
    pub generator_url: String,
    /// Directory finished videos are written into (default: `./videos`).
    pub videos_dir: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `HOST`                       | `0.0.0.0`                |
    /// | `PORT`                       | `8000`                   |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`       | `600`                    |
    /// | `MAX_CONCURRENT_GENERATIONS` | `2`                      |
    /// | `GENERATOR_URL`              | `http://localhost:8188`  |
    /// | `VIDEOS_DIR`                 | `./videos`               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_concurrent_generations: usize = std::env::var("MAX_CONCURRENT_GENERATIONS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("MAX_CONCURRENT_GENERATIONS must be a valid usize");

        let generator_url =
            std::env::var("GENERATOR_URL").unwrap_or_else(|_| "http://localhost:8188".into());

        let videos_dir = std::env::var("VIDEOS_DIR").unwrap_or_else(|_| "./videos".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_concurrent_generations,
            generator_url,
            videos_dir,
        }
    }
}
