use aula_core::auth::token::{TokenConfig, DEFAULT_ACCESS_EXPIRY_MINS, DEFAULT_REFRESH_EXPIRY_DAYS};

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
    /// Seconds between revocation-record pruning runs (default: `3600`).
    pub prune_interval_secs: u64,
    /// Token configuration (secret, expiry durations).
    pub token: TokenConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                    |
    /// |----------------------------------|----------------------------|
    /// | `HOST`                           | `0.0.0.0`                  |
    /// | `PORT`                           | `3000`                     |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                       |
    /// | `REVOCATION_PRUNE_INTERVAL_SECS` | `3600`                     |
    ///
    /// Token settings are read by [`token_config_from_env`].
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

        let prune_interval_secs: u64 = std::env::var("REVOCATION_PRUNE_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("REVOCATION_PRUNE_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            prune_interval_secs,
            token: token_config_from_env(),
        }
    }
}

/// Load token configuration from environment variables.
///
/// | Env Var                    | Required | Default |
/// |----------------------------|----------|---------|
/// | `JWT_SECRET`               | **yes**  | --      |
/// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
/// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
///
/// # Panics
///
/// Panics if `JWT_SECRET` is not set or is empty, or if an expiry is not a
/// positive integer.
pub fn token_config_from_env() -> TokenConfig {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
    assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

    let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
        .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
        .parse()
        .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");
    assert!(access_token_expiry_mins > 0, "JWT_ACCESS_EXPIRY_MINS must be positive");

    let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
        .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
        .parse()
        .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");
    assert!(refresh_token_expiry_days > 0, "JWT_REFRESH_EXPIRY_DAYS must be positive");

    TokenConfig {
        secret,
        access_token_expiry_mins,
        refresh_token_expiry_days,
    }
}
