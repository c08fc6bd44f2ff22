use std::env;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::middleware::rate_limiter::RateLimiter;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub auto_migrate: bool,
    pub rate_limit_max: usize,
    pub rate_limit_window: Duration,
}

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, cfg: &Config) -> Self {
        Self {
            db,
            rate_limiter: Arc::new(RateLimiter::new(cfg.rate_limit_max, cfg.rate_limit_window)),
        }
    }
}

impl Config {
    pub fn init() -> Result<Config, String> {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "PORT must be a number".to_string())?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let auto_migrate = env::var("AUTO_MIGRATE")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        let rate_limit_max = env::var("RATE_LIMIT_MAX")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<usize>()
            .map_err(|_| "RATE_LIMIT_MAX must be a number".to_string())?;
        let rate_limit_window = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| "RATE_LIMIT_WINDOW_SECS must be a number".to_string())?;

        Ok(Config {
            server_host,
            server_port,
            database_url,
            auto_migrate,
            rate_limit_max,
            rate_limit_window,
        })
    }
}
