//! Server Configuration
//!
//! All settings come from the environment (with `.env` support loaded in
//! `main`), with sensible defaults for local development.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Log level (trace/debug/info/warn/error)
    pub log_level: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
    /// Upper bound for export generation before the request fails
    pub export_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("MUSTER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("MUSTER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: env::var("MUSTER_DB_PATH")
                .unwrap_or_else(|_| "muster.db".to_string()),
            log_level: env::var("MUSTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: env::var("MUSTER_LOG_DIR").ok(),
            export_timeout_secs: env::var("MUSTER_EXPORT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
