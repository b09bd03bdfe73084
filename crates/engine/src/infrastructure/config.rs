//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite document store file
    pub db_path: PathBuf,
    /// Optional seed JSON imported into an empty store
    pub seed_path: Option<PathBuf>,

    /// HTTP bind host
    pub server_host: String,
    /// HTTP bind port
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any). Empty disables CORS.
    pub cors_allowed_origins: Vec<String>,

    /// Run the snapshot reconciliation sweep before serving
    pub reconcile_on_startup: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = var("SERVER_PORT")
            .or_else(|| var("PORT"))
            .unwrap_or_else(|| "8080".to_string());

        Ok(Self {
            db_path: var("WIKI_DB_PATH")
                .unwrap_or_else(|| "./data/wiki.db".to_string())
                .into(),
            seed_path: var("WIKI_SEED_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: port
                .trim()
                .parse()
                .with_context(|| format!("SERVER_PORT must be a valid port number, got {port:?}"))?,

            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),

            reconcile_on_startup: match var("RECONCILE_ON_STARTUP") {
                None => true,
                Some(value) => parse_flag(&value)
                    .context("RECONCILE_ON_STARTUP must be true or false")?,
            },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
