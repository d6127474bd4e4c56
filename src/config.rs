//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) >
//! built-in defaults.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

// ==================== Study Configuration ====================

/// Maximum number of due cards handed out for one study session
pub const DEFAULT_DUE_CARD_LIMIT: usize = 50;

/// Hard upper bound a client may request with `?limit=`
pub const MAX_DUE_CARD_LIMIT: usize = 500;

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseConfig>,
    server: Option<ServerConfig>,
    study: Option<StudyConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct StudyConfig {
    due_card_limit: Option<usize>,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub server_addr: String,
    pub server_port: u16,
    pub due_card_limit: usize,
}

impl Settings {
    /// Load settings from config.toml, the process environment and .env
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let contents = std::fs::read_to_string(paths::CONFIG_FILE).ok();
        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve settings from an optional config.toml body and an env lookup
    pub fn from_sources(toml_contents: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = match toml_contents.map(toml::from_str::<FileConfig>) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                tracing::warn!("Ignoring malformed {}: {}", paths::CONFIG_FILE, e);
                FileConfig::default()
            }
            None => FileConfig::default(),
        };

        let database_path = file
            .database
            .and_then(|db| db.path)
            .inspect(|path| tracing::info!("Using database from {}: {}", paths::CONFIG_FILE, path))
            .or_else(|| {
                env("DATABASE_PATH")
                    .inspect(|path| tracing::info!("Using database from DATABASE_PATH env: {}", path))
            })
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(paths::db_path()));

        let (file_addr, file_port) = match file.server {
            Some(server) => (server.addr, server.port),
            None => (None, None),
        };

        let server_addr = file_addr
            .or_else(|| env("SERVER_ADDR"))
            .unwrap_or_else(|| SERVER_ADDR.to_string());

        let server_port = file_port
            .or_else(|| env("PORT").and_then(|p| parse_or_warn("PORT", &p)))
            .unwrap_or(SERVER_PORT);

        let due_card_limit = file
            .study
            .and_then(|study| study.due_card_limit)
            .or_else(|| env("DUE_CARD_LIMIT").and_then(|v| parse_or_warn("DUE_CARD_LIMIT", &v)))
            .unwrap_or(DEFAULT_DUE_CARD_LIMIT)
            .clamp(1, MAX_DUE_CARD_LIMIT);

        Self {
            database_path,
            server_addr,
            server_port,
            due_card_limit,
        }
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring invalid {} value: {}", key, value);
            None
        }
    }
}
