//! Server configuration types for StackIt.
//!
//! `ServerConfig` is the merged result of `config.toml`, environment
//! variables, and CLI flags. All fields except the token secret have
//! sensible defaults.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the StackIt server.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Full database URL. When unset, derived from `data_dir` and `database_name`.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Directory holding the database file and `config.toml`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Database name; the SQLite file is `{data_dir}/{database_name}.db`.
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Shared secret used to verify HS256 bearer tokens. Required to serve.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on any single store call.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_database_name() -> String {
    "stackit".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_store_timeout_ms() -> u64 {
    5_000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            data_dir: None,
            database_name: default_database_name(),
            jwt_secret: None,
            host: default_host(),
            port: default_port(),
            store_timeout_ms: default_store_timeout_ms(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    /// Resolve the database URL, deriving a SQLite file path when none is set.
    pub fn resolved_database_url(&self, fallback_data_dir: &std::path::Path) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        let dir = self.data_dir.as_deref().unwrap_or(fallback_data_dir);
        format!(
            "sqlite://{}?mode=rwc",
            dir.join(format!("{}.db", self.database_name)).display()
        )
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &self.database_url)
            .field("data_dir", &self.data_dir)
            .field("database_name", &self.database_name)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[redacted]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}
