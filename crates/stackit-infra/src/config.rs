//! Server configuration loader for StackIt.
//!
//! Reads an optional TOML file, then applies environment overrides. Falls
//! back to defaults when the file is missing or malformed. CLI flags are
//! applied on top of the result by the binary.

use std::path::{Path, PathBuf};

use stackit_types::config::ServerConfig;

use crate::sqlite::pool::default_data_dir;

/// Load configuration from `path` (or `{data_dir}/config.toml` when `None`),
/// then apply environment overrides.
///
/// - Missing file: defaults.
/// - Unparseable file: logs a warning and uses defaults.
pub async fn load_server_config(path: Option<&Path>) -> ServerConfig {
    let env = |key: &str| std::env::var(key).ok();
    let data_dir = env("STACKIT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(default_data_dir);
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join("config.toml"));

    let config = read_config_file(&config_path).await;
    apply_env_overrides(config, env)
}

async fn read_config_file(config_path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts `std::env::var` so tests need not mutate the process
/// environment. Unparseable numeric values are ignored with a warning.
pub fn apply_env_overrides<F>(mut config: ServerConfig, lookup: F) -> ServerConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        config.database_url = Some(url);
    }
    if let Some(dir) = lookup("STACKIT_DATA_DIR") {
        config.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(name) = lookup("STACKIT_DB_NAME") {
        config.database_name = name;
    }
    if let Some(secret) = lookup("JWT_SECRET") {
        config.jwt_secret = Some(secret);
    }
    if let Some(host) = lookup("HOST") {
        config.host = host;
    }
    if let Some(port) = lookup("PORT") {
        match port.parse() {
            Ok(port) => config.port = port,
            Err(_) => tracing::warn!(value = %port, "ignoring invalid PORT"),
        }
    }
    if let Some(ms) = lookup("STACKIT_STORE_TIMEOUT_MS") {
        match ms.parse() {
            Ok(ms) => config.store_timeout_ms = ms,
            Err(_) => tracing::warn!(value = %ms, "ignoring invalid STACKIT_STORE_TIMEOUT_MS"),
        }
    }
    config
}

/// Data directory the database falls back to when no URL is configured.
pub fn resolve_data_dir(config: &ServerConfig) -> PathBuf {
    config.data_dir.clone().unwrap_or_else(default_data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn read_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_file(&tmp.path().join("config.toml")).await;
        assert_eq!(config.port, 8080);
        assert!(config.jwt_secret.is_none());
    }

    #[tokio::test]
    async fn read_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "jwt_secret = \"abc\"\nport = 9000\n")
            .await
            .unwrap();

        let config = read_config_file(&path).await;
        assert_eq!(config.jwt_secret.as_deref(), Some("abc"));
        assert_eq!(config.port, 9000);
    }

    #[tokio::test]
    async fn read_config_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "port = \"not a number").await.unwrap();

        let config = read_config_file(&path).await;
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let base = ServerConfig {
            jwt_secret: Some("from-file".to_string()),
            port: 9000,
            ..Default::default()
        };
        let config = apply_env_overrides(
            base,
            lookup(&[
                ("JWT_SECRET", "from-env"),
                ("PORT", "7000"),
                ("STACKIT_DB_NAME", "qa"),
                ("DATABASE_URL", "sqlite:///srv/stackit/qa.db"),
                ("STACKIT_STORE_TIMEOUT_MS", "250"),
            ]),
        );
        assert_eq!(config.jwt_secret.as_deref(), Some("from-env"));
        assert_eq!(config.port, 7000);
        assert_eq!(config.database_name, "qa");
        assert_eq!(config.database_url.as_deref(), Some("sqlite:///srv/stackit/qa.db"));
        assert_eq!(config.store_timeout_ms, 250);
    }

    #[test]
    fn env_overrides_ignore_bad_numbers() {
        let config = apply_env_overrides(
            ServerConfig::default(),
            lookup(&[("PORT", "eighty"), ("STACKIT_STORE_TIMEOUT_MS", "-1")]),
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_timeout_ms, 5_000);
    }

    #[test]
    fn resolve_data_dir_prefers_config() {
        let config = ServerConfig {
            data_dir: Some(PathBuf::from("/srv/stackit")),
            ..Default::default()
        };
        assert_eq!(resolve_data_dir(&config), PathBuf::from("/srv/stackit"));
    }
}
