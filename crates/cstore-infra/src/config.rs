//! Global configuration loader for cstore.
//!
//! Reads `cstore.toml` and deserializes it into [`GlobalConfig`]. The
//! lenient loader falls back to defaults when the file is missing or
//! malformed; the strict reader is used when the user names a file
//! explicitly.

use std::path::{Path, PathBuf};

use cstore_types::config::GlobalConfig;
use cstore_types::error::ConfigError;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "cstore.toml";

/// Pick the config file: an explicit path wins, then `./cstore.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Read and parse a config file, failing on any error.
pub async fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

    toml::from_str::<GlobalConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_global_config(path: &Path) -> GlobalConfig {
    match tokio::fs::try_exists(path).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to stat {}: {err}, using defaults", path.display());
            return GlobalConfig::default();
        }
    }

    match read_global_config(path).await {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            GlobalConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(&tmp.path().join("cstore.toml")).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstore.toml");
        tokio::fs::write(
            &path,
            r#"
catalog_path = "deals.csv"
cache_ttl_secs = 120

[server]
port = 3000
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(&path).await;
        assert_eq!(config.catalog_path, PathBuf::from("deals.csv"));
        assert_eq!(config.cache_ttl_secs, 120);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.completion.provider_name, "groq");
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstore.toml");
        tokio::fs::write(&path, "cache_ttl_secs = \"soon\"").await.unwrap();

        let config = load_global_config(&path).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[tokio::test]
    async fn read_global_config_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_global_config(&tmp.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn read_global_config_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstore.toml");
        tokio::fs::write(&path, "[server\nport = 1").await.unwrap();

        let err = read_global_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn resolve_config_path_prefers_explicit() {
        assert_eq!(
            resolve_config_path(Some(Path::new("/etc/cstore.toml"))),
            PathBuf::from("/etc/cstore.toml")
        );
        assert_eq!(resolve_config_path(None), PathBuf::from("cstore.toml"));
    }
}
