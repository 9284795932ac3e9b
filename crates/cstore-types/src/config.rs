//! Global configuration types for cstore.
//!
//! `GlobalConfig` represents the top-level `cstore.toml`. All fields have
//! defaults, so an empty or absent file yields a working configuration.
//! Secrets never live here: the API key is session-scoped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Path to the product catalog CSV.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// How long a loaded catalog stays cached, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data").join("categorized_data.csv")
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            completion: CompletionConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Completion endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Provider name used in logs and spans.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_provider_name() -> String {
    "groq".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: default_base_url(),
        }
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds a session may sit untouched before it is dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_session_idle_secs() -> u64 {
    1800
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("data/categorized_data.csv"));
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.completion.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.session_idle_secs, 1800);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
catalog_path = "/srv/deals.csv"
cache_ttl_secs = 60

[completion]
base_url = "http://localhost:9000/v1"

[server]
port = 9090
session_idle_secs = 120
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/srv/deals.csv"));
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.completion.base_url, "http://localhost:9000/v1");
        assert_eq!(config.completion.provider_name, "groq");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.session_idle_secs, 120);
    }
}
