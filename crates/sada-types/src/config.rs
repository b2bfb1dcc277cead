//! Service configuration, loaded from `config.toml` in the data directory.
//!
//! Every section and field has a default so a missing or partial file
//! still yields a runnable configuration. The API key itself is never
//! stored here -- only the name of the environment variable that holds it.

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL; defaults to `sqlite://{data_dir}/sada.db?mode=rwc`
    /// when unset.
    #[serde(default)]
    pub url: Option<String>,
}

/// External model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the provider base URL (testing, proxies).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout; a timed-out call surfaces as a model failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Conversation-model behavior toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// When true, posting a message or analysis with an unknown session id
    /// is rejected instead of tolerated as an orphaned reference.
    #[serde(default)]
    pub enforce_session_refs: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_output_tokens() -> u32 {
    2048
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.model.timeout_secs, 120);
        assert!(config.database.url.is_none());
        assert!(!config.chat.enforce_session_refs);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{"model": {"model": "gemini-2.5-pro"}}"#;
        let config: ServiceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert_eq!(config.model.timeout_secs, 120);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }
}
