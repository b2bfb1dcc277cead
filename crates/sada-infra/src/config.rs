//! Service configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.sada/` in production)
//! and deserializes it into [`ServiceConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use sada_types::config::ServiceConfig;
use secrecy::SecretString;

/// Resolve the data directory.
///
/// Priority: explicit override (CLI flag), `SADA_DATA_DIR`, `~/.sada`.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    if let Ok(dir) = std::env::var("SADA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".sada")
}

/// Load service configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

/// Resolve the database URL from config, defaulting to a SQLite file in
/// the data directory.
pub fn resolve_database_url(config: &ServiceConfig, data_dir: &Path) -> String {
    config.database.url.clone().unwrap_or_else(|| {
        format!("sqlite://{}?mode=rwc", data_dir.join("sada.db").display())
    })
}

/// Read the model API key from the configured environment variable.
///
/// The key goes straight into a [`SecretString`] so it never sits in a
/// plain `String` owned by config.
pub fn resolve_api_key(config: &ServiceConfig) -> Option<SecretString> {
    std::env::var(&config.model.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.model.model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
bind = "0.0.0.0:9100"

[model]
model = "gemini-2.5-pro"
timeout_secs = 60

[chat]
enforce_session_refs = true
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.bind, "0.0.0.0:9100");
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert_eq!(config.model.timeout_secs, 60);
        assert!(config.chat.enforce_session_refs);
        // Unspecified fields keep their defaults.
        assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn resolve_database_url_defaults_to_data_dir() {
        let config = ServiceConfig::default();
        let url = resolve_database_url(&config, Path::new("/var/lib/sada"));
        assert_eq!(url, "sqlite:///var/lib/sada/sada.db?mode=rwc");
    }

    #[test]
    fn resolve_database_url_prefers_config() {
        let mut config = ServiceConfig::default();
        config.database.url = Some("sqlite:///tmp/custom.db".to_string());
        let url = resolve_database_url(&config, Path::new("/var/lib/sada"));
        assert_eq!(url, "sqlite:///tmp/custom.db");
    }

    #[test]
    fn resolve_data_dir_prefers_override() {
        let dir = resolve_data_dir(Some(PathBuf::from("/custom")));
        assert_eq!(dir, PathBuf::from("/custom"));
    }
}
