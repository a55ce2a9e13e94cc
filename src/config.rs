use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Used only when no key is set in the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_error_return_ms")]
    pub error_return_ms: u64,
    #[serde(default = "default_shuffle_options")]
    pub shuffle_options: bool,
}

fn default_theme() -> String {
    "lingo-dark".to_string()
}
fn default_model() -> String {
    "gemini-flash-lite-latest".to_string()
}
fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_error_return_ms() -> u64 {
    2000
}
fn default_shuffle_options() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            error_return_ms: default_error_return_ms(),
            shuffle_options: default_shuffle_options(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lingo")
            .join("config.toml")
    }

    /// Clamp out-of-range values and restore blank strings to defaults.
    pub fn validate(&mut self) {
        self.request_timeout_secs = self.request_timeout_secs.clamp(5, 600);
        self.error_return_ms = self.error_return_ms.clamp(250, 30_000);
        if self.model.trim().is_empty() {
            self.model = default_model();
        }
        if self.api_base_url.trim().is_empty() {
            self.api_base_url = default_api_base_url();
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        if self.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.api_key = None;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn error_return_delay(&self) -> Duration {
        Duration::from_millis(self.error_return_ms)
    }

    /// Environment first, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        Self::api_key_from(
            API_KEY_ENV_VARS
                .iter()
                .filter_map(|var| std::env::var(var).ok()),
            self.api_key.as_deref(),
        )
    }

    fn api_key_from(
        env_values: impl IntoIterator<Item = String>,
        file_value: Option<&str>,
    ) -> Option<String> {
        env_values
            .into_iter()
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .or_else(|| {
                file_value
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "lingo-dark");
        assert_eq!(config.model, "gemini-flash-lite-latest");
        assert_eq!(config.error_return_ms, 2000);
        assert!(config.shuffle_options);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
theme = "lingo-light"
shuffle_options = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "lingo-light");
        assert!(!config.shuffle_options);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_config_serde_roundtrip_omits_missing_key() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(!serialized.contains("api_key"));
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.model, deserialized.model);
        assert_eq!(config.error_return_ms, deserialized.error_return_ms);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config {
            request_timeout_secs: 0,
            error_return_ms: 1_000_000,
            model: "  ".to_string(),
            api_base_url: "https://example.test/v1/".to_string(),
            api_key: Some(" ".to_string()),
            ..Config::default()
        };
        config.validate();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.error_return_ms, 30_000);
        assert_eq!(config.model, "gemini-flash-lite-latest");
        assert_eq!(config.api_base_url, "https://example.test/v1");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_api_key_prefers_environment() {
        let key = Config::api_key_from(vec!["env-key".to_string()], Some("file-key"));
        assert_eq!(key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_api_key_skips_blank_environment() {
        let key = Config::api_key_from(vec!["  ".to_string()], Some("file-key"));
        assert_eq!(key.as_deref(), Some("file-key"));
        assert!(Config::api_key_from(Vec::<String>::new(), None).is_none());
    }
}
