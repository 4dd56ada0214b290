//! Client configuration.
//!
//! The API base URL is resolved from, in order: an explicit value (CLI flag),
//! the `NOTEBOX_API_URL` environment variable, the JSON config file, and
//! finally the local development default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{normalize_base_url, normalize_text_option};

pub const API_URL_ENV: &str = "NOTEBOX_API_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

const CONFIG_FILE_NAME: &str = "config.json";

/// Persisted client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// Default location of the config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("notebox").join(CONFIG_FILE_NAME))
}

impl ClientConfig {
    /// Load the config file at the default location; missing file means defaults.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            Error::InvalidConfiguration(format!(
                "Failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::InvalidConfiguration(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.take());
    }

    /// Pick the API base URL from the explicit value, env value, or this file.
    ///
    /// The first non-blank candidate wins and must be an http(s) URL.
    pub fn resolve_api_base_url(
        &self,
        explicit: Option<String>,
        env_value: Option<String>,
    ) -> Result<String> {
        let chosen = normalize_text_option(explicit)
            .or_else(|| normalize_text_option(env_value))
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        normalize_base_url(&chosen).map_err(Error::InvalidConfiguration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(url: &str) -> ClientConfig {
        ClientConfig {
            api_base_url: Some(url.to_string()),
        }
    }

    #[test]
    fn explicit_value_wins() {
        let resolved = file_config("https://file.example.com")
            .resolve_api_base_url(
                Some("https://flag.example.com/".to_string()),
                Some("https://env.example.com".to_string()),
            )
            .unwrap();
        assert_eq!(resolved, "https://flag.example.com");
    }

    #[test]
    fn blank_explicit_falls_through_to_env() {
        let resolved = file_config("https://file.example.com")
            .resolve_api_base_url(
                Some("  ".to_string()),
                Some("https://env.example.com".to_string()),
            )
            .unwrap();
        assert_eq!(resolved, "https://env.example.com");
    }

    #[test]
    fn file_then_default() {
        let resolved = file_config("https://file.example.com")
            .resolve_api_base_url(None, None)
            .unwrap();
        assert_eq!(resolved, "https://file.example.com");

        let resolved = ClientConfig::default()
            .resolve_api_base_url(None, None)
            .unwrap();
        assert_eq!(resolved, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn rejects_non_http_url() {
        let error = ClientConfig::default()
            .resolve_api_base_url(Some("ftp://example.com".to_string()), None)
            .unwrap_err();
        assert!(error.to_string().contains("http:// or https://"));
    }

    #[test]
    fn load_from_missing_path_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn load_from_path_normalizes_and_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, r#"{"api_base_url": "   "}"#).unwrap();
        assert_eq!(ClientConfig::load_from_path(&path).unwrap().api_base_url, None);

        std::fs::write(&path, r#"{"api_url": "http://x"}"#).unwrap();
        let error = ClientConfig::load_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }
}
