use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infra::constants::{feedback, search, virtual_list};

pub const SERVER_URL_ENV: &str = "REELSHELF_SERVER_URL";
pub const TOKEN_ENV: &str = "REELSHELF_TOKEN";

const APP_DIR: &str = "reelshelf";
const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("server url {url:?} is not valid: {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url {0:?} must use http or https")]
    UnsupportedScheme(String),
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

/// Client settings, layered as defaults → config file → environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub debounce_ms: u64,
    pub scroll_threshold: f32,
    pub overscan_rows: usize,
    pub estimated_row_height: f32,
    pub toast_ttl_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            debounce_ms: search::DEBOUNCE_MS,
            scroll_threshold: virtual_list::LOAD_MORE_THRESHOLD,
            overscan_rows: virtual_list::OVERSCAN_ROWS,
            estimated_row_height: virtual_list::ESTIMATED_ROW_HEIGHT,
            toast_ttl_secs: feedback::TOAST_TTL.as_secs(),
        }
    }
}

impl ClientConfig {
    /// Directory holding `config.json` and the saved session
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    }

    /// Load from the platform config directory, then apply env overrides.
    ///
    /// A missing or unreadable file falls back to defaults.
    pub fn load() -> Self {
        let mut config = match Self::config_dir() {
            Some(dir) => Self::load_from_dir(&dir).unwrap_or_else(|e| {
                warn!("[Config] {}, using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Read `config.json` from `dir`; absent file yields defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!("[Config] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Allow the environment to override the file for the server URL
    pub fn apply_env(&mut self) {
        if let Ok(server_url) = std::env::var(SERVER_URL_ENV)
            && !server_url.trim().is_empty()
        {
            self.server_url = server_url;
        }
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let dir = Self::config_dir().ok_or(ConfigError::NoConfigDir)?;
        self.save_to_dir(&dir)
    }

    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, ConfigError> {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Parsed server URL; only http and https are accepted.
    pub fn validated_server_url(&self) -> Result<url::Url, ConfigError> {
        let parsed =
            url::Url::parse(self.server_url.trim()).map_err(|source| ConfigError::InvalidServerUrl {
                url: self.server_url.clone(),
                source,
            })?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            _ => Err(ConfigError::UnsupportedScheme(self.server_url.clone())),
        }
    }

    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    pub fn toast_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.toast_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.overscan_rows, 5);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"server_url": "https://catalog.example"}"#,
        )
        .unwrap();

        let config = ClientConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.server_url, "https://catalog.example");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            server_url: "http://10.0.0.2:5000".into(),
            debounce_ms: 150,
            ..ClientConfig::default()
        };
        config.save_to_dir(dir.path()).unwrap();
        assert_eq!(ClientConfig::load_from_dir(dir.path()).unwrap(), config);
    }

    #[test]
    fn server_url_must_be_http() {
        let mut config = ClientConfig::default();
        assert_eq!(
            config.validated_server_url().unwrap().as_str(),
            "http://localhost:5000/"
        );

        config.server_url = "localhost:5000".into();
        assert!(matches!(
            config.validated_server_url(),
            Err(ConfigError::UnsupportedScheme(_))
        ));

        config.server_url = "http://".into();
        assert!(matches!(
            config.validated_server_url(),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        assert!(matches!(
            ClientConfig::load_from_dir(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
