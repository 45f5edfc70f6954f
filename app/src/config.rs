//! Configuration for the todo terminal client.
//!
//! Resolution order: built-in defaults, then an optional TOML file
//! (`$TODO_CONFIG`, else `todo.toml` in the working directory when it
//! exists), then the `TODO_API_URL` environment variable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "TODO_CONFIG";
pub const API_URL_ENV: &str = "TODO_API_URL";
const DEFAULT_CONFIG_FILE: &str = "todo.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the todo API, e.g. `http://127.0.0.1:3000`.
    pub api_url: String,
    pub request_timeout_secs: u64,
    /// Directory the log file is written to.
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_secs: 10,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn from_toml(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(validation("api_url", "must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(validation("api_url", "must start with http:// or https://"));
        }
        if self.request_timeout_secs == 0 {
            return Err(validation("request_timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Load configuration from the process environment and working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let api_url = std::env::var(API_URL_ENV).ok();
    load_from(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE), api_url)
}

/// An explicit path must exist; the fallback path is optional.
fn load_from(explicit: Option<&Path>, fallback: &Path, api_url: Option<String>) -> Result<Config, ConfigError> {
    let mut config = match explicit {
        Some(path) if !path.exists() => {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => read(path)?,
        None if fallback.exists() => read(fallback)?,
        None => Config::default(),
    };
    if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
        config.api_url = url;
    }
    config.validate()?;
    Ok(config)
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml(&raw, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("todo-app-config-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("todo.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml(r#"api_url = "https://todo.example""#, Path::new("x")).unwrap();
        assert_eq!(config.api_url, "https://todo.example");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("colour = \"red\"", Path::new("x")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_fallback_uses_defaults() {
        let config = load_from(None, Path::new("/nonexistent/todo.toml"), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_from(Some(Path::new("/nonexistent/todo.toml")), Path::new("unused"), None).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn env_url_overrides_file() {
        let path = temp_file("override", "api_url = \"http://from-file:1\"\nrequest_timeout_secs = 3\n");
        let config = load_from(Some(path.as_path()), Path::new("unused"), Some("http://from-env:2".to_string())).unwrap();
        assert_eq!(config.api_url, "http://from-env:2");
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let path = temp_file("zero", "request_timeout_secs = 0\n");
        let err = load_from(Some(path.as_path()), Path::new("unused"), None).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "request_timeout_secs")
        );
    }

    #[test]
    fn non_http_url_fails_validation() {
        let err = load_from(None, Path::new("/nonexistent"), Some("ftp://x".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
