//! services/cli/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MATCH_MODEL: &str = "gemini-3-pro-preview";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    /// Directory holding the saved watchlist and history.
    pub data_dir: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub match_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test builds to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let data_dir = lookup("CINEMATCHER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.cinematcher"));

        // The key is only needed by commands that reach the service.
        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());

        let gemini_api_base =
            lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !gemini_api_base.starts_with("http://") && !gemini_api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "GEMINI_API_BASE".to_string(),
                format!("'{}' is not an http(s) URL", gemini_api_base),
            ));
        }

        let match_model =
            lookup("MATCH_MODEL").unwrap_or_else(|| DEFAULT_MATCH_MODEL.to_string());

        Ok(Self {
            log_level,
            data_dir,
            gemini_api_key,
            gemini_api_base,
            match_model,
        })
    }

    /// The API key, for commands that cannot run without one.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.data_dir, PathBuf::from("./.cinematcher"));
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.match_model, DEFAULT_MATCH_MODEL);
        assert!(matches!(config.require_api_key(), Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = config_from(&[("GEMINI_API_KEY", "  ")]).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn rejects_an_unknown_log_level() {
        let err = config_from(&[("RUST_LOG", "chatty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "RUST_LOG"));
    }

    #[test]
    fn rejects_a_non_http_api_base() {
        let err = config_from(&[("GEMINI_API_BASE", "localhost:8080")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "GEMINI_API_BASE"));
    }
}
