//! services/reader/src/config.rs
//!
//! Defines the reader's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::time::Duration;
use tracing::Level;
use url::Url;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Story API root, without a trailing slash. Image paths are appended to it.
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub feedback_redirect_delay: Duration,
    pub listing_route: String,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Story API ---
        let api_base_url = normalize_base_url(
            "STORY_API_BASE_URL",
            &var("STORY_API_BASE_URL").unwrap_or_else(|| "http://localhost:8000".to_string()),
        )?;
        let api_token = var("STORY_API_TOKEN").filter(|t| !t.trim().is_empty());
        let request_timeout = Duration::from_secs(parse_number(&var, "STORY_API_TIMEOUT_SECS", 10)?);

        // --- Reader behaviour ---
        let feedback_redirect_delay =
            Duration::from_millis(parse_number(&var, "FEEDBACK_REDIRECT_DELAY_MS", 1500)?);
        let listing_route = var("STORY_LISTING_ROUTE").unwrap_or_else(|| "/stories".to_string());

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout,
            feedback_redirect_delay,
            listing_route,
            log_level,
        })
    }

    /// Replaces the API base URL, e.g. from a command-line flag.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url("--base-url", base_url)?;
        Ok(self)
    }
}

fn normalize_base_url(name: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))?;
    Ok(trimmed.to_string())
}

fn parse_number<F>(var: &F, name: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
    }
}
