//! Runtime configuration.
//!
//! Everything comes from environment variables; a `.env` file in the current
//! directory is honoured outside of tests. The storage location is resolved
//! separately by `storage::db_path`.

use std::time::Duration;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Settings for the generative endpoint.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    /// `None` means the request runs without an explicit timeout.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let endpoint = std::env::var("PLANUST_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = std::env::var("PLANUST_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout = match std::env::var("PLANUST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("PLANUST_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self { api_key, endpoint, model, timeout })
    }

    /// The API key, or an error naming the variable that should hold it.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))
    }
}
