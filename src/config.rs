//! Application Configuration Module
//!
//! Centralizes configuration for the interview coach. Settings are loaded
//! from environment variables once at startup and handed to the pieces that
//! need them.

use std::env;
use tracing::Level;

/// Holds all configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub chat_model: String,
    pub base_url: String,
    pub log_level: Level,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    // *   `COACH_API_KEY`: Secret key for the chat completions endpoint. Required.
    // *   `COACH_CHAT_MODEL`: (Optional) Model used for all coach requests. Defaults to "gpt-4o".
    // *   `COACH_BASE_URL`: (Optional) API base URL. Defaults to "https://api.openai.com/v1".
    // *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file. This is useful for local development and is ignored if not present.
        dotenvy::dotenv().ok();

        let api_key = env::var("COACH_API_KEY")
            .map_err(|_| ConfigError::MissingVar("COACH_API_KEY".to_string()))?;

        // Provide defaults for non-critical variables.
        let chat_model = env::var("COACH_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let base_url = env::var("COACH_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        // Configure logging level from RUST_LOG, with a sensible default.
        let log_level_str = env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        Ok(Self {
            api_key,
            chat_model,
            base_url,
            log_level,
        })
    }
}
