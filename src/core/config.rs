//! Environment-based configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::{Context, Result};
use std::env;

/// Default model for the primary completion service.
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default endpoint and model for the secondary (free-tier) gateway.
const DEFAULT_GATEWAY_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_GATEWAY_MODEL: &str = "google/gemma-7b-it:free";

/// Bot configuration loaded from environment variables (or a `.env` file
/// via dotenvy, loaded by the binary before this runs).
#[derive(Clone, Debug)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// API key for the primary completion service
    pub openai_api_key: String,
    /// Model used for /query_gpt
    pub openai_model: String,
    /// Bearer token for the secondary gateway
    pub gateway_api_key: String,
    /// Chat-completions endpoint of the secondary gateway
    pub gateway_url: String,
    /// Model requested from the secondary gateway
    pub gateway_model: String,
    /// Optional guild ID for instant (development) command registration
    pub discord_guild_id: Option<String>,
    /// Default log filter for env_logger
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .context("DISCORD_TOKEN must be set (Discord bot token)")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set (primary completion service)")?,
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            gateway_api_key: env::var("OPENROUTER_API_KEY")
                .context("OPENROUTER_API_KEY must be set (secondary gateway)")?,
            gateway_url: env::var("OPENROUTER_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            gateway_model: env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_MODEL.to_string()),
            discord_guild_id: env::var("DISCORD_GUILD_ID").ok(),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        assert_eq!(DEFAULT_OPENAI_MODEL, "gpt-3.5-turbo");
        assert!(DEFAULT_GATEWAY_URL.ends_with("/chat/completions"));
        assert!(DEFAULT_GATEWAY_MODEL.contains(":free"));
    }
}
