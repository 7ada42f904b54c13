mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Environment variable that overrides `llm.api_key`.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_from(&config_path).await?;
    apply_env_overrides(config, env::var(API_KEY_ENV).ok())
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies the API key from the environment, then checks that one is set.
pub fn apply_env_overrides(mut config: Config, api_key: Option<String>) -> Result<Config> {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        debug!("Using API key from {}", API_KEY_ENV);
        config.llm.api_key = key;
    }

    if config.llm.api_key.trim().is_empty() {
        return Err(Error::config(format!(
            "No API key configured. Set {} or llm.api_key",
            API_KEY_ENV
        )));
    }

    Ok(config)
}
