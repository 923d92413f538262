// Configuration loader
// Loads settings from ~/.parley/config.toml or environment variable

use anyhow::{bail, Context, Result};
use std::fs;

use super::settings::Config;

/// Load configuration from the parley config file or environment.
pub fn load_config() -> Result<Config> {
    if let Some(config) = try_load_from_config_file()? {
        return Ok(config);
    }

    // Fall back to environment variable
    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        if !api_key.is_empty() {
            return Ok(Config::with_api_key(api_key));
        }
    }

    bail!(
        "No configuration found. Create ~/.parley/config.toml:\n\n\
        [backend]\n\
        kind = \"openai\"\n\
        api_key = \"sk-...\"\n\n\
        or, to use the local Autogen service:\n\n\
        [backend]\n\
        kind = \"autogen\"\n\n\
        Alternatively, set environment variable:\n\
        export OPENAI_API_KEY=\"sk-...\""
    );
}

fn try_load_from_config_file() -> Result<Option<Config>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".parley/config.toml");

    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    tracing::info!(path = %config_path.display(), "Loaded configuration");
    Ok(Some(config))
}
