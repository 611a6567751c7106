//! Configuration loading functionality.
//!
//! Handles locating `nighttemp.toml`, applying the `PROFILE` override and
//! defaults, and validating the result.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::validation::validate_config;
use super::{Config, Profile};
use crate::common::constants::*;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Path of `nighttemp.toml`: the custom directory if set, otherwise the XDG
/// config directory.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Creates a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path)
            .context("Failed to create default config during load")?;
    }

    load_from_path(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Load configuration from a specific path.
///
/// Unlike [`load`], this does not create the file when it is missing.
pub fn load_from_path(path: &PathBuf) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    apply_profile_override(&mut config, std::env::var(PROFILE_ENV_VAR).ok().as_deref())?;

    validate_config(&config)?;

    apply_defaults(&mut config);

    Ok(config)
}

/// Apply the `PROFILE` environment variable on top of the file's setting.
pub(crate) fn apply_profile_override(config: &mut Config, env_value: Option<&str>) -> Result<()> {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        let profile: Profile = value
            .parse()
            .with_context(|| format!("Invalid {PROFILE_ENV_VAR} environment variable"))?;
        config.profile = Some(profile);
    }
    Ok(())
}

/// Fill every unset field with its default so the loaded config is explicit.
pub(crate) fn apply_defaults(config: &mut Config) {
    config.profile = Some(config.profile());
    config.provider = Some(config.provider());
    config.day_temp = Some(config.day_temp());
    config.night_temp = Some(config.night_temp());
    config.fallback = Some(config.fallback());
    config.api_base_url = Some(config.api_base_url().to_string());
    config.request_timeout = Some(config.request_timeout());
    config.bind = Some(config.bind().to_string());
    config.port = Some(config.port());
}
