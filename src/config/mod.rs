//! Configuration system for nighttemp.
//!
//! Settings live in `nighttemp.toml`, searched in:
//! 1. the directory given with `--config <dir>`
//! 2. **XDG_CONFIG_HOME**/nighttemp/nighttemp.toml
//!
//! A commented default file is written on first use.
//!
//! ```toml
//! #[Profile]
//! profile = "pr"              # "dev" (debug logging, mock provider) or "pr"
//!
//! #[Temperatures]
//! day_temp = 6000             # Temperature across the midday plateau (1000-20000) Kelvin
//! night_temp = 2700           # Temperature outside civil twilight (1000-20000) Kelvin
//! fallback = "daylight"       # Degenerate cycles: "daylight", "high" or "low"
//!
//! #[Provider]
//! provider = "live"           # "live" (sunrise-sunset.org), "solar" (offline) or "mock"
//! api_base_url = "https://api.sunrise-sunset.org/json"
//! request_timeout = 20        # Seconds to wait for the provider (1-120)
//!
//! #[Server]
//! bind = "127.0.0.1"
//! port = 5000
//! ```
//!
//! The `PROFILE` environment variable overrides `profile`. The dev profile
//! switches on debug output and, unless `provider` is set explicitly, the mock
//! provider so the service runs without network access.

pub mod builder;
pub mod loading;
pub mod validation;

#[cfg(test)]
mod tests;

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::common::constants::*;
use crate::engine::FallbackPolicy;
use crate::provider::ProviderKind;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Deployment profile, mirroring the `PROFILE` environment switch.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Development: debug logging and the mock provider
    Dev,
    /// Production
    #[default]
    Pr,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Dev => "dev",
            Profile::Pr => "pr",
        }
    }
}

impl FromStr for Profile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Profile::Dev),
            "pr" | "prod" => Ok(Profile::Pr),
            other => anyhow::bail!("Unknown profile '{}' (expected 'dev' or 'pr')", other),
        }
    }
}

/// Configuration structure for nighttemp.
///
/// Every field is optional in the file; [`loading::load_from_path`] fills in
/// defaults after validation, and the accessors fall back to the same defaults
/// for configs built in code.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// `dev` or `pr`; overridden by the `PROFILE` environment variable
    pub profile: Option<Profile>,

    /// Kelvin value across the midday plateau (HI)
    pub day_temp: Option<u32>,
    /// Kelvin value outside civil twilight (LO)
    pub night_temp: Option<u32>,
    /// Output policy when the phases cannot be totally ordered
    pub fallback: Option<FallbackPolicy>,

    /// Which sun-times provider answers requests
    pub provider: Option<ProviderKind>,
    /// Base URL of the sunrise-sunset.org compatible API
    pub api_base_url: Option<String>,
    /// Provider request timeout in seconds
    pub request_timeout: Option<u64>,

    /// Address the HTTP server binds to
    pub bind: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        loading::load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        loading::get_config_path()
    }

    pub fn profile(&self) -> Profile {
        self.profile.unwrap_or_default()
    }

    pub fn day_temp(&self) -> u32 {
        self.day_temp.unwrap_or(DEFAULT_DAY_TEMP)
    }

    pub fn night_temp(&self) -> u32 {
        self.night_temp.unwrap_or(DEFAULT_NIGHT_TEMP)
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback.unwrap_or_default()
    }

    /// The configured provider, or the profile's default (mock for dev).
    pub fn provider(&self) -> ProviderKind {
        self.provider.unwrap_or(match self.profile() {
            Profile::Dev => ProviderKind::Mock,
            Profile::Pr => ProviderKind::Live,
        })
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout(&self) -> u64 {
        self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether debug output should be on for this configuration.
    pub fn debug_enabled(&self) -> bool {
        self.profile() == Profile::Dev
    }

    /// Log the effective configuration as an indented block.
    pub fn log_config(&self, source: &str) {
        log_block_start!("Loaded configuration from {}", source);
        log_indented!("Profile: {}", self.profile().as_str());
        log_indented!("Day temperature: {}K", self.day_temp());
        log_indented!("Night temperature: {}K", self.night_temp());
        log_indented!("Degenerate cycle fallback: {}", self.fallback().as_str());

        match self.provider() {
            ProviderKind::Live => {
                log_indented!("Provider: {}", self.api_base_url());
                log_indented!("Request timeout: {}s", self.request_timeout());
            }
            kind => log_indented!("Provider: {}", kind.as_str()),
        }
    }
}
