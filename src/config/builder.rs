//! Default configuration file creation.
//!
//! Writes a commented `nighttemp.toml` with aligned inline comments, using a
//! small builder so sections and settings line up.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::common::constants::*;

/// Create a default config file at `path`, creating parent directories.
pub fn create_default_config(path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", path.display());
    Ok(())
}

/// Contents of a freshly generated `nighttemp.toml`.
pub fn default_config_content() -> String {
    ConfigBuilder::new()
        .add_section("Profile")
        .add_setting(
            "profile",
            "\"pr\"",
            "\"dev\" (debug output, mock provider) or \"pr\"",
        )
        .add_section("Temperatures")
        .add_setting(
            "day_temp",
            &DEFAULT_DAY_TEMP.to_string(),
            &format!("Midday plateau temperature ({MINIMUM_TEMP}-{MAXIMUM_TEMP}) Kelvin"),
        )
        .add_setting(
            "night_temp",
            &DEFAULT_NIGHT_TEMP.to_string(),
            &format!("Temperature outside civil twilight ({MINIMUM_TEMP}-{MAXIMUM_TEMP}) Kelvin"),
        )
        .add_setting(
            "fallback",
            "\"daylight\"",
            "When twilight is too long to order the phases: \"daylight\", \"high\", \"low\"",
        )
        .add_section("Provider")
        .add_commented_setting(
            "provider",
            "\"live\"",
            "\"live\" (sunrise-sunset.org), \"solar\" (offline) or \"mock\"; unset follows the profile",
        )
        .add_setting(
            "api_base_url",
            &format!("\"{DEFAULT_API_BASE_URL}\""),
            "Sun-times API endpoint",
        )
        .add_setting(
            "request_timeout",
            &DEFAULT_REQUEST_TIMEOUT.to_string(),
            &format!(
                "Provider timeout in seconds ({MINIMUM_REQUEST_TIMEOUT}-{MAXIMUM_REQUEST_TIMEOUT})"
            ),
        )
        .add_section("Server")
        .add_setting("bind", &format!("\"{DEFAULT_BIND}\""), "Listen address")
        .add_setting("port", &DEFAULT_PORT.to_string(), "Listen port")
        .build()
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// A setting left commented out so its profile-dependent default applies.
    fn add_commented_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("# {key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // Align every comment one space past the longest setting line
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.push(String::new());
        result.join("\n")
    }
}
