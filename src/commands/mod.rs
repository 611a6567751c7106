//! Command-line command handlers for nighttemp.
//!
//! Each command lives in its own submodule. The helpers here do the start-up
//! work every command shares: file logging, config directory, config loading
//! and the debug switch.

pub mod compute;
pub mod get;
pub mod help;
pub mod serve;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::args::GlobalOptions;
use crate::common::logger::{Log, LoggerGuard};
use crate::common::utils::format_duration;
use crate::config::{self, Config};
use crate::engine::Evaluation;

/// Everything a command needs after start-up.
pub struct CommandContext {
    pub config: Config,
    /// Keeps the `--log` writer thread alive until the command returns
    pub _log_guard: Option<LoggerGuard>,
}

/// Apply the global options and load the configuration.
pub fn prepare(options: &GlobalOptions) -> Result<CommandContext> {
    let log_guard = match &options.log_file {
        Some(path) => Some(
            Log::start_file_logging(path.clone())
                .with_context(|| format!("Failed to start logging to {path}"))?,
        ),
        None => None,
    };

    config::set_config_dir(options.config_dir.clone())?;
    let config = Config::load()?;

    Log::set_debug(options.debug_enabled || config.debug_enabled());

    Ok(CommandContext {
        config,
        _log_guard: log_guard,
    })
}

/// Print the temperature and the phases it was computed from.
pub fn log_evaluation(evaluation: &Evaluation) {
    let phases = &evaluation.phases;

    log_block_start!("Temperature: {}K", evaluation.temperature);
    match evaluation.progress {
        Some(progress) => log_indented!(
            "Region: {} ({:.1}% along)",
            evaluation.region,
            progress * 100.0
        ),
        None => log_indented!("Region: {}", evaluation.region),
    }

    log_block_start!("Sun phases (UTC):");
    log_indented!("Evaluated at:     {}", format_instant(phases.user_time));
    log_indented!("Twilight begins:  {}", format_instant(phases.morning_twilight));
    log_indented!("Sunrise:          {}", format_instant(phases.sunrise));
    if let (Some(begin), Some(end)) = (phases.midday_begin, phases.midday_end) {
        log_indented!("Midday begins:    {}", format_instant(begin));
        log_indented!("Midday ends:      {}", format_instant(end));
    }
    log_indented!("Sunset:           {}", format_instant(phases.sunset));
    log_indented!("Twilight ends:    {}", format_instant(phases.night_twilight));
    log_indented!(
        "Twilights:        {} morning, {} evening",
        format_duration(phases.morning_twilight_duration()),
        format_duration(phases.night_twilight_duration())
    );

    if !phases.is_ordered() {
        log_pipe!();
        log_warning!("Twilight too long to order the phases; fallback policy applied");
    }
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S").to_string()
}
