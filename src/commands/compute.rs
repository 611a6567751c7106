//! Compute command: one offline evaluation from explicit phase times.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::args::GlobalOptions;
use crate::engine::TemperatureEngine;
use crate::phases::RawSunPhases;

pub fn handle_compute_command(
    options: &GlobalOptions,
    phases: RawSunPhases,
    at: Option<DateTime<Utc>>,
) -> Result<()> {
    log_version!();
    let context = super::prepare(options)?;

    let engine = TemperatureEngine::from_config(&context.config);
    log_block_start!(
        "Ramping {}K -> {}K (fallback: {})",
        engine.night_temp(),
        engine.day_temp(),
        context.config.fallback().as_str()
    );

    let evaluation = engine.evaluate(phases, at.unwrap_or_else(Utc::now))?;
    super::log_evaluation(&evaluation);
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("compute - Temperature from explicit sun phases");
    log_block_start!("Usage: nighttemp compute [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--twilight-begin <t>  Start of morning civil twilight");
    log_indented!("--sunrise <t>         Sunrise");
    log_indented!("--sunset <t>          Sunset");
    log_indented!("--twilight-end <t>    End of evening civil twilight");
    log_indented!("--at <rfc3339>        Evaluate at this instant instead of now");
    log_block_start!("Times are UTC, as h:mm:ss AM/PM, HH:MM:SS or HH:MM.");
    log_block_start!("Examples:");
    log_indented!("nighttemp compute --twilight-begin 05:30 --sunrise 06:00 \\");
    log_indented!("    --sunset '6:00:00 PM' --twilight-end '6:30:00 PM' --at 2024-03-20T17:45:00Z");
    log_end!();
}
