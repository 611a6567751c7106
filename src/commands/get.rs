//! Get command: one evaluation for a position, with phases from a provider.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::args::GlobalOptions;
use crate::nighttemp::NightTemp;
use crate::provider::{Coordinates, ProviderKind, SunPhaseProvider};

pub async fn handle_get_command(
    options: &GlobalOptions,
    latitude: f64,
    longitude: f64,
    at: Option<DateTime<Utc>>,
    provider: Option<ProviderKind>,
) -> Result<()> {
    log_version!();
    let context = super::prepare(options)?;

    let coordinates = Coordinates::new(latitude, longitude)?;
    let mut app = NightTemp::new(context.config.clone())?;
    if let Some(kind) = provider {
        app = app.using(kind)?;
    }

    log_block_start!(
        "Position {:.4}°, {:.4}° via {}",
        coordinates.latitude,
        coordinates.longitude,
        app.provider().name()
    );

    let evaluation = app.evaluate(coordinates, at.unwrap_or_else(Utc::now)).await?;
    super::log_evaluation(&evaluation);
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("get - Temperature for a position");
    log_block_start!("Usage: nighttemp get --lat <deg> --lng <deg> [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--lat <deg>          Latitude, -90 to 90");
    log_indented!("--lng <deg>          Longitude, -180 to 180");
    log_indented!("--at <rfc3339>       Evaluate at this instant instead of now");
    log_indented!("--provider <name>    live, solar or mock (overrides the config)");
    log_block_start!("Examples:");
    log_indented!("nighttemp get --lat 40.7128 --lng -74.0060");
    log_indented!("nighttemp get --lat 51.5 --lng -0.12 --at 2024-06-21T21:00:00Z --provider solar");
    log_end!();
}
