//! Configuration validation functionality.
//!
//! Rejects values the engine or the server cannot work with. Error messages
//! name the field and its allowed range.

use anyhow::Result;
use std::net::IpAddr;

use super::Config;
use crate::common::constants::*;

/// Validate every field that is set. Unset fields take defaults later.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(temp) = config.day_temp
        && !(MINIMUM_TEMP..=MAXIMUM_TEMP).contains(&temp)
    {
        anyhow::bail!(
            "day_temp ({}) must be between {} and {} Kelvin",
            temp,
            MINIMUM_TEMP,
            MAXIMUM_TEMP
        );
    }

    if let Some(temp) = config.night_temp
        && !(MINIMUM_TEMP..=MAXIMUM_TEMP).contains(&temp)
    {
        anyhow::bail!(
            "night_temp ({}) must be between {} and {} Kelvin",
            temp,
            MINIMUM_TEMP,
            MAXIMUM_TEMP
        );
    }

    // The ramps run from night to day temperature, so the order matters
    let (day_temp, night_temp) = (config.day_temp(), config.night_temp());
    if day_temp <= night_temp {
        anyhow::bail!(
            "day_temp ({}K) must be greater than night_temp ({}K)",
            day_temp,
            night_temp
        );
    }

    if let Some(timeout) = config.request_timeout
        && !(MINIMUM_REQUEST_TIMEOUT..=MAXIMUM_REQUEST_TIMEOUT).contains(&timeout)
    {
        anyhow::bail!(
            "request_timeout ({} seconds) must be between {} and {} seconds",
            timeout,
            MINIMUM_REQUEST_TIMEOUT,
            MAXIMUM_REQUEST_TIMEOUT
        );
    }

    if let Some(url) = config.api_base_url.as_deref() {
        validate_api_base_url(url)?;
    }

    if let Some(bind) = config.bind.as_deref()
        && bind.parse::<IpAddr>().is_err()
    {
        anyhow::bail!("bind ({}) must be an IP address such as 127.0.0.1", bind);
    }

    Ok(())
}

fn validate_api_base_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| anyhow::anyhow!("api_base_url ({}) is not a valid URL: {}", url, e))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!(
            "api_base_url ({}) must use http or https, not '{}'",
            url,
            parsed.scheme()
        );
    }
    Ok(())
}

/// Validate coordinates received from a caller.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&latitude) {
        anyhow::bail!(
            "latitude must be between {} and {} degrees (got {})",
            MINIMUM_LATITUDE,
            MAXIMUM_LATITUDE,
            latitude
        );
    }

    if !longitude.is_finite() || !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&longitude) {
        anyhow::bail!(
            "longitude must be between {} and {} degrees (got {})",
            MINIMUM_LONGITUDE,
            MAXIMUM_LONGITUDE,
            longitude
        );
    }

    Ok(())
}
