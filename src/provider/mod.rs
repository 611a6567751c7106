//! Sun-times providers.
//!
//! A provider answers one question: for a position and a calendar date, at
//! what UTC times of day do civil twilight begin, the sun rise, the sun set
//! and civil twilight end. Three providers exist:
//!
//! - [`SunriseSunsetClient`]: the sunrise-sunset.org HTTP API
//! - [`SolarProvider`]: offline, computed with the `sunrise` crate
//! - [`MockProvider`]: fixed phases for the dev profile and tests
//!
//! [`Provider`] picks one from the configuration and forwards to it.

pub mod mock;
pub mod solar;
pub mod sunrise_sunset;

use chrono::NaiveDate;
use serde::Deserialize;
use std::future::Future;
use std::str::FromStr;

use crate::config::Config;
use crate::config::validation::validate_coordinates;
use crate::error::NightTempError;
use crate::phases::RawSunPhases;

pub use mock::MockProvider;
pub use solar::SolarProvider;
pub use sunrise_sunset::SunriseSunsetClient;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validate and build. Non-finite or out-of-range values are
    /// [`NightTempError::InvalidInput`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, NightTempError> {
        validate_coordinates(latitude, longitude)
            .map_err(|e| NightTempError::InvalidInput(e.to_string()))?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse the raw `lat`/`lng` strings of a request.
    pub fn parse(lat: Option<&str>, lng: Option<&str>) -> Result<Self, NightTempError> {
        let latitude = parse_coordinate("lat", lat)?;
        let longitude = parse_coordinate("lng", lng)?;
        Self::new(latitude, longitude)
    }
}

fn parse_coordinate(name: &str, raw: Option<&str>) -> Result<f64, NightTempError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NightTempError::InvalidInput(format!("missing '{name}' parameter")))?;

    raw.parse::<f64>()
        .map_err(|_| NightTempError::InvalidInput(format!("'{name}' must be a number, got '{raw}'")))
}

/// Which provider a configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Live,
    Solar,
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Live => "live",
            ProviderKind::Solar => "solar",
            ProviderKind::Mock => "mock",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(ProviderKind::Live),
            "solar" => Ok(ProviderKind::Solar),
            "mock" => Ok(ProviderKind::Mock),
            other => anyhow::bail!(
                "Unknown provider '{}' (expected 'live', 'solar' or 'mock')",
                other
            ),
        }
    }
}

/// Source of the four raw sun phases for a position and date.
pub trait SunPhaseProvider {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    fn fetch(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> impl Future<Output = Result<RawSunPhases, NightTempError>> + Send;
}

/// The provider chosen by configuration.
#[derive(Debug, Clone)]
pub enum Provider {
    Live(SunriseSunsetClient),
    Solar(SolarProvider),
    Mock(MockProvider),
}

impl Provider {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::from_kind(config.provider(), config)
    }

    /// Build a specific provider, taking endpoint settings from `config`.
    pub fn from_kind(kind: ProviderKind, config: &Config) -> anyhow::Result<Self> {
        Ok(match kind {
            ProviderKind::Live => Provider::Live(SunriseSunsetClient::new(
                config.api_base_url(),
                config.request_timeout(),
            )?),
            ProviderKind::Solar => Provider::Solar(SolarProvider),
            ProviderKind::Mock => Provider::Mock(MockProvider),
        })
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Live(_) => ProviderKind::Live,
            Provider::Solar(_) => ProviderKind::Solar,
            Provider::Mock(_) => ProviderKind::Mock,
        }
    }
}

impl SunPhaseProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::Live(p) => p.name(),
            Provider::Solar(p) => p.name(),
            Provider::Mock(p) => p.name(),
        }
    }

    async fn fetch(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<RawSunPhases, NightTempError> {
        match self {
            Provider::Live(p) => p.fetch(coordinates, date).await,
            Provider::Solar(p) => p.fetch(coordinates, date).await,
            Provider::Mock(p) => p.fetch(coordinates, date).await,
        }
    }
}
