//! Color temperature engine.
//!
//! Classifies the evaluation instant against ordered [`SunPhases`] and
//! produces a Kelvin value:
//!
//! ```text
//!  night │ morning ramp │   midday   │ evening ramp │ night
//!   LO   │   LO -> HI   │     HI     │   HI -> LO   │  LO
//!     twilight        midday      midday        twilight
//!      begin          begin        end            end
//! ```
//!
//! Each ramp is linear; sunrise and sunset sit exactly halfway along it.


use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

use crate::common::utils::{duration_ratio, interpolate};
use crate::config::Config;
use crate::error::NightTempError;
use crate::phases::{RawSunPhases, SunPhases};

/// Where the evaluation instant falls in the daily cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Before morning twilight or after night twilight
    Night,
    /// From twilight start through sunrise up to the plateau
    MorningRamp,
    /// Strictly inside the midday plateau
    Midday,
    /// From the end of the plateau through sunset to twilight end
    EveningRamp,
    /// The phases could not be totally ordered; the fallback policy applied
    Unordered,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Night => "night",
            Region::MorningRamp => "morning ramp",
            Region::Midday => "midday",
            Region::EveningRamp => "evening ramp",
            Region::Unordered => "unordered",
        };
        f.write_str(name)
    }
}

/// What to output when the phases cannot be totally ordered, which happens
/// when a twilight lasts longer than half of the daylight it borders
/// (high latitudes around the solstices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Day temperature between sunrise and sunset, night temperature otherwise
    #[default]
    Daylight,
    /// Always the day temperature
    High,
    /// Always the night temperature
    Low,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::Daylight => "daylight",
            FallbackPolicy::High => "high",
            FallbackPolicy::Low => "low",
        }
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Rounded Kelvin value
    pub temperature: i64,
    pub region: Region,
    /// Ramp progress in `[0, 1]`, only set inside a ramp
    pub progress: Option<f64>,
    /// The normalized phases the value was computed from
    pub phases: SunPhases,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureEngine {
    day_temp: u32,
    night_temp: u32,
    fallback: FallbackPolicy,
}

impl TemperatureEngine {
    /// `day_temp` is expected to exceed `night_temp`; configuration
    /// validation enforces this.
    pub fn new(day_temp: u32, night_temp: u32) -> Self {
        Self {
            day_temp,
            night_temp,
            fallback: FallbackPolicy::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.day_temp(), config.night_temp()).with_fallback(config.fallback())
    }

    pub fn day_temp(&self) -> u32 {
        self.day_temp
    }

    pub fn night_temp(&self) -> u32 {
        self.night_temp
    }

    /// Normalize `raw` around `now` and compute the temperature.
    pub fn evaluate(
        &self,
        raw: RawSunPhases,
        now: DateTime<Utc>,
    ) -> Result<Evaluation, NightTempError> {
        let phases = SunPhases::prepare(raw, now)?;
        let (region, progress) = self.classify(&phases);
        let temperature = self.temperature_for(&phases, region, progress).round() as i64;

        Ok(Evaluation {
            temperature,
            region,
            progress,
            phases,
        })
    }

    /// Region of `phases.user_time` and, inside a ramp, the ramp progress.
    ///
    /// The plateau is checked first and is open; its boundary instants belong
    /// to the ramps.
    pub fn classify(&self, phases: &SunPhases) -> (Region, Option<f64>) {
        let (Some(midday_begin), Some(midday_end)) = (phases.midday_begin, phases.midday_end)
        else {
            return (Region::Unordered, None);
        };
        if !phases.is_ordered() {
            return (Region::Unordered, None);
        }

        let now = phases.user_time;
        if midday_begin < now && now < midday_end {
            return (Region::Midday, None);
        }

        if phases.morning_twilight <= now && now <= midday_begin {
            let progress = duration_ratio(
                now - phases.morning_twilight,
                phases.morning_twilight_duration() * 2,
            );
            return (Region::MorningRamp, Some(progress));
        }

        if midday_end <= now && now <= phases.night_twilight {
            let progress =
                duration_ratio(now - midday_end, phases.night_twilight_duration() * 2);
            return (Region::EveningRamp, Some(progress));
        }

        (Region::Night, None)
    }

    fn temperature_for(&self, phases: &SunPhases, region: Region, progress: Option<f64>) -> f64 {
        let (high, low) = (f64::from(self.day_temp), f64::from(self.night_temp));
        match region {
            Region::Midday => high,
            Region::Night => low,
            Region::MorningRamp => interpolate(low, high, progress.unwrap_or(0.0)),
            Region::EveningRamp => interpolate(high, low, progress.unwrap_or(0.0)),
            Region::Unordered => match self.fallback {
                FallbackPolicy::High => high,
                FallbackPolicy::Low => low,
                FallbackPolicy::Daylight => {
                    let now = phases.user_time;
                    if phases.sunrise <= now && now <= phases.sunset {
                        high
                    } else {
                        low
                    }
                }
            },
        }
    }
}
