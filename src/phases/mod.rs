//! Sun phases for a single evaluation.
//!
//! Providers report sunrise, sunset and the two civil twilight boundaries as
//! bare times of day. This module turns them into a totally ordered set of
//! UTC instants around the evaluation time:
//!
//! ```text
//! morning_twilight ≤ sunrise ≤ midday_begin ≤ midday_end ≤ sunset ≤ night_twilight
//! ```
//!
//! The pipeline is `RawSunPhases` → [`SunPhases::anchor`] → [`normalize`] →
//! [`plateau::compute_plateau`]. [`SunPhases::prepare`] runs all three.
//! A `SunPhases` value lives for exactly one evaluation and is then dropped.

pub mod normalize;
pub mod plateau;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use std::collections::HashMap;

use crate::common::constants::{KEY_SUNRISE, KEY_SUNSET, KEY_TWILIGHT_BEGIN, KEY_TWILIGHT_END};
use crate::common::utils::parse_time_of_day;
use crate::error::NightTempError;

pub use normalize::normalize;
pub use plateau::compute_plateau;

/// The four phases exactly as a provider reports them: times of day, no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSunPhases {
    /// Start of morning civil twilight (`civil_twilight_begin`)
    pub morning_twilight: NaiveTime,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    /// End of evening civil twilight (`civil_twilight_end`)
    pub night_twilight: NaiveTime,
}

impl RawSunPhases {
    pub fn new(
        morning_twilight: NaiveTime,
        sunrise: NaiveTime,
        sunset: NaiveTime,
        night_twilight: NaiveTime,
    ) -> Self {
        Self {
            morning_twilight,
            sunrise,
            sunset,
            night_twilight,
        }
    }

    /// Build from the provider's string fields (`sunrise`, `sunset`,
    /// `civil_twilight_begin`, `civil_twilight_end`).
    ///
    /// A missing key or an unparseable value is a provider error: the payload
    /// did not hold what the provider promised.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, NightTempError> {
        let field = |key: &str| -> Result<NaiveTime, NightTempError> {
            let raw = fields
                .get(key)
                .ok_or_else(|| NightTempError::Provider(format!("missing key '{key}'")))?;
            parse_time_of_day(raw).ok_or_else(|| {
                NightTempError::Provider(format!("unparseable time '{raw}' for key '{key}'"))
            })
        };

        Ok(Self {
            morning_twilight: field(KEY_TWILIGHT_BEGIN)?,
            sunrise: field(KEY_SUNRISE)?,
            sunset: field(KEY_SUNSET)?,
            night_twilight: field(KEY_TWILIGHT_END)?,
        })
    }
}

/// Date-qualified sun phases plus the evaluation instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunPhases {
    pub morning_twilight: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub night_twilight: DateTime<Utc>,
    /// Start of the full-daylight plateau, `None` until computed
    pub midday_begin: Option<DateTime<Utc>>,
    /// End of the full-daylight plateau, `None` until computed
    pub midday_end: Option<DateTime<Utc>>,
    /// The instant being evaluated
    pub user_time: DateTime<Utc>,
}

impl SunPhases {
    /// Place every raw phase on the calendar day of `now`, without any
    /// midnight correction.
    pub fn anchor(raw: RawSunPhases, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let on_today = |time: NaiveTime| today.and_time(time).and_utc();

        Self {
            morning_twilight: on_today(raw.morning_twilight),
            sunrise: on_today(raw.sunrise),
            sunset: on_today(raw.sunset),
            night_twilight: on_today(raw.night_twilight),
            midday_begin: None,
            midday_end: None,
            user_time: now,
        }
    }

    /// Anchor, normalize and compute the plateau in one step.
    pub fn prepare(raw: RawSunPhases, now: DateTime<Utc>) -> Result<Self, NightTempError> {
        let mut phases = Self::anchor(raw, now);
        normalize(&mut phases)?;
        compute_plateau(&mut phases)?;
        Ok(phases)
    }

    /// Whether the full six-instant order holds. False until the plateau has
    /// been computed.
    pub fn is_ordered(&self) -> bool {
        let (Some(midday_begin), Some(midday_end)) = (self.midday_begin, self.midday_end) else {
            return false;
        };

        self.morning_twilight <= self.sunrise
            && self.sunrise <= midday_begin
            && midday_begin <= midday_end
            && midday_end <= self.sunset
            && self.sunset <= self.night_twilight
    }

    /// Duration of the morning civil twilight (twilight start to sunrise).
    pub fn morning_twilight_duration(&self) -> Duration {
        self.sunrise - self.morning_twilight
    }

    /// Duration of the evening civil twilight (sunset to twilight end).
    pub fn night_twilight_duration(&self) -> Duration {
        self.night_twilight - self.sunset
    }
}

/// Advance an instant by exactly one day.
pub(crate) fn next_day(instant: DateTime<Utc>) -> Result<DateTime<Utc>, NightTempError> {
    instant
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| NightTempError::Computation(format!("cannot advance {instant} by a day")))
}
