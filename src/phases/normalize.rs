//! Midnight-boundary correction for anchored sun phases.
//!
//! All four phases start out on the calendar day of the evaluation instant.
//! When the daily cycle crosses midnight (common in UTC far from Greenwich)
//! some of them really belong to the next day. The cycle has a fixed order,
//! `morning_twilight → sunrise → sunset → night_twilight`, so a single pass
//! that pushes every point past its predecessor recovers the dates.

use chrono::{DateTime, Utc};

use super::{SunPhases, next_day};
use crate::error::NightTempError;

/// Unwrap the phase cycle and place the evaluation instant on it.
///
/// Afterwards `morning_twilight ≤ sunrise ≤ sunset ≤ night_twilight` holds and
/// `user_time` has been moved to the next day if it lies in the post-midnight
/// part of a cycle that began the previous evening.
pub fn normalize(phases: &mut SunPhases) -> Result<(), NightTempError> {
    let mut previous = phases.morning_twilight;
    for point in [
        &mut phases.sunrise,
        &mut phases.sunset,
        &mut phases.night_twilight,
    ] {
        *point = unwrap_after(*point, previous)?;
        previous = *point;
    }

    phases.user_time = place_on_cycle(phases)?;
    Ok(())
}

/// Advance `point` one day at a time until it no longer precedes `previous`.
fn unwrap_after(
    mut point: DateTime<Utc>,
    previous: DateTime<Utc>,
) -> Result<DateTime<Utc>, NightTempError> {
    while point < previous {
        point = next_day(point)?;
    }
    Ok(point)
}

/// The evaluation instant shares the calendar day of `morning_twilight`. If it
/// precedes the cycle but its next-day twin falls inside it, the cycle started
/// yesterday evening and "now" is the twin.
fn place_on_cycle(phases: &SunPhases) -> Result<DateTime<Utc>, NightTempError> {
    let now = phases.user_time;
    if now >= phases.morning_twilight {
        return Ok(now);
    }

    let tomorrow = next_day(now)?;
    if tomorrow <= phases.night_twilight {
        Ok(tomorrow)
    } else {
        Ok(now)
    }
}
