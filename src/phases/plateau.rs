//! Midday plateau boundaries.
//!
//! The warm-up ramp is symmetric around sunrise: it takes as long to go from
//! sunrise to full daylight as from twilight start to sunrise. The evening
//! side mirrors the same idea around sunset.

use super::{SunPhases, next_day};
use crate::error::NightTempError;

/// Fill in `midday_begin` and `midday_end` on normalized phases.
pub fn compute_plateau(phases: &mut SunPhases) -> Result<(), NightTempError> {
    let mut midday_begin = phases.sunrise + phases.morning_twilight_duration();
    let mut midday_end = phases.sunset - phases.night_twilight_duration();

    if midday_begin < phases.sunrise || midday_begin < phases.morning_twilight {
        midday_begin = next_day(midday_begin)?;
    }
    if midday_end < midday_begin {
        midday_end = next_day(midday_end)?;
    }

    phases.midday_begin = Some(midday_begin);
    phases.midday_end = Some(midday_end);
    Ok(())
}
