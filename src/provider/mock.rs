//! Fixed sun phases for the dev profile and tests: an equinox-like day with
//! half-hour twilights, identical for every position and date.

use chrono::{NaiveDate, NaiveTime};

use super::{Coordinates, SunPhaseProvider};
use crate::common::constants::*;
use crate::error::NightTempError;
use crate::phases::RawSunPhases;

#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn phases() -> Result<RawSunPhases, NightTempError> {
        Ok(RawSunPhases::new(
            time_of_day(MOCK_TWILIGHT_BEGIN)?,
            time_of_day(MOCK_SUNRISE)?,
            time_of_day(MOCK_SUNSET)?,
            time_of_day(MOCK_TWILIGHT_END)?,
        ))
    }
}

fn time_of_day((hour, minute): (u32, u32)) -> Result<NaiveTime, NightTempError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| NightTempError::Provider(format!("invalid mock time {hour}:{minute}")))
}

impl SunPhaseProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(
        &self,
        _coordinates: Coordinates,
        _date: NaiveDate,
    ) -> Result<RawSunPhases, NightTempError> {
        Self::phases()
    }
}
