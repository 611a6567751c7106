//! Offline provider computing civil twilight, sunrise and sunset with the
//! `sunrise` crate.
//!
//! Near the poles some of these events do not happen on a given date (polar
//! day or polar night). The crate still returns an instant, but it lands far
//! from the requested date or out of order, so results are checked before
//! being handed on.

use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{DawnType, SolarDay, SolarEvent};

use super::{Coordinates, SunPhaseProvider};
use crate::error::NightTempError;
use crate::phases::RawSunPhases;

#[derive(Debug, Clone, Copy, Default)]
pub struct SolarProvider;

impl SolarProvider {
    /// Compute the phases synchronously.
    pub fn compute(
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<RawSunPhases, NightTempError> {
        let coord = sunrise::Coordinates::new(coordinates.latitude, coordinates.longitude)
            .ok_or_else(|| {
                NightTempError::InvalidInput(format!(
                    "coordinates {:.4}, {:.4} rejected by solar model",
                    coordinates.latitude, coordinates.longitude
                ))
            })?;

        let solar_day = SolarDay::new(coord, date);
        let events = SolarEvents {
            dawn: solar_day.event_time(SolarEvent::Dawn(DawnType::Civil)),
            sunrise: solar_day.event_time(SolarEvent::Sunrise),
            sunset: solar_day.event_time(SolarEvent::Sunset),
            dusk: solar_day.event_time(SolarEvent::Dusk(DawnType::Civil)),
        };

        log_debug!(
            "Solar events for {}: dawn {} sunrise {} sunset {} dusk {}",
            date,
            events.dawn.format("%m-%d %H:%M:%S"),
            events.sunrise.format("%m-%d %H:%M:%S"),
            events.sunset.format("%m-%d %H:%M:%S"),
            events.dusk.format("%m-%d %H:%M:%S")
        );

        events.check(date)?;
        Ok(events.into_raw())
    }
}

impl SunPhaseProvider for SolarProvider {
    fn name(&self) -> &'static str {
        "solar"
    }

    async fn fetch(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<RawSunPhases, NightTempError> {
        Self::compute(coordinates, date)
    }
}

/// The four solar events of one day as full instants.
#[derive(Debug, Clone, Copy)]
struct SolarEvents {
    dawn: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    dusk: DateTime<Utc>,
}

impl SolarEvents {
    /// Reject events that cannot describe a real day at `date`.
    fn check(&self, date: NaiveDate) -> Result<(), NightTempError> {
        let named = [
            ("civil dawn", self.dawn),
            ("sunrise", self.sunrise),
            ("sunset", self.sunset),
            ("civil dusk", self.dusk),
        ];

        // Local solar days span at most a day either side of the UTC date
        for (name, instant) in named {
            let offset = (instant.date_naive() - date).num_days().abs();
            if offset > 1 {
                return Err(NightTempError::Provider(format!(
                    "no {name} on {date} at this latitude (polar day or night)"
                )));
            }
        }

        let ordered = self.dawn <= self.sunrise
            && self.sunrise < self.sunset
            && self.sunset <= self.dusk
            && self.dusk - self.dawn < chrono::Duration::days(1);
        if !ordered {
            return Err(NightTempError::Provider(format!(
                "solar events on {date} are out of order (polar day or night)"
            )));
        }

        Ok(())
    }

    fn into_raw(self) -> RawSunPhases {
        RawSunPhases::new(
            self.dawn.time(),
            self.sunrise.time(),
            self.sunset.time(),
            self.dusk.time(),
        )
    }
}
