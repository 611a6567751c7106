//! Application service tying configuration, provider and engine together.
//!
//! One [`NightTemp`] is built at startup and shared read-only by every
//! request:
//!
//! ```no_run
//! use chrono::Utc;
//! use nighttemp::{Config, NightTemp, provider::Coordinates};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let app = NightTemp::new(Config::load()?)?;
//! let coords = Coordinates::new(40.7128, -74.006)?;
//! let evaluation = app.evaluate(coords, Utc::now()).await?;
//! println!("{}K", evaluation.temperature);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::engine::{Evaluation, TemperatureEngine};
use crate::error::NightTempError;
use crate::provider::{Coordinates, Provider, ProviderKind, SunPhaseProvider};

#[derive(Debug, Clone)]
pub struct NightTemp {
    config: Config,
    engine: TemperatureEngine,
    provider: Provider,
}

impl NightTemp {
    /// Build from configuration, using the provider it selects.
    pub fn new(config: Config) -> Result<Self> {
        let provider = Provider::from_config(&config)?;
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: Config, provider: Provider) -> Self {
        Self {
            engine: TemperatureEngine::from_config(&config),
            config,
            provider,
        }
    }

    /// Swap the provider for another kind, keeping the rest.
    pub fn using(self, kind: ProviderKind) -> Result<Self> {
        let provider = Provider::from_kind(kind, &self.config)?;
        Ok(Self::with_provider(self.config, provider))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &TemperatureEngine {
        &self.engine
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Fetch the sun phases for `coordinates` on the date of `now` and
    /// evaluate the temperature at `now`.
    pub async fn evaluate(
        &self,
        coordinates: Coordinates,
        now: DateTime<Utc>,
    ) -> Result<Evaluation, NightTempError> {
        let raw = self.provider.fetch(coordinates, now.date_naive()).await?;
        log_debug!(
            "{} phases: twilight {} sunrise {} sunset {} twilight {}",
            self.provider.name(),
            raw.morning_twilight,
            raw.sunrise,
            raw.sunset,
            raw.night_twilight
        );

        let evaluation = self.engine.evaluate(raw, now)?;
        log_debug!(
            "{}K at {} ({})",
            evaluation.temperature,
            now.format("%Y-%m-%d %H:%M:%S"),
            evaluation.region
        );
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Region;
    use crate::provider::MockProvider;
    use chrono::TimeZone;

    fn mock_app() -> NightTemp {
        NightTemp::with_provider(Config::default(), Provider::Mock(MockProvider))
    }

    #[tokio::test]
    async fn test_evaluate_with_mock_provider() {
        let app = mock_app();
        let coords = Coordinates::new(51.5, -0.12).unwrap();

        let noon = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let evaluation = app.evaluate(coords, noon).await.unwrap();
        assert_eq!(evaluation.temperature, 6000);
        assert_eq!(evaluation.region, Region::Midday);

        let dusk = Utc.with_ymd_and_hms(2024, 3, 20, 17, 45, 0).unwrap();
        let evaluation = app.evaluate(coords, dusk).await.unwrap();
        assert_eq!(evaluation.temperature, 5175);
        assert_eq!(evaluation.region, Region::EveningRamp);
    }

    #[test]
    fn test_using_switches_provider() {
        let app = mock_app().using(ProviderKind::Solar).unwrap();
        assert_eq!(app.provider().kind(), ProviderKind::Solar);
        assert_eq!(app.engine().day_temp(), 6000);
    }

    #[test]
    fn test_new_follows_config() {
        let config = Config {
            provider: Some(ProviderKind::Mock),
            day_temp: Some(6500),
            ..Config::default()
        };
        let app = NightTemp::new(config).unwrap();
        assert_eq!(app.provider().kind(), ProviderKind::Mock);
        assert_eq!(app.engine().day_temp(), 6500);
    }
}
