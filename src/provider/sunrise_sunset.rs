//! Client for the sunrise-sunset.org JSON API.
//!
//! ```text
//! GET {base}?lat=40.7128&lng=-74.006&date=2024-03-20
//!
//! {"results": {"sunrise": "10:59:31 AM", "sunset": "11:09:02 PM",
//!              "civil_twilight_begin": "10:32:41 AM",
//!              "civil_twilight_end": "11:35:55 PM", ...},
//!  "status": "OK"}
//! ```
//!
//! Times come back in UTC as `h:mm:ss AM/PM`.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::{Coordinates, SunPhaseProvider};
use crate::error::NightTempError;
use crate::phases::RawSunPhases;

#[derive(Debug, Clone)]
pub struct SunriseSunsetClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    results: Value,
    status: String,
}

impl SunriseSunsetClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid provider URL '{}': {}", base_url, e))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client, base_url })
    }

    /// Request URL for a position and date.
    pub fn request_url(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<reqwest::Url, NightTempError> {
        let params = [
            ("lat", coordinates.latitude.to_string()),
            ("lng", coordinates.longitude.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
        ];
        reqwest::Url::parse_with_params(self.base_url.as_str(), &params)
            .map_err(|e| NightTempError::Provider(format!("cannot build request URL: {e}")))
    }
}

impl SunPhaseProvider for SunriseSunsetClient {
    fn name(&self) -> &'static str {
        "sunrise-sunset.org"
    }

    async fn fetch(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<RawSunPhases, NightTempError> {
        let url = self.request_url(coordinates, date)?;
        log_debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        decode_response(status, &body)
    }
}

/// Turn an HTTP status and body into raw phases.
///
/// Fails on a non-2xx status, a body that is not the expected JSON, an API
/// `status` other than `OK`, or missing and unparseable time fields.
pub fn decode_response(http_status: u16, body: &str) -> Result<RawSunPhases, NightTempError> {
    let parsed: Result<ApiResponse, _> = serde_json::from_str(body);

    if !(200..300).contains(&http_status) {
        let detail = parsed
            .map(|r| format!(" ({})", r.status))
            .unwrap_or_default();
        return Err(NightTempError::Provider(format!(
            "provider answered with HTTP {http_status}{detail}"
        )));
    }

    let response =
        parsed.map_err(|e| NightTempError::Provider(format!("malformed payload: {e}")))?;

    if response.status != "OK" {
        return Err(NightTempError::Provider(format!(
            "provider status '{}'",
            response.status
        )));
    }

    let Value::Object(results) = response.results else {
        return Err(NightTempError::Provider(
            "payload has no 'results' object".to_string(),
        ));
    };

    // Only string fields can hold times; day_length is numeric with formatted=0
    let fields: HashMap<String, String> = results
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect();

    RawSunPhases::from_fields(&fields)
}
