//! Error taxonomy for a single temperature evaluation.
//!
//! Application plumbing (configuration, CLI, server start-up) uses
//! `anyhow::Result`. This enum exists only at the boundary where a caller has
//! to branch on the kind of failure, e.g. to pick an HTTP status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NightTempError {
    /// Missing, non-numeric or out-of-range coordinates. Raised before any
    /// provider call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The sun-times provider could not deliver four parseable phases.
    #[error("sun-times provider error: {0}")]
    Provider(String),

    /// Date arithmetic failed while normalizing or interpolating.
    #[error("computation error: {0}")]
    Computation(String),
}

impl NightTempError {
    /// HTTP status code the route answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            NightTempError::InvalidInput(_) => 400,
            NightTempError::Provider(_) => 502,
            NightTempError::Computation(_) => 500,
        }
    }
}

impl From<reqwest::Error> for NightTempError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NightTempError::Provider("request timed out".to_string())
        } else if let Some(status) = err.status() {
            NightTempError::Provider(format!("provider answered with HTTP {status}"))
        } else if err.is_decode() {
            NightTempError::Provider(format!("malformed payload: {err}"))
        } else {
            NightTempError::Provider(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NightTempError::InvalidInput("lat".into()).status_code(), 400);
        assert_eq!(NightTempError::Provider("down".into()).status_code(), 502);
        assert_eq!(NightTempError::Computation("overflow".into()).status_code(), 500);
    }

    #[test]
    fn test_display() {
        let err = NightTempError::InvalidInput("latitude must be between -90 and 90".into());
        assert_eq!(
            err.to_string(),
            "invalid input: latitude must be between -90 and 90"
        );
    }
}
