//! # nighttemp
//!
//! Library behind the `nighttemp` binary: turns a position and an instant
//! into a display color temperature that follows the sun.
//!
//! ## Architecture
//!
//! - **Phases**: `phases` reconstructs date-qualified sunrise, sunset and
//!   civil twilight instants around "now", plus the midday plateau
//! - **Engine**: `engine` classifies "now" and interpolates the Kelvin value
//! - **Providers**: `provider` fetches the raw phases (HTTP API, offline
//!   solar model, fixed mock)
//! - **Service**: `NightTemp` ties config, provider and engine together;
//!   `server` exposes it over HTTP
//! - **Infrastructure**: `config`, `args`, `commands`, structured logging in
//!   `common::logger`

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

pub mod args;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod phases;
pub mod provider;
pub mod server;

mod nighttemp;

pub use config::Config;
pub use engine::{Evaluation, FallbackPolicy, Region, TemperatureEngine};
pub use error::NightTempError;
pub use nighttemp::NightTemp;
pub use phases::{RawSunPhases, SunPhases};
