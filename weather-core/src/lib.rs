//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Place lookup by name or coordinates (Open-Meteo geocoding)
//! - Current and daily weather fetching in a chosen unit system
//! - Assembly of the raw payload into a [`WeatherReport`] and its display strings
//! - Session state for interactive front ends (unit toggling, stale-result guard)
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod assemble;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod model;
pub mod provider;
pub mod service;
pub mod session;
pub mod units;
pub mod view;

pub use assemble::assemble;
pub use catalog::describe;
pub use config::Config;
pub use error::WeatherError;
pub use geocoding::{Geocoder, OpenMeteoGeocoder};
pub use model::{CurrentConditions, DailyForecastEntry, Location, RawWeatherPayload, WeatherReport};
pub use provider::{OpenMeteoProvider, WeatherProvider};
pub use service::WeatherService;
pub use session::{LoadOutcome, Place, Session};
pub use units::{UnitSystem, format_temperature, format_wind};
pub use view::ReportView;
