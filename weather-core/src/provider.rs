use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Location, RawWeatherPayload},
    units::UnitSystem,
};

pub mod openmeteo;

pub use openmeteo::OpenMeteoProvider;

/// Source of current conditions and daily forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch weather for `location` with values expressed in `units`.
    ///
    /// Only a failed request or a non-success status is an error here; checking
    /// that the payload holds what a report needs is left to
    /// [`assemble`](crate::assemble::assemble).
    async fn fetch_weather(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<RawWeatherPayload, WeatherError>;
}
