use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::Location};

pub mod openmeteo;

pub use openmeteo::OpenMeteoGeocoder;

/// Turns user input into a [`Location`].
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best match for a free-text place name.
    ///
    /// Fails with [`WeatherError::NotFound`] when nothing matches and with
    /// [`WeatherError::Transport`] when the lookup itself fails.
    async fn resolve_by_name(&self, query: &str) -> Result<Location, WeatherError>;

    /// Reverse lookup for a geolocation fix. Never fails: when the lookup is
    /// unavailable or finds nothing, returns [`Location::unnamed`].
    async fn resolve_by_coordinates(&self, latitude: f64, longitude: f64) -> Location;
}
