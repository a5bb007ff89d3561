use tracing::{debug, instrument};

use crate::{
    assemble::assemble,
    config::Config,
    error::WeatherError,
    geocoding::{Geocoder, OpenMeteoGeocoder},
    http::build_client,
    model::{Location, WeatherReport},
    provider::{OpenMeteoProvider, WeatherProvider},
    units::UnitSystem,
};

/// Resolve, fetch, assemble.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn Geocoder>, provider: Box<dyn WeatherProvider>) -> Self {
        Self { geocoder, provider }
    }

    /// Open-Meteo for both geocoding and forecasts, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let http = build_client(config.timeout())?;

        Ok(Self::new(
            Box::new(OpenMeteoGeocoder::new(http.clone())),
            Box::new(OpenMeteoProvider::new(http)),
        ))
    }

    /// Look up a place by name and load its weather. Any failure propagates unchanged.
    #[instrument(skip(self))]
    pub async fn search_and_load(
        &self,
        query: &str,
        units: UnitSystem,
    ) -> Result<WeatherReport, WeatherError> {
        let location = self.geocoder.resolve_by_name(query).await?;
        self.load(location, units).await
    }

    /// Load weather for a geolocation fix. Reverse geocoding cannot fail; the
    /// weather fetch still can.
    #[instrument(skip(self))]
    pub async fn locate_and_load(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<WeatherReport, WeatherError> {
        let location = self
            .geocoder
            .resolve_by_coordinates(latitude, longitude)
            .await;
        self.load(location, units).await
    }

    async fn load(
        &self,
        location: Location,
        units: UnitSystem,
    ) -> Result<WeatherReport, WeatherError> {
        let payload = self.provider.fetch_weather(&location, units).await?;
        let report = assemble(location, &payload)?;

        debug!(
            place = %report.location.display_name(),
            days = report.forecast.len(),
            "Assembled report"
        );
        Ok(report)
    }
}
