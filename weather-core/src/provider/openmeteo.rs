use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::{
    error::WeatherError,
    http::get_body,
    model::{Location, RawWeatherPayload},
    units::UnitSystem,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

const ENDPOINT: &str = "Weather";

const HOURLY: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weathercode,wind_speed_10m";
const DAILY: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Open-Meteo forecast API client.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(http: Client) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn query(location: &Location, units: UnitSystem) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", HOURLY.to_string()),
            ("daily", DAILY.to_string()),
            ("timezone", "auto".to_string()),
            ("temperature_unit", units.temperature_param().to_string()),
            ("wind_speed_unit", units.wind_param().to_string()),
        ]
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    async fn fetch_weather(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<RawWeatherPayload, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let body = get_body(&self.http, ENDPOINT, &url, &Self::query(location, units)).await?;

        serde_json::from_str(&body).map_err(|e| WeatherError::malformed(ENDPOINT, e.to_string()))
    }
}
