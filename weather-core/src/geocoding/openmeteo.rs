use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{error::WeatherError, http::get_body, model::Location};

use super::Geocoder;

pub const DEFAULT_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1";

const SEARCH: &str = "Geocoding";
const REVERSE: &str = "Reverse geocoding";

/// Open-Meteo geocoding API client.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    base_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    /// Point the client at another server, e.g. a mock in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn reverse_lookup(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<GeoResult>, WeatherError> {
        let url = format!("{}/reverse", self.base_url);
        let body = get_body(
            &self.http,
            REVERSE,
            &url,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ],
        )
        .await?;

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(REVERSE, e.to_string()))?;

        Ok(parsed.results.unwrap_or_default().into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timezone: Option<String>,
}

impl From<GeoResult> for Location {
    fn from(r: GeoResult) -> Self {
        Location {
            name: r.name,
            country: r.country.unwrap_or_default(),
            latitude: r.latitude,
            longitude: r.longitude,
            timezone: r.timezone,
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn resolve_by_name(&self, query: &str) -> Result<Location, WeatherError> {
        let name = query.trim();
        if name.is_empty() {
            return Err(WeatherError::NotFound {
                query: query.to_string(),
            });
        }

        let url = format!("{}/search", self.base_url);
        let body = get_body(
            &self.http,
            SEARCH,
            &url,
            &[
                ("name", name.to_string()),
                ("count", "1".to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ],
        )
        .await?;

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(SEARCH, e.to_string()))?;

        let location: Location = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound {
                query: name.to_string(),
            })?
            .into();

        debug!(
            name = %location.name,
            lat = location.latitude,
            lon = location.longitude,
            "Resolved place name"
        );
        Ok(location)
    }

    #[instrument(skip(self))]
    async fn resolve_by_coordinates(&self, latitude: f64, longitude: f64) -> Location {
        match self.reverse_lookup(latitude, longitude).await {
            // Keep the caller's fix; the reverse match is only the nearest named place.
            Ok(Some(result)) => Location {
                latitude,
                longitude,
                ..Location::from(result)
            },
            Ok(None) => {
                debug!("Reverse geocoding found nothing, using generic name");
                Location::unnamed(latitude, longitude)
            }
            Err(e) => {
                debug!(error = %e, "Reverse geocoding failed, using generic name");
                Location::unnamed(latitude, longitude)
            }
        }
    }
}
