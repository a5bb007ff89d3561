use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
}

impl Location {
    /// Name used when reverse geocoding yields nothing.
    pub const FALLBACK_NAME: &'static str = "Your location";

    /// A location that only knows its coordinates.
    pub fn unnamed(latitude: f64, longitude: f64) -> Self {
        Self {
            name: Self::FALLBACK_NAME.to_string(),
            country: String::new(),
            latitude,
            longitude,
            timezone: None,
        }
    }

    /// "Paris, France", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    /// Falls back to `temperature` when the hourly series has no matching slot.
    pub apparent_temperature: f64,
    pub humidity: Option<f64>,
    pub wind_speed: f64,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub weather_code: i32,
}

/// Current conditions plus a chronological daily forecast for one location.
///
/// Values are in whatever unit system was requested at fetch time; the report
/// does not record which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecastEntry>,
}

/// Open-Meteo `/forecast` response, as received.
///
/// Every block and series is optional so that decoding never rejects a
/// response for its shape; the assembler decides what is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeatherPayload {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current_weather: Option<RawCurrentWeather>,
    #[serde(default)]
    pub hourly: Option<RawHourly>,
    #[serde(default)]
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCurrentWeather {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub weathercode: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHourly {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDaily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,
}
