use serde::Serialize;

use crate::{
    catalog::describe,
    model::{DailyForecastEntry, WeatherReport},
    units::{
        PLACEHOLDER, UnitSystem, format_degrees, format_humidity, format_temperature, format_wind,
    },
};

/// Display strings for a [`WeatherReport`].
///
/// `units` must be the system the report was fetched with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub place: String,
    pub coords: String,
    /// Three-decimal coordinates, for a details panel.
    pub latitude: String,
    pub longitude: String,
    pub timezone: String,
    pub current: CurrentView,
    pub days: Vec<DayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub icon: &'static str,
    pub description: &'static str,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub weekday: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub range: String,
}

impl ReportView {
    pub fn new(report: &WeatherReport, units: UnitSystem) -> Self {
        let loc = &report.location;
        let cur = &report.current;
        let (description, icon) = describe(cur.weather_code);

        Self {
            place: loc.display_name(),
            coords: format!("Lat {:.2}, Lon {:.2}", loc.latitude, loc.longitude),
            latitude: format!("{:.3}", loc.latitude),
            longitude: format!("{:.3}", loc.longitude),
            timezone: loc
                .timezone
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            current: CurrentView {
                icon,
                description,
                temperature: format_temperature(cur.temperature, units),
                feels_like: format_temperature(cur.apparent_temperature, units),
                humidity: format_humidity(cur.humidity),
                wind: format_wind(cur.wind_speed, units),
                updated: cur.timestamp.format("%a %-d %b %Y, %H:%M").to_string(),
            },
            days: report.forecast.iter().map(DayView::from).collect(),
        }
    }
}

impl From<&DailyForecastEntry> for DayView {
    fn from(day: &DailyForecastEntry) -> Self {
        let (description, icon) = describe(day.weather_code);
        Self {
            weekday: day.date.format("%a").to_string(),
            icon,
            description,
            range: format!(
                "{} / {}",
                format_degrees(day.min_temperature),
                format_degrees(day.max_temperature)
            ),
        }
    }
}
