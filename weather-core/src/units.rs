use std::fmt;

/// Shown wherever a value is missing or cannot be rendered.
pub const PLACEHOLDER: &str = "—";

/// Paired temperature and wind-speed convention.
///
/// The two axes always move together: metric is Celsius with km/h,
/// imperial is Fahrenheit with mph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Value of Open-Meteo's `temperature_unit` parameter.
    pub fn temperature_param(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "celsius",
            UnitSystem::Imperial => "fahrenheit",
        }
    }

    /// Value of Open-Meteo's `wind_speed_unit` parameter.
    pub fn wind_param(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kmh",
            UnitSystem::Imperial => "mph",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "metric" | "c" | "celsius" => Ok(UnitSystem::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::try_from(s)
    }
}

/// Round to the nearest integer, half away from zero. `None` for NaN and infinities.
fn rounded(value: f64) -> Option<i64> {
    // Casting folds -0.0 into 0.
    value.is_finite().then(|| value.round() as i64)
}

/// `20.4` -> `"20°C"` (metric) or `"20°F"` (imperial).
pub fn format_temperature(value: f64, system: UnitSystem) -> String {
    match rounded(value) {
        Some(v) => format!("{v}{}", system.temperature_suffix()),
        None => PLACEHOLDER.to_string(),
    }
}

/// `15.2` -> `"15 km/h"` (metric) or `"15 mph"` (imperial).
pub fn format_wind(value: f64, system: UnitSystem) -> String {
    match rounded(value) {
        Some(v) => format!("{v} {}", system.wind_suffix()),
        None => PLACEHOLDER.to_string(),
    }
}

/// Unit-less degrees, used for forecast min/max.
pub fn format_degrees(value: f64) -> String {
    match rounded(value) {
        Some(v) => format!("{v}°"),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_humidity(value: Option<f64>) -> String {
    match value.and_then(rounded) {
        Some(v) => format!("{v}%"),
        None => PLACEHOLDER.to_string(),
    }
}
