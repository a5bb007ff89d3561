//! WMO weather interpretation codes, as reported by Open-Meteo.
//!
//! See <https://open-meteo.com/en/docs#weathervariables>.

/// Description and icon used for any code outside the table.
pub const UNKNOWN: (&str, &str) = ("Unknown", "❔");

/// Map a weather code to a human description and an icon glyph.
///
/// Total over all integers: codes the table does not know fall back to [`UNKNOWN`].
pub fn describe(code: i32) -> (&'static str, &'static str) {
    match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Moderate drizzle", "🌦️"),
        55 => ("Dense drizzle", "🌧️"),
        56 => ("Freezing drizzle", "🌧️"),
        57 => ("Dense freezing drizzle", "🌧️"),
        61 => ("Slight rain", "🌦️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "🌧️"),
        66 => ("Light freezing rain", "🌧️"),
        67 => ("Heavy freezing rain", "🌧️"),
        71 => ("Slight snow fall", "🌨️"),
        73 => ("Moderate snow fall", "🌨️"),
        75 => ("Heavy snow fall", "❄️"),
        77 => ("Snow grains", "❄️"),
        80 => ("Rain showers: slight", "🌦️"),
        81 => ("Rain showers: moderate", "🌧️"),
        82 => ("Rain showers: violent", "⛈️"),
        85 => ("Snow showers: slight", "🌨️"),
        86 => ("Snow showers: heavy", "❄️"),
        95 => ("Thunderstorm", "⛈️"),
        96 => ("Thunderstorm w/ slight hail", "⛈️"),
        99 => ("Thunderstorm w/ heavy hail", "⛈️"),
        _ => UNKNOWN,
    }
}
