//! Joins a resolved location and a raw forecast payload into a [`WeatherReport`].
//!
//! Open-Meteo reports "current" and "hourly" as separate series; apparent
//! temperature and humidity only exist hourly, so they are looked up at the
//! hourly slot whose time key equals the current snapshot's. A miss is normal
//! near series boundaries and degrades instead of failing.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    error::WeatherError,
    model::{
        CurrentConditions, DailyForecastEntry, Location, RawDaily, RawHourly, RawWeatherPayload,
        WeatherReport,
    },
};

const ENDPOINT: &str = "Weather";

pub fn assemble(
    location: Location,
    payload: &RawWeatherPayload,
) -> Result<WeatherReport, WeatherError> {
    let current = current_conditions(payload)?;
    let forecast = daily_forecast(payload.daily.as_ref())?;

    let timezone = location.timezone.or_else(|| payload.timezone.clone());

    Ok(WeatherReport {
        location: Location {
            timezone,
            ..location
        },
        current,
        forecast,
    })
}

fn current_conditions(payload: &RawWeatherPayload) -> Result<CurrentConditions, WeatherError> {
    let cw = payload
        .current_weather
        .as_ref()
        .ok_or_else(|| missing("current_weather"))?;

    let time = cw.time.as_deref().ok_or_else(|| missing("current_weather.time"))?;
    let temperature = cw
        .temperature
        .ok_or_else(|| missing("current_weather.temperature"))?;
    let wind_speed = cw
        .windspeed
        .ok_or_else(|| missing("current_weather.windspeed"))?;
    let weather_code = cw
        .weathercode
        .ok_or_else(|| missing("current_weather.weathercode"))?;

    let slot = payload.hourly.as_ref().and_then(|h| hourly_slot(h, time));
    let apparent_temperature = slot
        .and_then(|(h, i)| h.apparent_temperature.get(i).copied().flatten())
        .unwrap_or(temperature);
    let humidity = slot.and_then(|(h, i)| h.relative_humidity_2m.get(i).copied().flatten());

    Ok(CurrentConditions {
        timestamp: parse_timestamp(time)?,
        temperature,
        apparent_temperature,
        humidity,
        wind_speed,
        weather_code,
    })
}

/// Index of the hourly entry whose time key is exactly `time`.
fn hourly_slot<'a>(hourly: &'a RawHourly, time: &str) -> Option<(&'a RawHourly, usize)> {
    hourly
        .time
        .iter()
        .position(|t| t == time)
        .map(|i| (hourly, i))
}

fn daily_forecast(daily: Option<&RawDaily>) -> Result<Vec<DailyForecastEntry>, WeatherError> {
    let daily = daily.ok_or_else(|| missing("daily"))?;

    let days = daily.time.len();
    for (series, len) in [
        ("temperature_2m_min", daily.temperature_2m_min.len()),
        ("temperature_2m_max", daily.temperature_2m_max.len()),
        ("weathercode", daily.weathercode.len()),
    ] {
        if len != days {
            return Err(WeatherError::malformed(
                ENDPOINT,
                format!("daily.{series} has {len} values but daily.time has {days}"),
            ));
        }
    }

    daily
        .time
        .iter()
        .zip(&daily.temperature_2m_min)
        .zip(&daily.temperature_2m_max)
        .zip(&daily.weathercode)
        .enumerate()
        .map(|(i, (((date, min), max), code))| {
            Ok::<_, WeatherError>(DailyForecastEntry {
                date: parse_date(date)?,
                min_temperature: min.ok_or_else(|| null_at("temperature_2m_min", i))?,
                max_temperature: max.ok_or_else(|| null_at("temperature_2m_max", i))?,
                weather_code: code.ok_or_else(|| null_at("weathercode", i))?,
            })
        })
        .collect()
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::malformed(ENDPOINT, format!("invalid timestamp '{s}': {e}")))
}

fn parse_date(s: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| WeatherError::malformed(ENDPOINT, format!("invalid date '{s}': {e}")))
}

fn missing(field: &str) -> WeatherError {
    WeatherError::malformed(ENDPOINT, format!("missing {field}"))
}

fn null_at(series: &str, index: usize) -> WeatherError {
    WeatherError::malformed(ENDPOINT, format!("daily.{series}[{index}] is null"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawCurrentWeather;

    fn paris() -> Location {
        Location {
            name: "Paris".into(),
            country: "France".into(),
            latitude: 48.85,
            longitude: 2.35,
            timezone: None,
        }
    }

    fn payload(current_time: &str) -> RawWeatherPayload {
        RawWeatherPayload {
            timezone: Some("Europe/Paris".into()),
            current_weather: Some(RawCurrentWeather {
                time: Some(current_time.into()),
                temperature: Some(18.0),
                windspeed: Some(10.0),
                weathercode: Some(3),
            }),
            hourly: Some(RawHourly {
                time: vec![
                    "2024-05-01T10:00".into(),
                    "2024-05-01T11:00".into(),
                    "2024-05-01T12:00".into(),
                ],
                apparent_temperature: vec![Some(15.0), Some(16.0), Some(17.0)],
                relative_humidity_2m: vec![Some(70.0), Some(65.0), Some(60.0)],
                ..Default::default()
            }),
            daily: Some(RawDaily {
                time: vec!["2024-05-01".into(), "2024-05-02".into(), "2024-05-03".into()],
                temperature_2m_min: vec![Some(9.0), Some(11.0), Some(8.5)],
                temperature_2m_max: vec![Some(19.0), Some(22.0), Some(17.5)],
                weathercode: vec![Some(3), Some(61), Some(0)],
            }),
        }
    }

    #[test]
    fn current_joins_hourly_on_exact_time() {
        let report = assemble(paris(), &payload("2024-05-01T12:00")).unwrap();

        assert_eq!(report.current.temperature, 18.0);
        assert_eq!(report.current.apparent_temperature, 17.0);
        assert_eq!(report.current.humidity, Some(60.0));
        assert_eq!(report.current.wind_speed, 10.0);
        assert_eq!(report.current.weather_code, 3);
        assert_eq!(
            report.current.timestamp,
            NaiveDateTime::parse_from_str("2024-05-01T12:00", "%Y-%m-%dT%H:%M").unwrap()
        );
    }

    #[test]
    fn missed_slot_falls_back() {
        let report = assemble(paris(), &payload("2024-05-01T12:15")).unwrap();

        assert_eq!(report.current.apparent_temperature, 18.0);
        assert_eq!(report.current.humidity, None);
    }

    #[test]
    fn null_hourly_values_fall_back() {
        let mut p = payload("2024-05-01T12:00");
        if let Some(h) = p.hourly.as_mut() {
            h.apparent_temperature[2] = None;
            h.relative_humidity_2m.truncate(1);
        }

        let report = assemble(paris(), &p).unwrap();
        assert_eq!(report.current.apparent_temperature, 18.0);
        assert_eq!(report.current.humidity, None);
    }

    #[test]
    fn absent_hourly_block_falls_back() {
        let mut p = payload("2024-05-01T12:00");
        p.hourly = None;

        let report = assemble(paris(), &p).unwrap();
        assert_eq!(report.current.apparent_temperature, 18.0);
        assert_eq!(report.current.humidity, None);
    }

    #[test]
    fn forecast_keeps_source_order() {
        let report = assemble(paris(), &payload("2024-05-01T12:00")).unwrap();

        assert_eq!(report.forecast.len(), 3);
        let dates: Vec<_> = report.forecast.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2024-05-01", "2024-05-02", "2024-05-03"]);

        assert_eq!(report.forecast[1].min_temperature, 11.0);
        assert_eq!(report.forecast[1].max_temperature, 22.0);
        assert_eq!(report.forecast[1].weather_code, 61);
        assert_eq!(report.forecast[2].min_temperature, 8.5);
    }

    #[test]
    fn unequal_daily_series_are_rejected() {
        let mut p = payload("2024-05-01T12:00");
        if let Some(d) = p.daily.as_mut() {
            d.weathercode.pop();
        }

        let err = assemble(paris(), &p).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload { .. }));
        assert!(err.to_string().contains("daily.weathercode has 2 values"));
    }

    #[test]
    fn missing_current_block_is_malformed() {
        let mut p = payload("2024-05-01T12:00");
        p.current_weather = None;

        let err = assemble(paris(), &p).unwrap_err();
        assert!(err.to_string().contains("missing current_weather"));
    }

    #[test]
    fn timezone_prefers_location_then_payload() {
        let report = assemble(paris(), &payload("2024-05-01T12:00")).unwrap();
        assert_eq!(report.location.timezone.as_deref(), Some("Europe/Paris"));

        let mut loc = paris();
        loc.timezone = Some("Europe/Berlin".into());
        let report = assemble(loc, &payload("2024-05-01T12:00")).unwrap();
        assert_eq!(report.location.timezone.as_deref(), Some("Europe/Berlin"));

        let mut p = payload("2024-05-01T12:00");
        p.timezone = None;
        let report = assemble(paris(), &p).unwrap();
        assert_eq!(report.location.timezone, None);
    }

    #[test]
    fn location_is_carried_through() {
        let report = assemble(paris(), &payload("2024-05-01T12:00")).unwrap();
        assert_eq!(report.location.name, "Paris");
        assert_eq!(report.location.latitude, 48.85);
    }
}
