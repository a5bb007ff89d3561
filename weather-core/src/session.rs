//! State kept by an interactive front end between user actions.
//!
//! Each action starts one pipeline and takes a generation ticket. Pipelines may
//! overlap; only the one holding the newest ticket gets to report its result,
//! older ones come back as [`LoadOutcome::Superseded`].

use parking_lot::Mutex;
use tracing::debug;

use crate::{
    error::WeatherError, model::WeatherReport, service::WeatherService, units::UnitSystem,
};

/// What the last successful load was for, so a unit change can repeat it.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    Query(String),
    Coordinates { latitude: f64, longitude: f64 },
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// The newest pipeline finished. `units` is the system the report is in.
    Loaded {
        report: WeatherReport,
        units: UnitSystem,
    },
    /// A newer action started while this one was in flight; its result was dropped.
    Superseded,
    /// Units changed but nothing has been loaded yet.
    Idle,
    /// The requested units were already active.
    Unchanged,
}

#[derive(Debug, Default)]
struct State {
    units: UnitSystem,
    last_place: Option<Place>,
    /// Place of the newest pipeline, until it finishes.
    pending: Option<Place>,
    generation: u64,
}

#[derive(Debug)]
pub struct Session {
    service: WeatherService,
    state: Mutex<State>,
}

impl Session {
    pub fn new(service: WeatherService, units: UnitSystem) -> Self {
        Self {
            service,
            state: Mutex::new(State {
                units,
                ..State::default()
            }),
        }
    }

    pub fn units(&self) -> UnitSystem {
        self.state.lock().units
    }

    pub fn last_place(&self) -> Option<Place> {
        self.state.lock().last_place.clone()
    }

    pub async fn search(&self, query: &str) -> Result<LoadOutcome, WeatherError> {
        self.load(Place::Query(query.trim().to_string())).await
    }

    pub async fn locate(&self, latitude: f64, longitude: f64) -> Result<LoadOutcome, WeatherError> {
        self.load(Place::Coordinates {
            latitude,
            longitude,
        })
        .await
    }

    /// Switch unit systems and reload the current place in the new units.
    ///
    /// The current place is the one still loading, if any, else the last one
    /// loaded. Reloading an in-flight place supersedes it, so a report in the
    /// old units never lands after the switch. Reports are never converted in
    /// place: the values come back from the server in the requested units.
    pub async fn set_units(&self, units: UnitSystem) -> Result<LoadOutcome, WeatherError> {
        let place = {
            let mut state = self.state.lock();
            if state.units == units {
                return Ok(LoadOutcome::Unchanged);
            }
            state.units = units;
            state.pending.clone().or_else(|| state.last_place.clone())
        };

        match place {
            Some(place) => self.load(place).await,
            None => Ok(LoadOutcome::Idle),
        }
    }

    async fn load(&self, place: Place) -> Result<LoadOutcome, WeatherError> {
        let (ticket, units) = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.pending = Some(place.clone());
            (state.generation, state.units)
        };

        let result = match &place {
            Place::Query(query) => self.service.search_and_load(query, units).await,
            Place::Coordinates {
                latitude,
                longitude,
            } => {
                self.service
                    .locate_and_load(*latitude, *longitude, units)
                    .await
            }
        };

        let mut state = self.state.lock();
        if state.generation != ticket {
            debug!(ticket, latest = state.generation, "Dropping superseded result");
            return Ok(LoadOutcome::Superseded);
        }
        state.pending = None;

        let report = result?;
        state.last_place = Some(place);
        Ok(LoadOutcome::Loaded { report, units })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geocoding::Geocoder,
        model::{Location, RawCurrentWeather, RawDaily, RawWeatherPayload},
        provider::WeatherProvider,
    };
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Debug)]
    struct EchoGeocoder;

    #[async_trait]
    impl Geocoder for EchoGeocoder {
        async fn resolve_by_name(&self, query: &str) -> Result<Location, WeatherError> {
            if query == "Atlantis" {
                return Err(WeatherError::NotFound {
                    query: query.into(),
                });
            }
            Ok(Location {
                name: query.into(),
                country: "XX".into(),
                latitude: 1.0,
                longitude: 2.0,
                timezone: None,
            })
        }

        async fn resolve_by_coordinates(&self, latitude: f64, longitude: f64) -> Location {
            Location::unnamed(latitude, longitude)
        }
    }

    /// Reports 20 degrees in metric and 68 in imperial, after `metric_delay` for metric.
    #[derive(Debug, Default)]
    struct UnitAwareProvider {
        metric_delay: Duration,
    }

    #[async_trait]
    impl WeatherProvider for UnitAwareProvider {
        async fn fetch_weather(
            &self,
            _location: &Location,
            units: UnitSystem,
        ) -> Result<RawWeatherPayload, WeatherError> {
            let temperature = match units {
                UnitSystem::Metric => {
                    tokio::time::sleep(self.metric_delay).await;
                    20.0
                }
                UnitSystem::Imperial => 68.0,
            };
            Ok(RawWeatherPayload {
                timezone: None,
                current_weather: Some(RawCurrentWeather {
                    time: Some("2024-05-01T12:00".into()),
                    temperature: Some(temperature),
                    windspeed: Some(5.0),
                    weathercode: Some(1),
                }),
                hourly: None,
                daily: Some(RawDaily::default()),
            })
        }
    }

    fn session_with(provider: UnitAwareProvider) -> Session {
        Session::new(
            WeatherService::new(Box::new(EchoGeocoder), Box::new(provider)),
            UnitSystem::Metric,
        )
    }

    fn session() -> Session {
        session_with(UnitAwareProvider::default())
    }

    #[tokio::test]
    async fn unit_change_without_place_is_idle() {
        let s = session();
        let outcome = s.set_units(UnitSystem::Imperial).await.unwrap();

        assert!(matches!(outcome, LoadOutcome::Idle));
        assert_eq!(s.units(), UnitSystem::Imperial);
    }

    #[tokio::test]
    async fn same_units_is_a_no_op() {
        let s = session();
        s.search("Paris").await.unwrap();

        let outcome = s.set_units(UnitSystem::Metric).await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Unchanged));
    }

    #[tokio::test]
    async fn unit_change_refetches_last_place() {
        let s = session();

        let LoadOutcome::Loaded { report, units } = s.search("  Paris ").await.unwrap() else {
            panic!("expected a report");
        };
        assert_eq!(units, UnitSystem::Metric);
        assert_eq!(report.current.temperature, 20.0);
        assert_eq!(s.last_place(), Some(Place::Query("Paris".into())));

        let LoadOutcome::Loaded { report, units } = s.set_units(UnitSystem::Imperial).await.unwrap()
        else {
            panic!("expected a report");
        };
        assert_eq!(units, UnitSystem::Imperial);
        assert_eq!(report.location.name, "Paris");
        assert_eq!(report.current.temperature, 68.0);
    }

    #[tokio::test]
    async fn unit_change_repeats_coordinate_lookup() {
        let s = session();
        s.locate(10.0, 20.0).await.unwrap();

        let LoadOutcome::Loaded { report, .. } = s.set_units(UnitSystem::Imperial).await.unwrap()
        else {
            panic!("expected a report");
        };
        assert_eq!(report.location.name, "Your location");
        assert_eq!(report.location.latitude, 10.0);
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_place() {
        let s = session();
        s.search("Paris").await.unwrap();

        let err = s.search("Atlantis").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(s.last_place(), Some(Place::Query("Paris".into())));
    }

    #[tokio::test]
    async fn unit_change_during_first_load_reloads_that_place() {
        let s = session_with(UnitAwareProvider {
            metric_delay: Duration::from_millis(300),
        });

        let (first, toggled) = tokio::join!(s.search("Paris"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            s.set_units(UnitSystem::Imperial).await
        });

        assert!(matches!(first.unwrap(), LoadOutcome::Superseded));
        let LoadOutcome::Loaded { report, units } = toggled.unwrap() else {
            panic!("expected a report");
        };
        assert_eq!(units, UnitSystem::Imperial);
        assert_eq!(report.location.name, "Paris");
        assert_eq!(report.current.temperature, 68.0);
        assert_eq!(s.last_place(), Some(Place::Query("Paris".into())));

        let again = s.set_units(UnitSystem::Imperial).await.unwrap();
        assert!(matches!(again, LoadOutcome::Unchanged));
    }

    #[tokio::test]
    async fn finished_load_is_no_longer_pending() {
        let s = session();
        s.search("Paris").await.unwrap();
        let _ = s.search("Atlantis").await;

        let LoadOutcome::Loaded { report, .. } = s.set_units(UnitSystem::Imperial).await.unwrap()
        else {
            panic!("expected a report");
        };
        assert_eq!(report.location.name, "Paris");
    }
}
