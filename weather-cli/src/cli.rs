use anyhow::Context;
use clap::{Parser, Subcommand};
use weather_core::{Config, ReportView, Session, UnitSystem, WeatherService};

use crate::{configure, interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup backed by Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default place and an optional HTTP timeout.
    Configure,

    /// Show weather for a place name.
    Show {
        /// Place name; defaults to the configured default place.
        place: Option<String>,

        /// Unit system: metric (°C, km/h) or imperial (°F, mph).
        #[arg(long, short, default_value_t = UnitSystem::Metric)]
        units: UnitSystem,
    },

    /// Show weather for a coordinate pair.
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, short, default_value_t = UnitSystem::Metric)]
        units: UnitSystem,
    },

    /// Prompt for places repeatedly; units can be toggled between lookups.
    Interactive {
        #[arg(long, short, default_value_t = UnitSystem::Metric)]
        units: UnitSystem,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure::run()?,
            Command::Show { place, units } => {
                let config = Config::load()?;
                let service = WeatherService::from_config(&config)?;
                let place = place.unwrap_or_else(|| config.default_place().to_string());

                let report = service
                    .search_and_load(&place, units)
                    .await
                    .with_context(|| format!("Could not load weather for '{place}'"))?;

                print!("{}", render::report(&ReportView::new(&report, units)));
            }
            Command::Locate { lat, lon, units } => {
                let config = Config::load()?;
                let service = WeatherService::from_config(&config)?;

                let report = service
                    .locate_and_load(lat, lon, units)
                    .await
                    .context("Failed to load your location")?;

                print!("{}", render::report(&ReportView::new(&report, units)));
            }
            Command::Interactive { units } => {
                let config = Config::load()?;
                let session = Session::new(WeatherService::from_config(&config)?, units);
                interactive::run(&session, config.default_place()).await?;
            }
        }

        Ok(())
    }
}
