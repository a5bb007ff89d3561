use inquire::{InquireError, Text};
use tracing::debug;
use weather_core::{LoadOutcome, ReportView, Session, UnitSystem, WeatherError};

use crate::render;

const HELP: &str = "place name · :c / :f switch units · :here <lat> <lon> · :q quit";

#[derive(Debug, PartialEq)]
enum Action {
    Search(String),
    Units(UnitSystem),
    Here(f64, f64),
    Quit,
    Nothing,
}

fn parse_action(input: &str) -> Result<Action, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Action::Nothing);
    }
    let Some(command) = input.strip_prefix(':') else {
        return Ok(Action::Search(input.to_string()));
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or_default() {
        "q" | "quit" => Ok(Action::Quit),
        "c" => Ok(Action::Units(UnitSystem::Metric)),
        "f" => Ok(Action::Units(UnitSystem::Imperial)),
        "here" => {
            let coords: Vec<f64> = parts
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|_| "Usage: :here <lat> <lon>".to_string())?;
            match coords[..] {
                [lat, lon] => Ok(Action::Here(lat, lon)),
                _ => Err("Usage: :here <lat> <lon>".to_string()),
            }
        }
        other => Err(format!("Unknown command ':{other}'")),
    }
}

/// Prompt loop: load `first_place`, then act on each line until `:q` or Ctrl-C.
pub async fn run(session: &Session, first_place: &str) -> anyhow::Result<()> {
    // The first load is best effort, like a page opening on a default city.
    show(session.search(first_place).await, "");

    loop {
        let input = match Text::new(&format!("Place [{}]", session.units()))
            .with_help_message(HELP)
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let action = match parse_action(&input) {
            Ok(action) => action,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };

        match action {
            Action::Search(query) => show(session.search(&query).await, ""),
            Action::Here(lat, lon) => show(
                session.locate(lat, lon).await,
                "Failed to load your location: ",
            ),
            Action::Units(units) => show(session.set_units(units).await, ""),
            Action::Quit => break,
            Action::Nothing => {}
        }
    }

    Ok(())
}

fn show(outcome: Result<LoadOutcome, WeatherError>, error_prefix: &str) {
    match outcome {
        Ok(LoadOutcome::Loaded { report, units }) => {
            print!("{}", render::report(&ReportView::new(&report, units)));
        }
        Ok(LoadOutcome::Idle) => println!("Units switched; search for a place to load weather."),
        Ok(LoadOutcome::Unchanged) => {}
        Ok(LoadOutcome::Superseded) => debug!("Result dropped, a newer lookup is pending"),
        Err(e) => {
            debug!(error = ?e, "Lookup failed");
            eprintln!("{error_prefix}{e}");
        }
    }
}
