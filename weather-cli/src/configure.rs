use anyhow::Context;
use inquire::{CustomType, Text};
use weather_core::Config;

/// Interactively edit and save the config file.
pub fn run() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let place = Text::new("Default place:")
        .with_default(config.default_place())
        .with_help_message("Loaded by `weather show` and `weather interactive` when no place is given")
        .prompt()
        .context("Failed to read default place")?;
    config.set_default_place(&place);

    let timeout = CustomType::<u64>::new("HTTP timeout in seconds:")
        .with_default(config.timeout_secs.unwrap_or(0))
        .with_help_message("0 waits indefinitely")
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;
    config.timeout_secs = (timeout > 0).then_some(timeout);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
