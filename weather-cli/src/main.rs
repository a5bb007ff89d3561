//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - The interactive prompt loop and configuration
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod configure;
mod interactive;
mod logging;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;

    let cmd = cli::Cli::parse();
    cmd.run().await
}
