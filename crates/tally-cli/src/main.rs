//! Tally replay tool entry point.

use std::error::Error;
use std::io;

use tally_cli::config::{Config, LogFormat};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = Config::from_env()?;

    // Initialize tracing subscriber. Logs go to stderr; stdout carries reports.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    tracing::info!(
        events_path = ?config.events_path,
        aggregate_id = ?config.aggregate_id,
        "Starting Tally replay"
    );

    let input = tally_cli::open_input(&config)?;
    tally_cli::run(&config, input, io::stdout().lock())?;

    Ok(())
}
