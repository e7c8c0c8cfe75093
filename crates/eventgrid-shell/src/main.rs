//! Interactive shell for the Eventgrid world.
//!
//! Generates a world once at startup, then repeatedly reads a coordinate
//! pair from the terminal and prints either the nearest events with
//! available tickets or the contents of a single cell.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`$EVENTGRID_CONFIG` or `eventgrid.yaml`)
//! 2. Initialize structured logging (tracing, to stderr)
//! 3. Generate the world
//! 4. Run the input loop until `exit` or end of input

mod command;
mod config;
mod error;
mod setup;
mod shell;

use std::io::IsTerminal;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::shell::{Shell, ShellOptions};

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the world cannot be
/// generated, or the terminal fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = setup::load_config()?;

    // 2. Initialize structured logging. stdout is reserved for the session.
    init_logging(&config.logging);
    info!(
        result_limit = config.search.result_limit,
        format = ?config.display.format,
        event_frequency = config.world.event_frequency,
        "eventgrid-shell starting"
    );

    // 3. Generate the world.
    let world = setup::build_world(&config)?;

    // 4. Run the session.
    let stdout = std::io::stdout();
    let options = ShellOptions {
        result_limit: config.search.result_limit,
        format: config.display.format,
        pause_between_commands: config.display.clear_screen && stdout.is_terminal(),
    };
    let mut shell = Shell::new(&world, std::io::stdin().lock(), stdout.lock(), options);
    shell.run()?;

    info!("eventgrid-shell finished");
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
