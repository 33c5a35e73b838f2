//! Core library entry for the `planboard` CLI.
//!
//! A planning document is parsed into task records, prerequisites are
//! resolved, completion evidence is gathered from version control, artifact
//! files and progress notes, and the startable tasks are listed in order.

pub mod adapters;
pub mod board;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    init_tracing(cli.verbose);
    commands::dispatch(&cli)
}

/// Installs the stderr subscriber once per process.
///
/// `RUST_LOG` wins when it parses; otherwise `warn`, or `debug` when verbose.
fn init_tracing(verbose: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
