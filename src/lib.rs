//! Core library entry for the `flowscribe` CLI.

pub mod adapters;
pub mod analyze;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod context;
pub mod diagram;
pub mod groups;
pub mod history;
pub mod hosting;
pub mod ports;
pub mod report;
pub mod repository;
pub mod segment;
pub mod share;

use clap::error::ErrorKind;
use clap::Parser;

/// Runs the CLI with the provided arguments.
///
/// A `.env` file in the working directory is loaded first, so API keys and
/// the acting user can live there instead of the shell environment.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution
/// fails. Help and version requests print and succeed.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let _ = dotenvy::dotenv();

    match cli::Cli::try_parse_from(args) {
        Ok(cli) => commands::dispatch(&cli.command),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            Ok(())
        }
        Err(err) => Err(err.to_string()),
    }
}
