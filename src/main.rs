//! Binary entrypoint for the `flowscribe` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match flowscribe::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
