//! Command gateway binary.

use std::io::{self, Write};
use std::process::ExitCode;

use cmdgate_config::Config;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    match cmdgated::run_server(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut stderr = io::stderr();
            if writeln!(stderr, "cmdgated: {error}").is_err() {
                return ExitCode::FAILURE;
            }
            let mut source = std::error::Error::source(&error);
            while let Some(cause) = source {
                if writeln!(stderr, "  caused by: {cause}").is_err() {
                    break;
                }
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
