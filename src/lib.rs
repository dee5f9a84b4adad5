pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

use clap::Parser;
use std::process::ExitCode;

use commands::Args;

pub fn run() -> ExitCode {
    let args = Args::parse();

    // A failed logger init only loses log output
    let _ = logging::init(args.verbose);

    let result = args.into_config().and_then(|config| commands::execute(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
