//! Binary entrypoint for the `planboard` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Recording and replay are handled in commands::dispatch via
    // PLANBOARD_RECORD=<dir> and PLANBOARD_REPLAY=<file>.
    match planboard::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
