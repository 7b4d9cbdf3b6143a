//! Entry point for the `proclock` CLI. It parses arguments, dispatches to
//! the appropriate command handler, and maps errors to exit codes.

use proclock::cli::Cli;
use proclock::commands;
use proclock::error::LockError;
use proclock::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("Error: {:#}", err);

            let code = err
                .downcast_ref::<LockError>()
                .map(LockError::exit_code)
                .unwrap_or(exit_codes::USER_ERROR);
            ExitCode::from(code as u8)
        }
    }
}
