//! Command implementations for proclock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Commands return the process exit code so `run` can
//! propagate the child command's own code.

mod clear;
mod run;
mod status;

use crate::cli::Command;
use crate::lock::FileLock;
use anyhow::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<i32> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Status(args) => status::cmd_status(args),
        Command::Clear(args) => clear::cmd_clear(args),
    }
}

/// Build a lock handle from the shared name/--dir arguments.
fn make_lock(name: &str, dir: Option<&Path>) -> FileLock {
    match dir {
        Some(dir) => FileLock::with_directory(name, dir),
        None => FileLock::new(name),
    }
}
