//! CLI argument parsing for proclock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::lock::StalePolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Proclock: named, advisory, cross-process file locks.
///
/// A lock named NAME lives at `<dir>/NAME.lock` (the directory defaults to
/// the system temp directory). While held, the file contains the holder's
/// process id. Locks are advisory: only cooperating processes observe them.
#[derive(Parser, Debug)]
#[command(name = "proclock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for proclock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command while holding a named lock.
    ///
    /// Acquires the lock (waiting up to --timeout seconds), executes the
    /// command, then releases. Exits with the child's own exit code, or
    /// with the lock-busy code if the lock could not be obtained.
    Run(RunArgs),

    /// Show the state of a named lock.
    ///
    /// Reports whether the lock file exists, the recorded process id and
    /// its liveness, and whether the advisory lock is currently held.
    Status(StatusArgs),

    /// Remove an abandoned lock file.
    ///
    /// Refuses while the lock is held or its recorded process is alive.
    /// Requires --force to prevent accidental clearing.
    Clear(ClearArgs),
}

/// Stale-lock handling, selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleArg {
    /// Proceed silently past a dead holder's lock file.
    Ignore,
    /// Proceed, but print a warning.
    Warn,
    /// Abort immediately when a dead holder's lock file is found.
    Fail,
}

impl From<StaleArg> for StalePolicy {
    fn from(arg: StaleArg) -> Self {
        match arg {
            StaleArg::Ignore => StalePolicy::Ignore,
            StaleArg::Warn => StalePolicy::Warn,
            StaleArg::Fail => StalePolicy::Fail,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Lock name; the lock file is `<dir>/<name>.lock`.
    pub name: String,

    /// Directory for the lock file (defaults to the system temp directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Seconds to keep retrying while the lock is busy (0 = single attempt).
    #[arg(long, default_value_t = 0)]
    pub timeout: u64,

    /// How to treat a lock file left behind by a dead process.
    #[arg(long, value_enum, default_value_t = StaleArg::Warn)]
    pub stale: StaleArg,

    /// Command to execute while the lock is held.
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Lock name to inspect.
    pub name: String,

    /// Directory for the lock file (defaults to the system temp directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Emit machine-readable JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clear` command.
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Lock name whose file should be removed.
    pub name: String,

    /// Directory for the lock file (defaults to the system temp directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Force clearing the lock file (required for safety).
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_minimal() {
        let cli = Cli::try_parse_from(["proclock", "run", "nightly", "--", "echo", "hi"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.name, "nightly");
            assert_eq!(args.timeout, 0);
            assert_eq!(args.stale, StaleArg::Warn);
            assert_eq!(args.command, vec!["echo", "hi"]);
            assert!(args.dir.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_full() {
        let cli = Cli::try_parse_from([
            "proclock",
            "run",
            "nightly",
            "--dir",
            "/var/lock",
            "--timeout",
            "30",
            "--stale",
            "fail",
            "--",
            "sh",
            "-c",
            "sleep 1",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.dir, Some(PathBuf::from("/var/lock")));
            assert_eq!(args.timeout, 30);
            assert_eq!(args.stale, StaleArg::Fail);
            assert_eq!(args.command, vec!["sh", "-c", "sleep 1"]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_requires_a_command() {
        assert!(Cli::try_parse_from(["proclock", "run", "nightly"]).is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["proclock", "status", "nightly", "--json"]).unwrap();
        if let Command::Status(args) = cli.command {
            assert_eq!(args.name, "nightly");
            assert!(args.json);
        } else {
            panic!("Expected Status command");
        }
    }

    #[test]
    fn parse_clear() {
        let cli = Cli::try_parse_from(["proclock", "clear", "nightly", "--force"]).unwrap();
        if let Command::Clear(args) = cli.command {
            assert_eq!(args.name, "nightly");
            assert!(args.force);
        } else {
            panic!("Expected Clear command");
        }
    }

    #[test]
    fn stale_arg_maps_to_policy() {
        assert_eq!(StalePolicy::from(StaleArg::Ignore), StalePolicy::Ignore);
        assert_eq!(StalePolicy::from(StaleArg::Warn), StalePolicy::Warn);
        assert_eq!(StalePolicy::from(StaleArg::Fail), StalePolicy::Fail);
    }
}
