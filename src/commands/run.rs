//! The `run` command: execute a child command while holding a named lock.

use crate::cli::RunArgs;
use crate::commands::make_lock;
use crate::exit_codes;
use anyhow::{Context, Result};
use std::process::Command;
use std::time::Duration;

pub fn cmd_run(args: RunArgs) -> Result<i32> {
    let mut lock = make_lock(&args.name, args.dir.as_deref());

    let acquired = lock.acquire(Duration::from_secs(args.timeout), args.stale.into())?;
    if !acquired {
        eprintln!(
            "lock '{}' is busy: held by another process ({})",
            args.name,
            lock.path().display()
        );
        return Ok(exit_codes::LOCK_BUSY);
    }

    let (program, program_args) = args
        .command
        .split_first()
        .context("no command to run")?;
    let status = Command::new(program)
        .args(program_args)
        .status()
        .with_context(|| format!("failed to execute '{}'", program))?;

    lock.release()?;

    // A signal-terminated child has no exit code; report a generic failure.
    Ok(status.code().unwrap_or(exit_codes::USER_ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StaleArg;
    use crate::lock::{FileLock, StalePolicy};
    use tempfile::TempDir;

    fn run_args(dir: &TempDir, command: &[&str]) -> RunArgs {
        RunArgs {
            name: "job".to_string(),
            dir: Some(dir.path().to_path_buf()),
            timeout: 0,
            stale: StaleArg::Warn,
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    #[cfg(unix)]
    fn run_propagates_child_success() {
        let dir = TempDir::new().unwrap();
        let code = cmd_run(run_args(&dir, &["true"])).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    #[cfg(unix)]
    fn run_propagates_child_failure_code() {
        let dir = TempDir::new().unwrap();
        let code = cmd_run(run_args(&dir, &["sh", "-c", "exit 7"])).unwrap();
        assert_eq!(code, 7);
    }

    #[test]
    #[cfg(unix)]
    fn run_releases_the_lock_afterwards() {
        let dir = TempDir::new().unwrap();
        cmd_run(run_args(&dir, &["true"])).unwrap();

        let mut lock = FileLock::with_directory("job", dir.path());
        assert!(lock.try_acquire(StalePolicy::Warn).unwrap());
        lock.release().unwrap();
    }

    #[test]
    fn run_reports_busy_when_lock_is_held() {
        let dir = TempDir::new().unwrap();
        let mut holder = FileLock::with_directory("job", dir.path());
        assert!(holder.try_acquire(StalePolicy::Warn).unwrap());

        let code = cmd_run(run_args(&dir, &["true"])).unwrap();
        assert_eq!(code, exit_codes::LOCK_BUSY);

        holder.release().unwrap();
    }

    #[test]
    fn run_fails_on_unexecutable_command() {
        let dir = TempDir::new().unwrap();
        let result = cmd_run(run_args(&dir, &["definitely-not-a-real-binary-xyz"]));
        assert!(result.is_err());
    }
}
