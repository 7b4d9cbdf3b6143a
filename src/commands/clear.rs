//! The `clear` command: remove an abandoned lock file.
//!
//! The caller is responsible for deciding that clearing is appropriate,
//! which is why --force is required; the command itself refuses whenever
//! the lock looks like it still has a living owner.

use crate::cli::ClearArgs;
use crate::commands::make_lock;
use crate::exit_codes;
use anyhow::{Result, bail};
use std::fs;

pub fn cmd_clear(args: ClearArgs) -> Result<i32> {
    let lock = make_lock(&args.name, args.dir.as_deref());
    let status = lock.inspect()?;

    if !status.exists {
        bail!(
            "lock '{}' has no lock file at: {}",
            args.name,
            lock.path().display()
        );
    }
    if status.held {
        bail!(
            "refusing to clear '{}': the lock is currently held",
            args.name
        );
    }
    if let Some(pid) = status.recorded_pid
        && status.holder_alive == Some(true)
    {
        bail!(
            "refusing to clear '{}': recorded process {} is still running",
            args.name,
            pid
        );
    }
    if !args.force {
        bail!("clearing lock '{}' requires --force", args.name);
    }

    fs::remove_file(lock.path())?;
    println!("Cleared lock '{}' ({})", args.name, lock.path().display());
    Ok(exit_codes::SUCCESS)
}
