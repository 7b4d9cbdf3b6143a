//! The `status` command: inspect a named lock.

use crate::cli::StatusArgs;
use crate::commands::make_lock;
use crate::exit_codes;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use serde_json::json;
use std::fs;

pub fn cmd_status(args: StatusArgs) -> Result<i32> {
    let lock = make_lock(&args.name, args.dir.as_deref());
    let status = lock.inspect()?;

    let modified: Option<DateTime<Utc>> = fs::metadata(lock.path())
        .and_then(|meta| meta.modified())
        .ok()
        .map(DateTime::<Utc>::from);

    if args.json {
        let mut value = serde_json::to_value(&status)?;
        value["modified"] = match &modified {
            Some(ts) => json!(ts.to_rfc3339()),
            None => serde_json::Value::Null,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(exit_codes::SUCCESS);
    }

    println!("Lock: {} ({})", status.name, status.path.display());
    if !status.exists {
        println!("State: free (no lock file)");
        return Ok(exit_codes::SUCCESS);
    }

    println!(
        "State: {}",
        if status.held {
            "held"
        } else {
            "free (lock file present)"
        }
    );
    match status.recorded_pid {
        Some(pid) => {
            let liveness = match status.holder_alive {
                Some(true) => "alive",
                Some(false) => "dead",
                None => "unknown",
            };
            println!("Recorded pid: {} ({})", pid, liveness);
        }
        None => println!("Recorded pid: none"),
    }
    if let Some(ts) = modified {
        println!(
            "Last written: {}",
            DateTime::<Local>::from(ts).format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::{FileLock, StalePolicy};
    use tempfile::TempDir;

    fn status_args(dir: &TempDir, json: bool) -> StatusArgs {
        StatusArgs {
            name: "job".to_string(),
            dir: Some(dir.path().to_path_buf()),
            json,
        }
    }

    #[test]
    fn status_of_missing_lock_succeeds() {
        let dir = TempDir::new().unwrap();
        let code = cmd_status(status_args(&dir, false)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn status_of_held_lock_succeeds() {
        let dir = TempDir::new().unwrap();
        let mut holder = FileLock::with_directory("job", dir.path());
        assert!(holder.try_acquire(StalePolicy::Warn).unwrap());

        let code = cmd_status(status_args(&dir, true)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        holder.release().unwrap();
    }
}
