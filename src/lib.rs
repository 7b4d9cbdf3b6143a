//! Proclock: named, advisory, cross-process file locks.
//!
//! A [`FileLock`] coordinates independent operating-system processes through
//! a lock file and the OS advisory-locking facility: "only one instance of
//! this job may run at a time". The lock file records the holder's pid as
//! diagnostic metadata; the advisory lock alone decides ownership, so a
//! leftover file from a crashed holder never blocks the next acquirer.
//!
//! The `proclock` binary wraps the same primitive for shell use: `run`
//! executes a command under a lock, `status` inspects one, and `clear`
//! removes an abandoned lock file.

pub mod cli;
pub mod commands;
pub mod error;
pub mod exit_codes;
pub mod lock;

pub use error::{LockError, Result};
pub use lock::{FileLock, LockStatus, RETRY_INTERVAL, StalePolicy};
