//! Shared types for the lock module.

use serde::Serialize;
use std::path::PathBuf;

/// What to do when the lock file records a process id that is no longer
/// alive.
///
/// Staleness indicates an abnormal prior termination that skipped cleanup.
/// It never implies the lock is currently held; the advisory lock decides
/// that independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Proceed silently.
    Ignore,

    /// Proceed, but print a diagnostic to stderr.
    #[default]
    Warn,

    /// Abort the whole acquire call with
    /// [`LockError::StaleLock`](crate::error::LockError), without retrying.
    Fail,
}

/// A snapshot of a lock file's externally observable state.
///
/// Produced by [`FileLock::inspect`](super::FileLock::inspect). All fields
/// describe a single moment; a concurrent acquirer may change them right
/// after the snapshot is taken.
#[derive(Debug, Clone, Serialize)]
pub struct LockStatus {
    /// Logical lock name.
    pub name: String,

    /// Resolved lock file path.
    pub path: PathBuf,

    /// Whether the lock file currently exists.
    pub exists: bool,

    /// Process id recorded in the file, if parseable.
    pub recorded_pid: Option<i32>,

    /// Whether the recorded process is alive; `None` when nothing is
    /// recorded or the platform cannot answer.
    pub holder_alive: Option<bool>,

    /// Whether the advisory lock is currently held (by anyone).
    pub held: bool,
}
