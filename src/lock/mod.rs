//! Cross-process locking for proclock.
//!
//! This module implements a named, advisory, exclusive lock backed by a
//! filesystem lock file, usable by independent processes to coordinate
//! access to a shared resource ("only one instance of this job may run").
//!
//! # Lock Files
//!
//! A lock named `job` in directory `dir` lives at `dir/job.lock` (the
//! directory defaults to the system temp directory). While held, the file
//! contains the holder's process id as ASCII decimal. The file's *existence*
//! is never proof of holding: only the OS advisory lock is. A lock file may
//! be absent, empty, or contain a stale pid, and all three mean "no current
//! holder".
//!
//! # Stale Locks
//!
//! Before competing for the advisory lock, an acquirer reads any recorded
//! pid and checks whether that process still exists. A dead recorded holder
//! is handled per [`StalePolicy`]: ignored, warned about, or turned into a
//! hard error. On platforms without a liveness facility the check degrades
//! to ignore.
//!
//! # Release Policy
//!
//! `release` deletes the lock file *before* releasing the advisory lock,
//! then unlocks and closes. This keeps the filesystem clean of dead lock
//! files, at the cost of a narrow race where a waiter wins the advisory lock
//! on the just-unlinked inode; acquisition re-checks that the path still
//! exists after winning the lock and surfaces that case as
//! [`LockError::Vanished`](crate::error::LockError) rather than silently
//! holding an invisible lock.
//!
//! # RAII
//!
//! Dropping a held [`FileLock`] releases it. If release fails during drop,
//! a warning is printed but the program does not crash.

mod handle;
mod process;
mod types;


// Re-export public API
pub use handle::{FileLock, RETRY_INTERVAL};
pub use types::{LockStatus, StalePolicy};
