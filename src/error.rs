//! Error types for proclock.
//!
//! Uses thiserror for derive macros. Every variant carries the path of the
//! lock file involved so callers can report which lock misbehaved.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lock operations.
///
/// Contention (the lock is currently held by a live process) is *not* an
/// error; [`FileLock::acquire`](crate::lock::FileLock::acquire) reports it
/// as `Ok(false)`. These variants cover the failure modes that abort an
/// acquire or release call outright.
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock file could not be opened or created (missing directory,
    /// permission denial). Waiting will not fix this, so it is never retried.
    #[error("lock file '{}' could not be opened: {source}", .path.display())]
    NotOpenable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required filesystem or lock-facility operation failed after the
    /// advisory lock was already won, or while cleaning up. The lock's
    /// integrity can no longer be trusted.
    #[error("lock file '{}': {op} failed: {source}", .path.display())]
    OperationFailed {
        path: PathBuf,
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// The lock file disappeared between opening it and finishing
    /// initialization, despite this process holding the advisory lock.
    /// Proceeding would leave no externally observable lock file.
    #[error("lock file '{}' vanished while the lock was being initialized", .path.display())]
    Vanished { path: PathBuf },

    /// A previous holder recorded its pid but that process no longer exists.
    /// Only surfaced under [`StalePolicy::Fail`](crate::lock::StalePolicy).
    #[error("stale lock file '{}' left behind by dead process {pid}", .path.display())]
    StaleLock { path: PathBuf, pid: i32 },

    /// `acquire` was called on a handle that already holds the lock.
    /// The lock is not reentrant.
    #[error("lock '{}' is already held by this handle", .path.display())]
    AlreadyHeld { path: PathBuf },
}

impl LockError {
    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockError::NotOpenable { .. } => exit_codes::USER_ERROR,
            LockError::AlreadyHeld { .. } => exit_codes::USER_ERROR,
            LockError::OperationFailed { .. } => exit_codes::LOCK_FAILURE,
            LockError::Vanished { .. } => exit_codes::LOCK_FAILURE,
            LockError::StaleLock { .. } => exit_codes::LOCK_FAILURE,
        }
    }

    /// The lock file path this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LockError::NotOpenable { path, .. }
            | LockError::OperationFailed { path, .. }
            | LockError::Vanished { path }
            | LockError::StaleLock { path, .. }
            | LockError::AlreadyHeld { path } => path,
        }
    }
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_path() -> PathBuf {
        PathBuf::from("/tmp/test.lock")
    }

    #[test]
    fn not_openable_has_user_error_exit_code() {
        let err = LockError::NotOpenable {
            path: dummy_path(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn stale_lock_has_lock_failure_exit_code() {
        let err = LockError::StaleLock {
            path: dummy_path(),
            pid: 4242,
        };
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn vanished_has_lock_failure_exit_code() {
        let err = LockError::Vanished { path: dummy_path() };
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn errors_carry_the_lock_path() {
        let err = LockError::Vanished { path: dummy_path() };
        assert_eq!(err.path(), dummy_path().as_path());

        let err = LockError::AlreadyHeld { path: dummy_path() };
        assert_eq!(err.path(), dummy_path().as_path());
    }

    #[test]
    fn stale_lock_message_names_the_dead_pid() {
        let err = LockError::StaleLock {
            path: dummy_path(),
            pid: 99999,
        };
        let msg = err.to_string();
        assert!(msg.contains("99999"));
        assert!(msg.contains("test.lock"));
    }
}
