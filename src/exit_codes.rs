//! Exit code constants for the proclock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unopenable lock file, misuse)
//! - 2: Lock busy (not acquired within the timeout)
//! - 3: Lock failure (stale lock under --stale=fail, vanished file,
//!   failed filesystem operation)
//!
//! `proclock run` propagates the child's own exit code when the child runs
//! and exits; these codes apply when proclock itself decides the outcome.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unopenable lock file, or handle misuse.
pub const USER_ERROR: i32 = 1;

/// Lock busy: the lock was held by another process for the whole timeout.
pub const LOCK_BUSY: i32 = 2;

/// Lock failure: stale lock, vanished lock file, or a failed lock operation.
pub const LOCK_FAILURE: i32 = 3;
