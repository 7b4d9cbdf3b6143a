//! The lock acquisition/release state machine.

use crate::error::{LockError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use super::process;
use super::types::{LockStatus, StalePolicy};

/// Sleep interval between acquisition attempts when a timeout is given.
///
/// The deadline is wall-clock based and coarse: a competing process
/// releasing its lock does not wake a sleeping waiter early.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Ownership of the underlying lock file descriptor.
///
/// An open-but-unlocked descriptor only exists inside a single acquisition
/// attempt (as a local), so it never needs to be stored here: between
/// attempts the handle is back to `Unopened`.
#[derive(Debug)]
enum FileState {
    /// No file descriptor owned by this handle.
    Unopened,

    /// File open and advisory lock held; the file content is our pid.
    OpenLocked(File),
}

/// A named, advisory, exclusive cross-process lock.
///
/// Construction is pure (no I/O); the lock file path is resolved once and
/// never changes. `acquire` drives the handle to the held state or reports
/// contention as `Ok(false)`; `release` (or drop) gives the lock back.
///
/// The lock is not reentrant: a handle that already holds the lock must not
/// call `acquire` again, and a second handle in the same process competes
/// like any foreign process would.
///
/// # Example
///
/// ```no_run
/// use proclock::{FileLock, StalePolicy};
/// use std::time::Duration;
///
/// let mut lock = FileLock::new("nightly-report");
/// if lock.acquire(Duration::from_secs(30), StalePolicy::Warn)? {
///     // ... sole instance works here ...
///     lock.release()?;
/// }
/// # Ok::<(), proclock::LockError>(())
/// ```
#[derive(Debug)]
pub struct FileLock {
    /// Logical lock identifier.
    name: String,

    /// Resolved lock file path, fixed at construction.
    path: PathBuf,

    /// Current file-descriptor ownership.
    state: FileState,
}

impl FileLock {
    /// Create a handle for the named lock in the system temp directory.
    ///
    /// Performs no I/O; the lock file is only touched by `acquire`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_directory(name, std::env::temp_dir())
    }

    /// Create a handle for the named lock in a specific directory.
    ///
    /// The directory must already exist when `acquire` is called; a missing
    /// directory surfaces as [`LockError::NotOpenable`].
    pub fn with_directory(name: impl Into<String>, directory: impl AsRef<Path>) -> Self {
        let name = name.into();
        let path = directory.as_ref().join(format!("{}.lock", name));
        Self {
            name,
            path,
            state: FileState::Unopened,
        }
    }

    /// Logical lock name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved lock file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this handle currently holds the lock.
    pub fn is_held(&self) -> bool {
        matches!(self.state, FileState::OpenLocked(_))
    }

    /// Attempt to acquire the lock, retrying until `timeout` elapses.
    ///
    /// A zero timeout makes exactly one attempt. Otherwise attempts repeat
    /// with a fixed sleep ([`RETRY_INTERVAL`]) in between until the
    /// wall-clock deadline passes, ending with one final attempt.
    ///
    /// Returns `Ok(true)` when the lock was obtained and `Ok(false)` when it
    /// stayed contended for the whole timeout — contention is the expected
    /// outcome of normal operation, not an error. Fatal conditions (file not
    /// openable, stale lock under [`StalePolicy::Fail`], vanished file,
    /// write failure after winning the lock) abort the whole call without
    /// further retries.
    pub fn acquire(&mut self, timeout: Duration, stale_policy: StalePolicy) -> Result<bool> {
        if self.is_held() {
            return Err(LockError::AlreadyHeld {
                path: self.path.clone(),
            });
        }

        // A timeout too large for the clock to represent means "no deadline".
        let deadline = Instant::now().checked_add(timeout);
        let mut warned = false;
        loop {
            if self.try_once(stale_policy, &mut warned)? {
                return Ok(true);
            }
            match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(false);
                    }
                    thread::sleep(RETRY_INTERVAL.min(deadline - now));
                }
                None => thread::sleep(RETRY_INTERVAL),
            }
        }
    }

    /// Single-attempt acquire; equivalent to `acquire` with a zero timeout.
    pub fn try_acquire(&mut self, stale_policy: StalePolicy) -> Result<bool> {
        self.acquire(Duration::ZERO, stale_policy)
    }

    /// One acquisition attempt: open, stale check, advisory lock, validate,
    /// record pid.
    ///
    /// `warned` spans the whole retry loop so a stale-lock warning is
    /// emitted once per acquire call, not once per iteration.
    fn try_once(&mut self, stale_policy: StalePolicy, warned: &mut bool) -> Result<bool> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| LockError::NotOpenable {
                path: self.path.clone(),
                source: e,
            })?;

        // Peek at any previously recorded pid before competing for the
        // advisory lock. A torn read while a holder is mid-write is
        // tolerated: garbage parses to "no prior holder".
        let mut content = String::new();
        if file.read_to_string(&mut content).is_err() {
            content.clear();
        }
        if let Some(pid) = process::parse_recorded_pid(&content)
            && process::alive(pid) == Some(false)
        {
            match stale_policy {
                StalePolicy::Ignore => {}
                StalePolicy::Warn => {
                    if !*warned {
                        eprintln!(
                            "Warning: lock file '{}' was left behind by dead process {}",
                            self.path.display(),
                            pid
                        );
                        *warned = true;
                    }
                }
                StalePolicy::Fail => {
                    return Err(LockError::StaleLock {
                        path: self.path.clone(),
                        pid,
                    });
                }
            }
        }

        match file.try_lock_exclusive() {
            Ok(()) => {}
            // Held by another process: close and report "not yet acquired".
            Err(e) if is_contention(&e) => return Ok(false),
            Err(e) => {
                return Err(LockError::OperationFailed {
                    path: self.path.clone(),
                    op: "lock",
                    source: e,
                });
            }
        }

        // A concurrent holder may have unlinked the path between our open
        // and winning the lock (its release deletes before unlocking).
        // Writing into the unlinked inode would succeed while leaving no
        // lock file on disk, so surface it instead of holding invisibly.
        if !self.path.exists() {
            let _ = FileExt::unlock(&file);
            return Err(LockError::Vanished {
                path: self.path.clone(),
            });
        }

        self.record_own_pid(&mut file)?;
        self.state = FileState::OpenLocked(file);
        Ok(true)
    }

    /// Truncate, rewind, write our pid as decimal text, flush to disk.
    ///
    /// The advisory lock is already won here, so any failure leaves the
    /// lock held-but-uninitialized and is fatal rather than retried.
    fn record_own_pid(&self, file: &mut File) -> Result<()> {
        let fail = |op: &'static str, source: io::Error| LockError::OperationFailed {
            path: self.path.clone(),
            op,
            source,
        };

        file.set_len(0).map_err(|e| fail("truncate", e))?;
        file.seek(SeekFrom::Start(0)).map_err(|e| fail("rewind", e))?;
        file.write_all(std::process::id().to_string().as_bytes())
            .map_err(|e| fail("write", e))?;
        file.flush().map_err(|e| fail("flush", e))?;
        file.sync_all().map_err(|e| fail("sync", e))?;
        Ok(())
    }

    /// Release the lock: delete the file, release the advisory lock, close.
    ///
    /// Idempotent; a no-op on a handle that holds nothing. The file is
    /// unlinked *before* unlocking so no process can observe our pid in a
    /// file we no longer own (see the module docs for the full release
    /// policy). A file that is already gone at delete time is tolerated;
    /// close failure at the very end is deliberately ignored, since the
    /// lock has already been given up by then.
    pub fn release(&mut self) -> Result<()> {
        let file = match std::mem::replace(&mut self.state, FileState::Unopened) {
            FileState::OpenLocked(file) => file,
            FileState::Unopened => return Ok(()),
        };

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                // `file` is dropped on return, so the OS lock is still
                // released via close even on this path.
                return Err(LockError::OperationFailed {
                    path: self.path.clone(),
                    op: "delete",
                    source: e,
                });
            }
        }

        FileExt::unlock(&file).map_err(|e| LockError::OperationFailed {
            path: self.path.clone(),
            op: "unlock",
            source: e,
        })?;

        drop(file);
        Ok(())
    }

    /// Take a snapshot of the lock file's externally observable state.
    ///
    /// Does not create the file and does not disturb a holder: held-ness is
    /// probed with a non-blocking exclusive claim that is immediately given
    /// back if it succeeds.
    pub fn inspect(&self) -> Result<LockStatus> {
        let mut status = LockStatus {
            name: self.name.clone(),
            path: self.path.clone(),
            exists: false,
            recorded_pid: None,
            holder_alive: None,
            held: self.is_held(),
        };

        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(status),
            Err(e) => {
                return Err(LockError::NotOpenable {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        status.exists = true;

        let mut content = String::new();
        if file.read_to_string(&mut content).is_err() {
            content.clear();
        }
        status.recorded_pid = process::parse_recorded_pid(&content);
        status.holder_alive = status.recorded_pid.and_then(process::alive);

        if !status.held {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    let _ = FileExt::unlock(&file);
                }
                Err(e) if is_contention(&e) => status.held = true,
                Err(e) => {
                    return Err(LockError::OperationFailed {
                        path: self.path.clone(),
                        op: "probe",
                        source: e,
                    });
                }
            }
        }

        Ok(status)
    }
}

impl Drop for FileLock {
    /// Release on scope exit so the lock is given back on every exit path,
    /// including early returns and propagated errors. Failures warn instead
    /// of panicking to avoid masking an in-flight panic.
    fn drop(&mut self) {
        if self.is_held()
            && let Err(e) = self.release()
        {
            eprintln!(
                "Warning: failed to release lock '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Whether a lock-attempt error means "currently held by someone else".
fn is_contention(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
