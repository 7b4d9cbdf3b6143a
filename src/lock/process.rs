//! Process-liveness queries for stale-lock detection.

/// Parse the process id recorded in a lock file.
///
/// Only the first whitespace-separated token is considered, so a trailing
/// newline or a torn read with junk after the pid still parses. An empty,
/// unparseable, or non-positive value means "no prior holder" — a fresh or
/// zero-length lock file is not evidence of staleness.
pub(crate) fn parse_recorded_pid(content: &str) -> Option<i32> {
    let pid = content.split_whitespace().next()?.parse::<i32>().ok()?;
    (pid > 0).then_some(pid)
}

/// Whether a process with the given id currently exists.
///
/// Returns `None` when the platform cannot answer, in which case stale-lock
/// detection degrades to [`StalePolicy::Ignore`](super::StalePolicy) rather
/// than blocking acquisition on a missing capability.
#[cfg(unix)]
pub(crate) fn alive(pid: i32) -> Option<bool> {
    // kill(pid, 0) performs error checking without sending a signal.
    // ESRCH means no such process; EPERM means it exists but is not ours.
    let rc = unsafe { libc::kill(pid as libc::pid_t, 0) };
    if rc == 0 {
        return Some(true);
    }
    match std::io::Error::last_os_error().raw_os_error() {
        Some(libc::ESRCH) => Some(false),
        _ => Some(true),
    }
}

#[cfg(not(unix))]
pub(crate) fn alive(_pid: i32) -> Option<bool> {
    None
}
