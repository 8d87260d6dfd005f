use std::io::Error;

use rustix::process::Pid;

/// Returns whether a process with this PID currently exists.
///
/// Only `ESRCH` counts as absent: a process we lack permission to signal
/// still exists. Note that an unreaped zombie also still exists.
#[must_use]
pub fn process_exists(pid: Pid) -> bool {
    // SAFETY: kill with signal 0 does not affect anything
    let ret = unsafe { libc::kill(pid.as_raw_nonzero().get(), 0) };

    ret == 0 || Error::last_os_error().raw_os_error() != Some(libc::ESRCH)
}
