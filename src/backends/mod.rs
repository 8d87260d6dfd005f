pub mod pidfd;
pub mod probe;

use std::io::{Error, ErrorKind};

use rustix::process::Pid;

use crate::error::AcquireError;

/// Converts a raw PID into the kernel's representation, rejecting zero and
/// values outside the PID namespace range.
pub(crate) fn to_pid(pid: u32) -> Result<Pid, AcquireError> {
    i32::try_from(pid)
        .ok()
        .and_then(Pid::from_raw)
        .ok_or_else(|| AcquireError {
            pid,
            source: Error::from(ErrorKind::InvalidInput),
        })
}
