mod backends;
mod error;
mod utils;

use std::time::Duration;

pub use rustix::process::Pid;

use crate::backends::{pidfd::PidFd, probe::ProbeHandle};
pub use crate::{
    backends::{pidfd, probe},
    error::{AcquireError, WaitError},
    utils::process_exists,
};

/// Result of one bounded wait on a process.
///
/// A timeout is an expected outcome with its own path, not a failure.
/// Deliberately carries no exit code or signal info: this crate observes
/// termination, it does not reap or inspect it.
#[derive(Debug)]
pub enum WaitOutcome {
    /// The process terminated before the timeout.
    Exited,
    /// The timeout elapsed with no termination.
    TimedOut,
    /// Acquiring the handle or waiting on it failed.
    Failed(WaitError),
}

impl WaitOutcome {
    #[must_use]
    pub fn is_exited(&self) -> bool {
        matches!(self, Self::Exited)
    }

    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut)
    }
}

/// A waitable handle to a process we did not necessarily spawn.
///
/// Exactly one handle exists per wait operation; whichever backend backs it
/// is released on drop, on every outcome path.
#[derive(Debug)]
pub enum ProcessHandle {
    PidFd(PidFd),
    Probe(ProbeHandle),
}

impl ProcessHandle {
    /// Acquires a handle to the process, without blocking. A PID that names
    /// no live process fails here, not in [`wait`](Self::wait).
    pub fn acquire(pid: u32) -> Result<Self, AcquireError> {
        // 1. try pidfd
        match PidFd::open(pid) {
            // kernel 5.2- doesn't support pidfd_open, fall back to probing
            Err(e) if e.is_unsupported() => (),
            r => return r.map(Self::PidFd),
        }

        // 2. probe existence with kill(pid, 0)
        ProbeHandle::open(pid).map(Self::Probe)
    }

    /// Blocks until the process exits, the timeout elapses, or the wait
    /// fails. `None` waits indefinitely, `Some(Duration::ZERO)` polls once.
    /// Exactly one attempt; failures are classified, never retried.
    pub fn wait(&self, timeout: Option<Duration>) -> WaitOutcome {
        match self {
            Self::PidFd(fd) => fd.wait(timeout),
            Self::Probe(probe) => probe.wait(timeout),
        }
    }

    #[inline]
    pub fn is_exited(&self) -> Result<bool, WaitError> {
        match self {
            Self::PidFd(fd) => fd.is_exited(),
            Self::Probe(probe) => probe.is_exited(),
        }
    }
}

/// One-shot acquire-and-wait.
pub fn wait_for(pid: u32, timeout: Option<Duration>) -> WaitOutcome {
    match ProcessHandle::acquire(pid) {
        Ok(handle) => handle.wait(timeout),
        Err(e) => WaitOutcome::Failed(e.into()),
    }
}

#[cfg(not(target_os = "linux"))]
compile_error!("pidwait only supports Linux");
