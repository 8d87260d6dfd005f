use std::io;

use thiserror::Error;

/// A waitable handle could not be acquired for a PID.
///
/// The PID named no live process, the caller lacked permission to reference
/// it, or the value was not representable as a process identifier at all.
/// Acquisition is never retried.
#[derive(Debug, Error)]
#[error("failed looking for process {pid}: {source}")]
pub struct AcquireError {
    pub pid: u32,
    pub source: io::Error,
}

impl AcquireError {
    /// True when the kernel lacks the pidfd mechanism (pre-5.2).
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        self.source.kind() == io::ErrorKind::Unsupported
    }
}

/// Why a single wait operation failed.
///
/// A timeout is not a failure; it is reported as
/// [`WaitOutcome::TimedOut`](crate::WaitOutcome::TimedOut).
#[derive(Debug, Error)]
pub enum WaitError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    /// The event wait itself reported an OS error.
    #[error("failed polling process {pid}: {source}")]
    Poll { pid: u32, source: io::Error },

    /// The wait returned ready, but with event bits other than readiness.
    ///
    /// Silently accepting this would mask a handle type change or kernel
    /// behavior the wait was not written for, so it is a failure.
    #[error("unexpected event received for process {pid}: {events:#x}")]
    UnexpectedEvents { pid: u32, events: u16 },
}
