//! Existence-probe fallback for kernels without `pidfd_open` (pre-5.2).
//!
//! Repeatedly checks `kill(pid, 0)` with exponential backoff instead of
//! blocking on a kernel object. This is a documented compromise, not an
//! equivalent: the PID may be reused between probes (the wait then follows
//! the wrong process), an exit is noticed up to one backoff interval late,
//! and a zombie counts as existing until its parent reaps it.

use std::{
    io::Error,
    thread,
    time::{Duration, Instant},
};

use rustix::process::Pid;

use crate::{
    backends::to_pid,
    error::{AcquireError, WaitError},
    utils::process_exists,
    WaitOutcome,
};

const INITIAL_BACKOFF: Duration = Duration::from_millis(10);
const MAX_BACKOFF: Duration = Duration::from_secs(1);

fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_BACKOFF)
}

/// A probed process. Holds no OS resource, only the identity to re-check.
#[derive(Debug)]
pub struct ProbeHandle {
    pid: Pid,
}

impl ProbeHandle {
    pub fn open(pid: u32) -> Result<Self, AcquireError> {
        let target = to_pid(pid)?;

        if !process_exists(target) {
            return Err(AcquireError {
                pid,
                source: Error::from_raw_os_error(libc::ESRCH),
            });
        }

        Ok(Self { pid: target })
    }

    /// Probes until the process is gone or the timeout elapses. `None`
    /// probes indefinitely, `Some(Duration::ZERO)` probes exactly once.
    pub fn wait(&self, timeout: Option<Duration>) -> WaitOutcome {
        let deadline = timeout.map(|dur| Instant::now() + dur);
        let mut backoff = INITIAL_BACKOFF;

        loop {
            if !process_exists(self.pid) {
                return WaitOutcome::Exited;
            }

            let interval = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return WaitOutcome::TimedOut;
                    }
                    backoff.min(remaining)
                }
                None => backoff,
            };

            thread::sleep(interval);
            backoff = next_backoff(backoff);
        }
    }

    #[inline]
    pub fn is_exited(&self) -> Result<bool, WaitError> {
        Ok(!process_exists(self.pid))
    }
}
