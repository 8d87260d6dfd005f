//! Waiting through a pidfd, the primary backend.
//!
//! `pidfd_open(2)` hands out a file descriptor that becomes readable exactly
//! when the process terminates, so acquisition and wait-readiness are the
//! same kernel object and there is no window between "check it exists" and
//! "start waiting". Requires kernel 5.2.

use std::{os::fd::OwnedFd, time::Duration};

use rustix::{
    event::{poll, PollFd, PollFlags},
    process::{pidfd_open, PidfdFlags},
};

use crate::{
    backends::to_pid,
    error::{AcquireError, WaitError},
    WaitOutcome,
};

/// A pidfd, closed on drop.
#[derive(Debug)]
pub struct PidFd {
    pid: u32,
    fd: OwnedFd,
}

impl PidFd {
    pub fn open(pid: u32) -> Result<Self, AcquireError> {
        let target = to_pid(pid)?;

        match pidfd_open(target, PidfdFlags::empty()) {
            Ok(fd) => Ok(Self { pid, fd }),
            Err(errno) => Err(AcquireError {
                pid,
                source: errno.into(),
            }),
        }
    }

    /// Blocks until the process exits, the timeout elapses, or the poll
    /// fails. `None` waits indefinitely, `Some(Duration::ZERO)` polls once.
    pub fn wait(&self, timeout: Option<Duration>) -> WaitOutcome {
        let timeout = match timeout {
            Some(dur) => dur.as_millis().try_into().unwrap_or(i32::MAX),
            None => -1, // infinity
        };

        let mut fds = [PollFd::new(&self.fd, PollFlags::IN)];

        match poll(&mut fds, timeout) {
            Err(errno) => WaitOutcome::Failed(WaitError::Poll {
                pid: self.pid,
                source: errno.into(),
            }),
            Ok(0) => WaitOutcome::TimedOut,
            Ok(_) => {
                let revents = fds[0].revents();
                if revents.contains(PollFlags::IN) {
                    WaitOutcome::Exited
                } else {
                    WaitOutcome::Failed(WaitError::UnexpectedEvents {
                        pid: self.pid,
                        events: revents.bits(),
                    })
                }
            }
        }
    }

    #[inline]
    pub fn is_exited(&self) -> Result<bool, WaitError> {
        match self.wait(Some(Duration::ZERO)) {
            WaitOutcome::Exited => Ok(true),
            WaitOutcome::TimedOut => Ok(false),
            WaitOutcome::Failed(e) => Err(e),
        }
    }
}
