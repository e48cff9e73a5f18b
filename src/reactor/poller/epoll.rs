//! Linux `epoll`-based poller, in edge-triggered mode.
//!
//! `EPOLLET` is set on every registration: the kernel reports a readiness
//! transition exactly once, and callers (the `*Future`s in
//! [`crate::reactor::future`]) are responsible for draining the descriptor
//! until it reports `EAGAIN` before they suspend again. `EPOLLRDHUP` is
//! always monitored alongside the requested interest so that a half-closed
//! peer wakes a pending read rather than hanging forever.

use super::common::Interest;
use crate::reactor::event::Event;

use libc::{
    EPOLL_CLOEXEC, EPOLL_CTL_ADD, EPOLL_CTL_DEL, EPOLLERR, EPOLLET, EPOLLHUP, EPOLLIN, EPOLLOUT,
    EPOLLRDHUP, epoll_create1, epoll_ctl, epoll_event, epoll_wait,
};
use std::io;
use std::os::unix::io::RawFd;
use std::time::Duration;

fn flags_for(interest: Interest) -> u32 {
    let mut flags = (EPOLLET | EPOLLRDHUP) as u32;

    if interest.read {
        flags |= EPOLLIN as u32;
    }
    if interest.write {
        flags |= EPOLLOUT as u32;
    }

    flags
}

/// Linux `epoll` poller.
pub(crate) struct EpollPoller {
    epoll: RawFd,
    events: Vec<epoll_event>,
}

impl EpollPoller {
    /// Creates the underlying `epoll` instance.
    pub(crate) fn new() -> io::Result<Self> {
        let epoll = unsafe { epoll_create1(EPOLL_CLOEXEC) };
        if epoll < 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(Self {
            epoll,
            events: Vec::with_capacity(256),
        })
    }

    /// Registers a file descriptor for edge-triggered readiness.
    pub(crate) fn register(&self, fd: RawFd, token: usize, interest: Interest) -> io::Result<()> {
        let mut event = epoll_event {
            events: flags_for(interest),
            u64: token as u64,
        };

        let rc = unsafe { epoll_ctl(self.epoll, EPOLL_CTL_ADD, fd, &mut event) };
        if rc < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }

    /// Removes a file descriptor from the poller.
    pub(crate) fn deregister(&self, fd: RawFd) {
        unsafe {
            epoll_ctl(self.epoll, EPOLL_CTL_DEL, fd, std::ptr::null_mut());
        }
    }

    /// Blocks for readiness, retrying internally on `EINTR`.
    ///
    /// `timeout` of `None` blocks indefinitely, matching the reactor's
    /// default `run()` behavior; a `Some` timeout is used by `block_on` to
    /// avoid blocking forever once there is no more outstanding I/O.
    pub(crate) fn poll(
        &mut self,
        events: &mut Vec<Event>,
        timeout: Option<Duration>,
    ) -> io::Result<()> {
        let timeout_ms = timeout
            .map(|t| t.as_millis().min(i32::MAX as u128) as i32)
            .unwrap_or(-1);

        if self.events.capacity() == 0 {
            self.events.reserve(256);
        }

        unsafe {
            self.events.set_len(self.events.capacity());
        }

        let n = loop {
            let n = unsafe {
                epoll_wait(
                    self.epoll,
                    self.events.as_mut_ptr(),
                    self.events.capacity() as i32,
                    timeout_ms,
                )
            };

            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                unsafe { self.events.set_len(0) };
                return Err(err);
            }

            break n;
        };

        unsafe {
            self.events.set_len(n as usize);
        }

        events.clear();
        for ev in &self.events {
            let token = ev.u64 as usize;
            let readable = ev.events & ((EPOLLIN | EPOLLERR | EPOLLHUP | EPOLLRDHUP) as u32) != 0;
            let writable = ev.events & ((EPOLLOUT | EPOLLERR | EPOLLHUP) as u32) != 0;

            events.push(Event {
                token,
                readable,
                writable,
            });
        }

        Ok(())
    }
}

impl Drop for EpollPoller {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.epoll);
        }
    }
}
