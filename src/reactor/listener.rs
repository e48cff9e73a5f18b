//! The reactor-side registration behind every socket.
//!
//! A `Listener` owns a raw file descriptor and its slot in the reactor's
//! registry. Waiting for readiness never touches the descriptor's contents —
//! the owning [`crate::net::tcp`] type drives the actual syscall and calls
//! [`Listener::wait`] only after seeing `EAGAIN`.

use crate::reactor::poller::common::Interest;
use crate::reactor::poller::platform::{sys_close, RawFd};
use crate::reactor::{self, ReactorHandle};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

pub(crate) struct Listener {
    fd: RawFd,
    token: usize,
    reactor: ReactorHandle,
}

impl Listener {
    /// Registers `fd` with the current thread's reactor under `interest`.
    pub(crate) fn register(fd: RawFd, interest: Interest) -> std::io::Result<Self> {
        let reactor = reactor::current();
        let token = reactor.borrow_mut().register(fd, interest)?;

        Ok(Self {
            fd,
            token,
            reactor,
        })
    }

    pub(crate) fn fd(&self) -> RawFd {
        self.fd
    }

    /// Returns a future that resolves the next time the poller reports
    /// readiness for this descriptor.
    ///
    /// Only one `wait()` future may be outstanding per `Listener` at a time —
    /// the reactor holds a single continuation slot per registration, not a
    /// queue. Calling `.await` on a second one before the first resolves is a
    /// misuse of the one-task-per-socket-operation contract and panics.
    pub(crate) fn wait(&self) -> ListenerWait<'_> {
        ListenerWait {
            listener: self,
            registered: false,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.reactor.borrow_mut().unregister(self.token, self.fd);
        sys_close(self.fd);
    }
}

pub(crate) struct ListenerWait<'a> {
    listener: &'a Listener,
    registered: bool,
}

impl Future for ListenerWait<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.registered {
            return Poll::Ready(());
        }

        self.registered = true;
        self.listener
            .reactor
            .borrow_mut()
            .install_waiter(self.listener.token, cx.waker().clone());

        Poll::Pending
    }
}
