//! The acquire-drain-suspend loop (§4.3) every non-blocking TCP operation
//! is built from.
//!
//! Each function here is the Rust realization of:
//!
//! ```text
//! loop:
//!     attempt the syscall
//!     if success: return value
//!     if EAGAIN/EWOULDBLOCK: await listener.wait(); loop
//!     if EINTR: loop
//!     else: raise SystemError(operation, errno)
//! ```
//!
//! written as a plain `async fn` rather than a hand-rolled `Future` impl:
//! `listener.wait()` is already a future, so looping around an `.await` of
//! it gets the compiler to generate the suspend/resume state machine for
//! us, including across the borrowed buffer these functions hold live over
//! the suspension point.

use crate::error::{self, Error, SystemError};
use crate::reactor::Listener;
use crate::reactor::poller::platform::{RawFd, sys_accept, sys_read, sys_write};

use std::io;
use std::net::SocketAddr;

fn is_retryable(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::EAGAIN) | Some(libc::EWOULDBLOCK)
    )
}

fn is_interrupted(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EINTR)
}

/// Accepts one connection on `listener`'s descriptor, suspending on
/// `EAGAIN` until the reactor reports readability.
pub(crate) async fn accept(listener: &Listener) -> error::Result<(RawFd, SocketAddr)> {
    loop {
        match sys_accept(listener.fd()) {
            Ok(pair) => return Ok(pair),
            Err(err) if is_retryable(&err) => listener.wait().await,
            Err(err) if is_interrupted(&err) => continue,
            Err(err) => return Err(SystemError::wrap("accept", err).into()),
        }
    }
}

/// Reads into `buf`, suspending on `EAGAIN` until readable.
///
/// A zero-length read is an orderly peer close (§4.3) and is surfaced as
/// [`Error::EndOfStream`] rather than `Ok(0)`.
pub(crate) async fn read(listener: &Listener, buf: &mut [u8]) -> error::Result<usize> {
    loop {
        let n = sys_read(listener.fd(), buf);

        if n > 0 {
            return Ok(n as usize);
        }
        if n == 0 {
            return Err(Error::EndOfStream);
        }

        let err = io::Error::last_os_error();
        if is_retryable(&err) {
            listener.wait().await;
        } else if is_interrupted(&err) {
            continue;
        } else {
            return Err(SystemError::wrap("read", err).into());
        }
    }
}

/// Writes `buf`, suspending on `EAGAIN` until writable.
///
/// Unlike `read`, a zero-length return from the underlying `send` is
/// passed through as `Ok(0)` rather than treated as end-of-stream — POSIX
/// only documents that convention for `recv` (see DESIGN.md). It is
/// [`TcpStream::send_all`](crate::net::tcp::TcpStream::send_all)'s job to
/// turn a run of zero-progress writes into an error.
pub(crate) async fn write(listener: &Listener, buf: &[u8]) -> error::Result<usize> {
    loop {
        let n = sys_write(listener.fd(), buf);

        if n >= 0 {
            return Ok(n as usize);
        }

        let err = io::Error::last_os_error();
        if is_retryable(&err) {
            listener.wait().await;
        } else if is_interrupted(&err) {
            continue;
        } else {
            return Err(SystemError::wrap("write", err).into());
        }
    }
}
