use crate::error::{self, Error, SystemError};
use crate::reactor::poller::common::Interest;
use crate::reactor::poller::platform::{sys_close, RawFd};
use crate::reactor::{future, Listener};

/// A non-blocking TCP stream, registered with the current thread's reactor
/// for both readability and writability.
///
/// The async counterpart of [`std::net::TcpStream`]. Every method suspends
/// the calling task rather than blocking the thread; none of them retry
/// internally beyond what's needed to ride out `EAGAIN`/`EINTR` (§4.4).
pub struct TcpStream {
    listener: Listener,
}

impl TcpStream {
    /// Takes ownership of an already non-blocking, connected socket and
    /// registers it with the reactor.
    ///
    /// Used by [`TcpListener::accept`](super::listener::TcpListener::accept)
    /// on a freshly accepted descriptor — `sys_accept` already leaves the
    /// new descriptor non-blocking, so this only has to register it. Closes
    /// `fd` if registration fails, so callers never leak it on the error
    /// path.
    pub(crate) fn new(fd: RawFd) -> error::Result<Self> {
        let listener = match Listener::register(fd, Interest::READ_WRITE) {
            Ok(listener) => listener,
            Err(e) => {
                sys_close(fd);
                return Err(SystemError::wrap("epoll_ctl(ADD)", e).into());
            }
        };

        Ok(Self { listener })
    }

    /// Reads at least one byte into `buf`, returning the number of bytes
    /// actually read.
    ///
    /// Suspends until the socket is readable; never reads more than one
    /// `recv` worth of data, so `buf` need not be filled completely. A
    /// closed peer is reported as [`Error::EndOfStream`].
    pub async fn read_at_most(&self, buf: &mut [u8]) -> error::Result<usize> {
        future::read(&self.listener, buf).await
    }

    /// Reads until `buf` is completely filled.
    ///
    /// Loops [`read_at_most`](Self::read_at_most) over the remaining
    /// unfilled portion, advancing a cursor each time; a peer that closes
    /// before `buf` is full surfaces as [`Error::EndOfStream`] from the
    /// underlying read.
    pub async fn read_exact(&self, mut buf: &mut [u8]) -> error::Result<()> {
        while !buf.is_empty() {
            let n = self.read_at_most(buf).await?;
            buf = &mut buf[n..];
        }
        Ok(())
    }

    /// Writes at least one byte of `buf`, returning the number of bytes
    /// actually written.
    ///
    /// Suspends until the socket is writable. A return of `Ok(0)` is
    /// possible (the kernel accepted nothing this call) and is not an
    /// error by itself; see [`send_all`](Self::send_all).
    pub async fn send_at_most(&self, buf: &[u8]) -> error::Result<usize> {
        future::write(&self.listener, buf).await
    }

    /// Writes all of `buf`.
    ///
    /// Loops [`send_at_most`](Self::send_at_most) over the remaining
    /// unsent portion. The raw write future stays faithful to `send`'s
    /// `Ok(0)` result (§9), so this is the layer that turns a
    /// zero-progress write into a hard error rather than spinning on it
    /// forever.
    pub async fn send_all(&self, mut buf: &[u8]) -> error::Result<()> {
        while !buf.is_empty() {
            let n = self.send_at_most(buf).await?;
            if n == 0 {
                return Err(Error::System(SystemError::wrap(
                    "write",
                    std::io::Error::new(std::io::ErrorKind::WriteZero, "zero-length write"),
                )));
            }
            buf = &buf[n..];
        }
        Ok(())
    }
}
