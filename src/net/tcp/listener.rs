use super::stream::TcpStream;
use crate::error::{self, SystemError};
use crate::reactor::poller::common::Interest;
use crate::reactor::poller::platform::{
    sys_bind, sys_close, sys_ipv6_is_necessary, sys_listen, sys_parse_sockaddr, sys_set_reuse,
    sys_socket, sys_sockname,
};
use crate::reactor::{future, Listener};

use std::net::SocketAddr;

/// A non-blocking TCP listener, registered with the current thread's
/// reactor.
///
/// The async counterpart of [`std::net::TcpListener`]: [`bind`](Self::bind)
/// performs the same socket/bind/listen sequence, but [`accept`](Self::accept)
/// suspends the calling task instead of blocking the thread.
pub struct TcpListener {
    listener: Listener,
}

impl TcpListener {
    /// Binds to `address` (`"ip:port"`, v4 or v6).
    ///
    /// Creates a non-blocking socket, sets `SO_REUSEADDR` and
    /// `SO_REUSEPORT`, binds, and starts listening with the crate's fixed
    /// backlog (§4.3: "a small constant (≥128)"), then registers the
    /// socket with the reactor for edge-triggered readability.
    pub fn bind(address: &str) -> error::Result<Self> {
        let (storage, len) =
            sys_parse_sockaddr(address).map_err(|e| SystemError::wrap("parse address", e))?;
        let domain = storage.ss_family as i32;

        let fd = sys_socket(domain).map_err(|e| SystemError::wrap("socket", e))?;

        // Every step from here on must close `fd` on failure: nothing else
        // owns it until `Listener::register` below succeeds.
        let setup: error::Result<()> = (|| {
            sys_set_reuse(fd).map_err(|e| SystemError::wrap("setsockopt", e))?;
            sys_ipv6_is_necessary(fd, domain)
                .map_err(|e| SystemError::wrap("setsockopt(IPV6_V6ONLY)", e))?;
            sys_bind(fd, &storage, len).map_err(|e| SystemError::wrap("bind", e))?;
            sys_listen(fd).map_err(|e| SystemError::wrap("listen", e))?;
            Ok(())
        })();

        if let Err(e) = setup {
            sys_close(fd);
            return Err(e);
        }

        let listener = match Listener::register(fd, Interest::READ) {
            Ok(listener) => listener,
            Err(e) => {
                sys_close(fd);
                return Err(SystemError::wrap("epoll_ctl(ADD)", e).into());
            }
        };

        Ok(Self { listener })
    }

    /// Suspends until a connection arrives, then returns the accepted
    /// stream and the peer's address.
    pub async fn accept(&self) -> error::Result<(TcpStream, SocketAddr)> {
        let (fd, addr) = future::accept(&self.listener).await?;
        Ok((TcpStream::new(fd)?, addr))
    }

    /// Returns the address this listener is bound to.
    pub fn local_addr(&self) -> error::Result<SocketAddr> {
        sys_sockname(self.listener.fd())
            .map_err(|e| crate::error::SystemError::wrap("getsockname", e).into())
    }
}
