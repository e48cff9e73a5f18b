use super::listener::TcpListener;
use super::stream::TcpStream;
use crate::error;
use crate::task;

use std::future::Future;
use std::net::SocketAddr;
use std::rc::Rc;

/// Per-connection request handling, supplied by the application.
///
/// `handle_request` owns the accepted stream for the lifetime of the
/// returned future; the server guarantees it runs on the reactor thread
/// and nowhere else (§6).
pub trait Handler {
    fn handle_request(&self, stream: TcpStream) -> impl Future<Output = ()> + 'static;
}

/// An accept loop bound to a [`TcpListener`], dispatching each accepted
/// connection to a [`Handler`].
///
/// [`Server::serve`] never returns on success: it loops `accept`, and for
/// every connection spawns the handler's future and detaches it — the
/// accept loop does not wait for a handler to finish before accepting the
/// next connection. A detached handler task is self-owned (its `Rc<Task<T>>`
/// is kept alive by the reactor's ready-queue/waker graph) and is torn down
/// automatically once its future completes; there is no registry to manage.
pub struct Server<H> {
    listener: TcpListener,
    handler: Rc<H>,
}

impl<H: Handler + 'static> Server<H> {
    /// Binds `address` and pairs the resulting listener with `handler`.
    pub fn bind(address: &str, handler: H) -> error::Result<Self> {
        Ok(Self {
            listener: TcpListener::bind(address)?,
            handler: Rc::new(handler),
        })
    }

    /// Returns the address the underlying listener is bound to.
    pub fn local_addr(&self) -> error::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop. Returns only if `accept` itself fails with a
    /// non-retryable error; a single misbehaving connection cannot bring
    /// the loop down since the handler's errors are confined to its own
    /// detached task.
    pub async fn serve(&self) -> error::Result<()> {
        loop {
            let (stream, _addr) = self.listener.accept().await?;
            let handler = self.handler.clone();
            task::spawn(async move {
                handler.handle_request(stream).await;
            });
        }
    }
}
