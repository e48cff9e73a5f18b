//! # fibra
//!
//! **fibra** is the asynchronous I/O core of a small server framework: a
//! single-threaded cooperative task runtime glued to an edge-triggered
//! readiness reactor, TCP acceptor/stream abstractions built on it, and an
//! incremental HTTP/1 request/status-line parser.
//!
//! Unlike general-purpose runtimes like Tokio or async-std, fibra makes no
//! attempt to be one. There is no work-stealing scheduler, no multi-thread
//! executor, and no `Send`/`Sync` story: every task runs on the thread that
//! spawned it, internal state is `Rc`/`RefCell`, and the public types are
//! deliberately `!Send` and `!Sync`. The payoff is a scheduler small enough
//! to read in one sitting and a reactor with exactly one source of
//! readiness truth per thread.
//!
//! fibra offers:
//!
//! - A **cooperative task runtime** ([`spawn`], [`block_on`]) built directly
//!   on `std::future::Future`, with eager-start semantics and a custom
//!   single-threaded [`Waker`](std::task::Waker) vtable.
//! - A **per-thread reactor** driving Linux `epoll` in edge-triggered mode,
//!   exposing readiness to futures through a single-slot listener
//!   abstraction.
//! - **Async TCP networking** ([`net`]) — [`net::TcpListener`] and
//!   [`net::TcpStream`], plus a [`net::Handler`]/[`net::Server`] pair for
//!   running an accept loop that dispatches each connection to a detached
//!   handler task.
//! - An **incremental HTTP/1 head parser** ([`http`]) that classifies a
//!   growing byte buffer as a complete request or response head, an
//!   incomplete prefix, or a parse error, without ever copying the body.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use fibra::net::{Handler, Server, TcpStream};
//! use fibra::block_on;
//! use std::future::Future;
//!
//! struct Echo;
//!
//! impl Handler for Echo {
//!     fn handle_request(&self, stream: TcpStream) -> impl Future<Output = ()> + 'static {
//!         async move {
//!             let mut buf = [0u8; 1024];
//!             while let Ok(n) = stream.read_at_most(&mut buf).await {
//!                 if stream.send_all(&buf[..n]).await.is_err() {
//!                     break;
//!                 }
//!             }
//!         }
//!     }
//! }
//!
//! fn main() {
//!     block_on(async {
//!         let server = Server::bind("127.0.0.1:7000", Echo).unwrap();
//!         server.serve().await.unwrap();
//!     });
//! }
//! ```
//!
//! ## Modules
//!
//! - [`block_on`] — drives the current thread's reactor until a future
//!   resolves; [`spawn`] and [`JoinHandle`] — the task primitives it's
//!   built on
//! - [`net`] — TCP listener, stream, and server/handler glue
//! - [`http`] — the HTTP/1 head parser
//! - [`buf`] — a growable byte buffer for accumulating partial reads
//! - [`error`] — the crate's error taxonomy
//!
//! ## Non-goals
//!
//! No process entry point, logging, CLI parsing, or configuration layer;
//! no TLS; no HTTP body or chunked-encoding handling; no URI parsing or
//! response serialization; no multi-threaded worker pools; no timers or
//! deadlines. These are left to the surrounding application.

mod reactor;
mod task;
mod utils;

pub mod buf;
pub mod error;
pub mod http;
pub mod net;

pub use reactor::block_on;
pub use task::{spawn, JoinHandle};
