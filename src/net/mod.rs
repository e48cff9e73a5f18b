//! TCP networking primitives.
//!
//! This module provides asynchronous TCP networking types built
//! on top of the reactor.
//!
//! It exposes:
//! - [`TcpListener`], for accepting incoming TCP connections,
//! - [`TcpStream`], for non-blocking reads and writes on an accepted
//!   connection,
//! - [`Handler`] and [`Server`], for pairing a listener with per-connection
//!   request handling and running the accept loop.
//!
//! These types integrate directly with the reactor and should be used
//! instead of blocking `std::net` sockets.
mod tcp;

pub use tcp::listener::TcpListener;
pub use tcp::server::{Handler, Server};
pub use tcp::stream::TcpStream;
