//! The reactor: edge-triggered readiness plus a single-threaded ready queue.
//!
//! There is one reactor per thread, built lazily and never shared across
//! threads — see [`core`] for the thread-local singleton and run loop, and
//! [`listener`] for the per-descriptor registration every socket and
//! stream-reading future waits on.

mod core;
mod event;
mod listener;

pub(crate) mod future;
pub(crate) mod poller;

pub(crate) use core::{ReactorHandle, current, push_ready};
pub(crate) use listener::Listener;

pub use core::block_on;
