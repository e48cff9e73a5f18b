//! The core's error taxonomy.
//!
//! Mirrors §7 of the design: a small closed set of kinds rather than a bare
//! `std::io::Error`, so a handler can match on *why* an operation failed
//! without string-sniffing. `HttpParseError` is kept as its own type (see
//! [`crate::http`]) rather than folded in here, since the parser's
//! "incomplete" signal is deliberately *not* modelled as an error at all.

use std::fmt;
use std::io;

/// A syscall failed with something other than `EAGAIN`/`EWOULDBLOCK` or
/// `EINTR`.
#[derive(Debug)]
pub struct SystemError {
    /// The operation that failed (`"accept"`, `"read"`, `"write"`, ...).
    pub op: &'static str,
    /// The underlying OS error.
    pub source: io::Error,
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.op, self.source)
    }
}

impl std::error::Error for SystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl SystemError {
    pub(crate) fn wrap(op: &'static str, source: io::Error) -> Self {
        Self { op, source }
    }
}

/// Every failure the reactor, task, or TCP layers can raise.
#[derive(Debug)]
pub enum Error {
    /// A non-recoverable syscall failure.
    System(SystemError),
    /// The peer closed the connection in the middle of a read or write.
    EndOfStream,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::System(e) => fmt::Display::fmt(e, f),
            Error::EndOfStream => write!(f, "end of stream"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::System(e) => Some(e),
            Error::EndOfStream => None,
        }
    }
}

impl From<SystemError> for Error {
    fn from(e: SystemError) -> Self {
        Error::System(e)
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::System(e) => e.source,
            Error::EndOfStream => io::Error::new(io::ErrorKind::UnexpectedEof, "end of stream"),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
