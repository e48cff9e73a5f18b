//! Incremental HTTP/1 request-line / status-line / header-field parser.
//!
//! Neither [`RequestHead`] nor [`ResponseHead`] owns a connection or does
//! any I/O; each is a pure function from an accumulated byte buffer to
//! either a fully parsed head plus the unconsumed remainder, or a signal
//! that more bytes are needed. Feeding growing prefixes of the same stream
//! is expected to be the normal calling convention (see
//! [`crate::net::tcp::TcpStream::read_at_most`]).
//!
//! `Incomplete` and a genuine grammar violation are different outcomes on
//! purpose: a caller that only read a prefix of a valid head must keep
//! reading, while a caller that hit malformed input must give up and close
//! the connection. Folding both into one error type would force the caller
//! to match on a reason string to tell them apart, so [`ParseOutcome`]
//! carries `Incomplete` as a variant of the success type instead.

mod grammar;
mod request;
mod response;

pub use request::RequestHead;
pub use response::ResponseHead;

use std::fmt;

/// A single header field, preserved in receipt order and not
/// case-normalized (§3: "Field names are not normalized by the parser").
pub type Field = (String, String);

/// The result of attempting to parse a head out of an accumulated buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseOutcome<'a, T> {
    /// A complete head was recognized. `remainder` is the unconsumed
    /// suffix of the input buffer — bytes belonging to whatever follows
    /// the head (a request body, or the next pipelined message).
    Complete { head: T, remainder: &'a [u8] },
    /// `buf` is a proper prefix of a valid head. The caller should read
    /// more bytes and call `parse` again from the same starting point;
    /// nothing has been consumed.
    Incomplete,
}

/// The input violates the grammar and cannot become valid by appending
/// more bytes. Carries a short, static description of what failed.
///
/// Retrying with a longer buffer is a caller error (§4.5 invariant 7): once
/// this is raised the accumulated bytes for this head should be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpParseError(pub &'static str);

impl fmt::Display for HttpParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP parse error: {}", self.0)
    }
}

impl std::error::Error for HttpParseError {}
