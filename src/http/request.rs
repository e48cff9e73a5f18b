use super::grammar::{
    Scan, ScanResult, scan_eol, scan_fields, scan_http_version, scan_target, scan_token,
    to_owned_string,
};
use super::{Field, HttpParseError, ParseOutcome};

/// A parsed HTTP/1 request-line plus header-field section.
///
/// ```
/// use fibra::http::{ParseOutcome, RequestHead};
///
/// let buf = b"GET /x HTTP/1.1\r\nHost: a\r\n\r\nBODY";
/// match RequestHead::parse(buf).unwrap() {
///     ParseOutcome::Complete { head, remainder } => {
///         assert_eq!(head.method, "GET");
///         assert_eq!(head.target, "/x");
///         assert_eq!(remainder, b"BODY");
///     }
///     ParseOutcome::Incomplete => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub target: String,
    pub version: String,
    pub fields: Vec<Field>,
}

impl RequestHead {
    /// Attempts to parse a request-line and header section out of `buf`.
    ///
    /// On `Complete`, `remainder` is the suffix of `buf` following the
    /// blank line that ends the head — typically the start of the request
    /// body, or empty. `buf` is never mutated and nothing is consumed on
    /// `Incomplete` or error; the caller re-parses from the same offset
    /// once more bytes have arrived.
    pub fn parse(buf: &[u8]) -> Result<ParseOutcome<'_, RequestHead>, HttpParseError> {
        match scan(buf) {
            Ok((head, consumed)) => Ok(ParseOutcome::Complete {
                head,
                remainder: &buf[consumed..],
            }),
            Err(Scan::Incomplete) => Ok(ParseOutcome::Incomplete),
            Err(Scan::Invalid(reason)) => Err(HttpParseError(reason)),
        }
    }
}

fn scan(buf: &[u8]) -> ScanResult<(RequestHead, usize)> {
    let method_end = scan_token(buf, 0)?;
    if method_end >= buf.len() {
        return Err(Scan::Incomplete);
    }
    if buf[method_end] != b' ' {
        return Err(Scan::Invalid("Invalid separator following method"));
    }

    let target_begin = method_end + 1;
    let target_end = scan_target(buf, target_begin)?;
    if target_end >= buf.len() {
        return Err(Scan::Incomplete);
    }
    if buf[target_end] != b' ' {
        return Err(Scan::Invalid("Invalid separator following target"));
    }

    let version_begin = target_end + 1;
    let version_end = scan_http_version(buf, version_begin)?;
    let line_end = scan_eol(buf, version_end)?;

    let mut fields = Vec::new();
    let after_fields = scan_fields(buf, line_end, &mut fields)?;
    let head_end = scan_eol(buf, after_fields)?;

    let head = RequestHead {
        method: to_owned_string(buf, 0, method_end),
        target: to_owned_string(buf, target_begin, target_end),
        version: to_owned_string(buf, version_begin, version_end),
        fields,
    };

    Ok((head, head_end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(buf: &[u8]) -> (RequestHead, &[u8]) {
        match RequestHead::parse(buf).expect("parse error") {
            ParseOutcome::Complete { head, remainder } => (head, remainder),
            ParseOutcome::Incomplete => panic!("expected Complete, got Incomplete"),
        }
    }

    #[test]
    fn happy_request() {
        let (head, remainder) = complete(b"GET /x HTTP/1.1\r\nHost: a\r\n\r\nBODY");
        assert_eq!(head.method, "GET");
        assert_eq!(head.target, "/x");
        assert_eq!(head.version, "HTTP/1.1");
        assert_eq!(head.fields, vec![("Host".to_string(), "a".to_string())]);
        assert_eq!(remainder, b"BODY");
    }

    #[test]
    fn split_arrival_byte_at_a_time() {
        let full = b"GET /x HTTP/1.1\r\nHost: a\r\n\r\nBODY";
        let head_len = full.len() - b"BODY".len();

        for n in 0..head_len {
            match RequestHead::parse(&full[..n]).expect("parse error") {
                ParseOutcome::Incomplete => {}
                ParseOutcome::Complete { .. } => {
                    panic!("prefix of length {n} reported Complete prematurely")
                }
            }
        }

        let (head, remainder) = complete(full);
        assert_eq!(head.target, "/x");
        assert_eq!(remainder, b"BODY");
    }

    #[test]
    fn lone_lf_terminators() {
        let (head, remainder) = complete(b"GET / HTTP/1.0\nX: y\n\n");
        assert_eq!(head.version, "HTTP/1.0");
        assert_eq!(head.fields, vec![("X".to_string(), "y".to_string())]);
        assert_eq!(remainder, b"");
    }

    #[test]
    fn bad_separator_between_method_and_target() {
        let err = RequestHead::parse(b"GET\t/ HTTP/1.1\r\n\r\n").unwrap_err();
        assert_eq!(err.0, "Invalid separator following method");
    }

    #[test]
    fn unsupported_version() {
        let err = RequestHead::parse(b"GET / HTTP/2.0\r\n\r\n").unwrap_err();
        assert_eq!(err.0, "Invalid http version");
    }

    #[test]
    fn field_order_is_preserved() {
        let (head, _) = complete(b"GET / HTTP/1.1\r\nB: 2\r\nA: 1\r\nC: 3\r\n\r\n");
        assert_eq!(
            head.fields,
            vec![
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string()),
                ("C".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn parse_is_deterministic() {
        let buf: &[u8] = b"GET / HTTP/1.1\r\nHost: a\r\n\r\n";
        let (first, rem1) = complete(buf);
        let (second, rem2) = complete(buf);
        assert_eq!(first, second);
        assert_eq!(rem1, rem2);
    }

    #[test]
    fn empty_buffer_is_incomplete() {
        assert_eq!(RequestHead::parse(b"").unwrap(), ParseOutcome::Incomplete);
    }
}
