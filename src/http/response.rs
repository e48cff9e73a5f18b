use super::grammar::{
    Scan, ScanResult, scan_eol, scan_fields, scan_http_version, scan_vchar_obs_run,
    to_owned_string,
};
use super::{Field, HttpParseError, ParseOutcome};

/// A parsed HTTP/1 status-line plus header-field section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub version: String,
    pub code: u16,
    pub reason: String,
    pub fields: Vec<Field>,
}

impl ResponseHead {
    /// Attempts to parse a status-line and header section out of `buf`.
    ///
    /// Same remainder/Incomplete/error contract as
    /// [`RequestHead::parse`](super::RequestHead::parse).
    pub fn parse(buf: &[u8]) -> Result<ParseOutcome<'_, ResponseHead>, HttpParseError> {
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

/// Number of status-code digits plus the separator byte that must follow
/// them, used for the up-front length check below.
const STATUS_CODE_AND_SEP_LEN: usize = 4;

fn scan(buf: &[u8]) -> ScanResult<(ResponseHead, usize)> {
    let version_end = scan_http_version(buf, 0)?;

    // The reference parser dereferences the byte after the recognized
    // version without checking it is present first — a latent
    // out-of-bounds read on truncated input (see DESIGN.md). This bound
    // check is the fix: `Incomplete` when the separator byte simply
    // hasn't arrived yet, `Invalid` only once it has and isn't a space.
    if version_end >= buf.len() {
        return Err(Scan::Incomplete);
    }
    if buf[version_end] != b' ' {
        return Err(Scan::Invalid("Invalid separator after http version"));
    }

    let code_begin = version_end + 1;
    if buf.len() - code_begin < STATUS_CODE_AND_SEP_LEN {
        return Err(Scan::Incomplete);
    }

    let mut code: u16 = 0;
    for &digit in &buf[code_begin..code_begin + 3] {
        if !digit.is_ascii_digit() {
            return Err(Scan::Invalid("Invalid status code"));
        }
        code = code * 10 + (digit - b'0') as u16;
    }

    let code_end = code_begin + 3;
    if buf[code_end] != b' ' {
        return Err(Scan::Invalid("Invalid separator after status code"));
    }

    let reason_begin = code_end + 1;
    let reason_end = scan_vchar_obs_run(buf, reason_begin)?;
    let line_end = scan_eol(buf, reason_end)?;

    let mut fields = Vec::new();
    let after_fields = scan_fields(buf, line_end, &mut fields)?;
    let head_end = scan_eol(buf, after_fields)?;

    let head = ResponseHead {
        version: to_owned_string(buf, 0, version_end),
        code,
        reason: to_owned_string(buf, reason_begin, reason_end),
        fields,
    };

    Ok((head, head_end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(buf: &[u8]) -> (ResponseHead, &[u8]) {
        match ResponseHead::parse(buf).expect("parse error") {
            ParseOutcome::Complete { head, remainder } => (head, remainder),
            ParseOutcome::Incomplete => panic!("expected Complete, got Incomplete"),
        }
    }

    #[test]
    fn happy_response() {
        let (head, remainder) =
            complete(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nhi");
        assert_eq!(head.version, "HTTP/1.1");
        assert_eq!(head.code, 200);
        assert_eq!(head.reason, "OK");
        assert_eq!(
            head.fields,
            vec![("Content-Length".to_string(), "2".to_string())]
        );
        assert_eq!(remainder, b"hi");
    }

    #[test]
    fn truncated_right_after_version_is_incomplete_not_a_panic() {
        assert_eq!(
            ResponseHead::parse(b"HTTP/1.1").unwrap(),
            ParseOutcome::Incomplete
        );
    }

    #[test]
    fn missing_space_after_version_is_an_error_once_the_byte_is_present() {
        let err = ResponseHead::parse(b"HTTP/1.1X200 OK\r\n\r\n").unwrap_err();
        assert_eq!(err.0, "Invalid separator after http version");
    }

    #[test]
    fn non_digit_status_code_is_rejected() {
        let err = ResponseHead::parse(b"HTTP/1.1 2AB OK\r\n\r\n").unwrap_err();
        assert_eq!(err.0, "Invalid status code");
    }

    #[test]
    fn empty_reason_phrase_is_allowed() {
        let (head, _) = complete(b"HTTP/1.1 204 \r\n\r\n");
        assert_eq!(head.code, 204);
        assert_eq!(head.reason, "");
    }
}
