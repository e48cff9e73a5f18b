//! Byte-level scanning primitives shared by the request-line, status-line,
//! and header-field parsers.
//!
//! Every `scan_*` function takes a cursor position into a byte slice and
//! returns the position just past what it recognized. None of them copy or
//! allocate; the caller slices out the recognized range once a whole
//! grammar production (a field, a line) has been confirmed complete.

/// Either a grammar production doesn't fit in the buffer yet, or the bytes
/// present violate the grammar outright.
///
/// Kept internal to the module: callers at the `RequestHead`/`ResponseHead`
/// level turn this into `Ok(ParseOutcome::Incomplete)` or
/// `Err(HttpParseError)` respectively, so "read more" and "malformed" never
/// share a representation past this boundary.
pub(super) enum Scan {
    Incomplete,
    Invalid(&'static str),
}

pub(super) type ScanResult<T> = Result<T, Scan>;

pub(super) fn is_tchar(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// VCHAR plus octets >= 0x20 except DEL, i.e. every byte a `reason` or
/// `field-value` may contain.
pub(super) fn is_vchar_obs(c: u8) -> bool {
    c >= 0x20 && c != 0x7f
}

/// Scans a `token` (1*tchar) starting at `pos`. Returns the index of the
/// first non-tchar byte. `Incomplete` if the run of tchars reaches the end
/// of the buffer without a terminator in sight.
pub(super) fn scan_token(buf: &[u8], pos: usize) -> ScanResult<usize> {
    let mut p = pos;
    while p < buf.len() {
        if !is_tchar(buf[p]) {
            return Ok(p);
        }
        p += 1;
    }
    Err(Scan::Incomplete)
}

/// Scans a request `target`: any byte up to the next space.
///
/// Mirrors the reference parser's shortcut of treating the target as an
/// opaque run of non-space bytes rather than validating it against the URI
/// grammar (full URI parsing is an explicit out-of-scope collaborator).
pub(super) fn scan_target(buf: &[u8], pos: usize) -> ScanResult<usize> {
    let mut p = pos;
    while p < buf.len() {
        if buf[p] == b' ' {
            return Ok(p);
        }
        p += 1;
    }
    Err(Scan::Incomplete)
}

/// Length of `"HTTP/1.x"`, the only `http-version` this parser accepts.
pub(super) const HTTP_VERSION_LEN: usize = 8;

/// Scans an `http-version` token. Requires the full 8 bytes to be present
/// before judging them, so a short buffer yields `Incomplete` rather than
/// partially matching the `"HTTP/1."` prefix and guessing.
pub(super) fn scan_http_version(buf: &[u8], pos: usize) -> ScanResult<usize> {
    if buf.len() - pos < HTTP_VERSION_LEN {
        return Err(Scan::Incomplete);
    }

    if &buf[pos..pos + 7] != b"HTTP/1." {
        return Err(Scan::Invalid("Invalid http version"));
    }

    match buf[pos + 7] {
        b'0' | b'1' => Ok(pos + HTTP_VERSION_LEN),
        _ => Err(Scan::Invalid("Invalid http version")),
    }
}

/// Scans a line terminator starting at `pos`: an optional CR followed by a
/// mandatory LF, or a lone LF. Returns the index just past the terminator.
///
/// Used both for the CRLF ending a request-line/status-line/field-line and
/// for the blank line ending the header section (§4.5 invariant 4 and 5).
pub(super) fn scan_eol(buf: &[u8], pos: usize) -> ScanResult<usize> {
    if pos >= buf.len() {
        return Err(Scan::Incomplete);
    }

    let mut p = pos;
    if buf[p] == b'\r' {
        p += 1;
        if p >= buf.len() {
            return Err(Scan::Incomplete);
        }
    }

    if buf[p] != b'\n' {
        return Err(Scan::Invalid("Invalid CRLF"));
    }

    Ok(p + 1)
}

/// Scans the run of bytes up to (not including) the next CR or LF,
/// validating each byte as `vchar-obs`. Used for `reason` and
/// `field-value`.
pub(super) fn scan_vchar_obs_run(buf: &[u8], pos: usize) -> ScanResult<usize> {
    let mut p = pos;
    loop {
        if p >= buf.len() {
            return Err(Scan::Incomplete);
        }
        let c = buf[p];
        if c == b'\r' || c == b'\n' {
            return Ok(p);
        }
        if !is_vchar_obs(c) {
            return Err(Scan::Invalid("Invalid character"));
        }
        p += 1;
    }
}

/// Scans one `field-line` starting at `pos`, appending the recognized
/// `(name, value)` pair to `fields`. Returns the index just past the
/// field's terminating line break.
pub(super) fn scan_field(buf: &[u8], pos: usize, fields: &mut Vec<(String, String)>) -> ScanResult<usize> {
    let name_end = scan_token(buf, pos)?;
    if name_end >= buf.len() {
        return Err(Scan::Incomplete);
    }
    if buf[name_end] != b':' {
        return Err(Scan::Invalid("Invalid separator after field name"));
    }

    let mut value_begin = name_end + 1;
    loop {
        if value_begin >= buf.len() {
            return Err(Scan::Incomplete);
        }
        if buf[value_begin] != b' ' {
            break;
        }
        value_begin += 1;
    }

    let value_end = scan_vchar_obs_run(buf, value_begin)?;
    let eol_end = scan_eol(buf, value_end)?;

    fields.push((
        to_owned_string(buf, pos, name_end),
        to_owned_string(buf, value_begin, value_end),
    ));

    Ok(eol_end)
}

/// Scans every `field-line` up to (not including) the blank line that ends
/// the header section. Only ever appends to `fields` (§4.5 invariant 2):
/// on error the caller discards the whole head rather than trusting a
/// partial `fields` list.
pub(super) fn scan_fields(buf: &[u8], pos: usize, fields: &mut Vec<(String, String)>) -> ScanResult<usize> {
    let mut p = pos;
    loop {
        if p >= buf.len() {
            return Err(Scan::Incomplete);
        }
        if buf[p] == b'\r' || buf[p] == b'\n' {
            return Ok(p);
        }
        p = scan_field(buf, p, fields)?;
    }
}

/// Converts a recognized byte range to an owned `String`.
///
/// The grammar admits arbitrary `vchar-obs` octets (including bytes outside
/// valid UTF-8), so this is lossy rather than a hard `from_utf8` — every
/// byte this parser actually validates (ASCII `tchar`s, printable ASCII
/// targets/status codes) round-trips exactly; only obs-text octets in a
/// `reason`/`field-value` can be affected.
pub(super) fn to_owned_string(buf: &[u8], begin: usize, end: usize) -> String {
    String::from_utf8_lossy(&buf[begin..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_stops_at_first_non_tchar() {
        assert_eq!(scan_token(b"GET /x", 0), Ok(3));
    }

    #[test]
    fn token_incomplete_without_terminator() {
        assert!(matches!(scan_token(b"GET", 0), Err(Scan::Incomplete)));
    }

    #[test]
    fn http_version_requires_full_width() {
        assert!(matches!(
            scan_http_version(b"HTTP/1.", 0),
            Err(Scan::Incomplete)
        ));
        assert!(matches!(
            scan_http_version(b"HTTP/2.0", 0),
            Err(Scan::Invalid(_))
        ));
        assert_eq!(scan_http_version(b"HTTP/1.1x", 0), Ok(8));
    }

    #[test]
    fn eol_accepts_lone_lf_and_crlf() {
        assert_eq!(scan_eol(b"\nrest", 0), Ok(1));
        assert_eq!(scan_eol(b"\r\nrest", 0), Ok(2));
        assert!(matches!(scan_eol(b"\rX", 0), Err(Scan::Invalid(_))));
    }
}
