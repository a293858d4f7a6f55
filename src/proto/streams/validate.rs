//! Request-side and response-side header validators, the header-block
//! completion checks, remote-end-of-stream reconciliation, and body
//! accounting. This is the bulk of the semantics described here.

use log::trace;

use super::state::{Flags, StreamHttpState, UNKNOWN_LENGTH};
use super::token::{classify, Token};
use crate::error::{HttpSemanticsError, Reason, SemanticsResult, StreamError};
use crate::peer::FrameKind;

/// Parse error for [`parse_uint`]. Zero-sized: there is exactly one way to
/// fail (empty input, a non-digit byte, or overflow), and callers always
/// report it as a fatal header error on the header that contained it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseIntError;

/// Parses a non-negative decimal integer into a 63-bit-safe `i64`.
///
/// Fails on empty input, any non-ASCII-digit byte, or overflow past
/// `i64::MAX`. Leading zeros are accepted; there is no sign and no
/// whitespace trimming; this is `content-length`/`:status` syntax, not
/// general integer parsing.
pub fn parse_uint(bytes: &[u8]) -> Result<i64, ParseIntError> {
    if bytes.is_empty() {
        return Err(ParseIntError);
    }

    let mut n: i64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return Err(ParseIntError);
        }
        let digit = i64::from(b - b'0');
        n = n.checked_mul(10).ok_or(ParseIntError)?;
        n = n.checked_add(digit).ok_or(ParseIntError)?;
    }
    Ok(n)
}

fn protocol_error() -> StreamError {
    StreamError(Reason::ProtocolError)
}

/// Reject if `name` begins with `:` and either this is a trailer block or
/// a regular header has already been observed. Shared by both sides ahead
/// of their per-token tables.
fn reject_late_pseudo(state: &StreamHttpState, name: &[u8], is_trailer: bool) -> Result<(), StreamError> {
    if name.first() == Some(&b':') && (is_trailer || state.has_flag(Flags::PSEUDO_HEADER_DISALLOWED)) {
        trace!(
            "stream={}: pseudo-header after regular header or in trailer",
            state.stream_id()
        );
        return Err(protocol_error());
    }
    Ok(())
}

/// After a header is processed, any name not starting with `:` closes the
/// door on further pseudo-headers for the rest of the block.
fn close_pseudo_header_window(state: &mut StreamHttpState, name: &[u8]) {
    if name.first() != Some(&b':') {
        state.set_flag(Flags::PSEUDO_HEADER_DISALLOWED);
    }
}

fn check_te(value: &[u8]) -> Result<(), StreamError> {
    if value.eq_ignore_ascii_case(b"trailers") {
        Ok(())
    } else {
        Err(protocol_error())
    }
}

fn set_content_length(state: &mut StreamHttpState, value: &[u8]) -> Result<(), StreamError> {
    if state.content_length() != UNKNOWN_LENGTH {
        return Err(protocol_error());
    }
    let len = parse_uint(value).map_err(|_| protocol_error())?;
    state.set_content_length(len);
    Ok(())
}

/// Validates one `(name, value)` pair on the request side: a real request
/// `HEADERS`/`PUSH_PROMISE` block, or any `PUSH_PROMISE` header block
/// regardless of which side initiated it, since that block always
/// describes a request.
pub fn validate_request_header(
    state: &mut StreamHttpState,
    name: &[u8],
    value: &[u8],
    is_trailer: bool,
) -> Result<(), StreamError> {
    reject_late_pseudo(state, name, is_trailer)?;

    match classify(name) {
        Token::Authority => {
            if !state.check_and_set_pseudo(Flags::P_AUTHORITY, value) {
                return Err(protocol_error());
            }
        }
        Token::Method => {
            if !state.check_and_set_pseudo(Flags::P_METHOD, value) {
                return Err(protocol_error());
            }
            if value == b"HEAD" {
                state.set_flag(Flags::METH_HEAD);
            } else if value == b"CONNECT" {
                if state.is_push_stream() {
                    // pushes may not be CONNECT
                    return Err(protocol_error());
                }
                if state.has_flag(Flags::P_PATH) || state.has_flag(Flags::P_SCHEME) {
                    return Err(protocol_error());
                }
                state.set_flag(Flags::METH_CONNECT);
            }
        }
        Token::Path => {
            if state.has_flag(Flags::METH_CONNECT) {
                return Err(protocol_error());
            }
            if !state.check_and_set_pseudo(Flags::P_PATH, value) {
                return Err(protocol_error());
            }
        }
        Token::Scheme => {
            if state.has_flag(Flags::METH_CONNECT) {
                return Err(protocol_error());
            }
            if !state.check_and_set_pseudo(Flags::P_SCHEME, value) {
                return Err(protocol_error());
            }
        }
        Token::Host => {
            if !state.check_and_set_pseudo(Flags::HOST, value) {
                return Err(protocol_error());
            }
        }
        Token::ContentLength => set_content_length(state, value)?,
        Token::Connection | Token::KeepAlive | Token::ProxyConnection | Token::TransferEncoding | Token::Upgrade => {
            trace!("stream={}: disallowed connection-specific header", state.stream_id());
            return Err(protocol_error());
        }
        Token::Te => check_te(value)?,
        // `:status` has no meaning on a request; like any other
        // unrecognized `:name` it is rejected as an unknown pseudo-header.
        Token::Status | Token::Other => {
            if name.first() == Some(&b':') {
                return Err(protocol_error());
            }
        }
    }

    close_pseudo_header_window(state, name);
    Ok(())
}

/// Validates one `(name, value)` pair on the response side.
pub fn validate_response_header(
    state: &mut StreamHttpState,
    name: &[u8],
    value: &[u8],
    is_trailer: bool,
) -> Result<(), StreamError> {
    reject_late_pseudo(state, name, is_trailer)?;

    match classify(name) {
        Token::Status => {
            if !state.check_and_set_pseudo(Flags::P_STATUS, value) {
                return Err(protocol_error());
            }
            if value.len() != 3 {
                return Err(protocol_error());
            }
            let code = parse_uint(value).map_err(|_| protocol_error())?;
            state.set_status_code(code);
        }
        Token::ContentLength => set_content_length(state, value)?,
        Token::Connection | Token::KeepAlive | Token::ProxyConnection | Token::TransferEncoding | Token::Upgrade => {
            trace!("stream={}: disallowed connection-specific header", state.stream_id());
            return Err(protocol_error());
        }
        Token::Te => check_te(value)?,
        // Request-only pseudo-headers carry no meaning on a response; an
        // unrecognized `:name` (including these) is rejected below.
        Token::Authority | Token::Method | Token::Path | Token::Scheme | Token::Host | Token::Other => {
            if name.first() == Some(&b':') {
                return Err(protocol_error());
            }
        }
    }

    close_pseudo_header_window(state, name);
    Ok(())
}

/// Called when a request (or pushed request) header block ends.
pub fn on_request_headers_complete(state: &mut StreamHttpState, frame_kind: FrameKind) -> SemanticsResult {
    if state.has_flag(Flags::METH_CONNECT) {
        if !state.has_flag(Flags::P_AUTHORITY) {
            return Err(HttpSemanticsError);
        }
        state.set_content_length(UNKNOWN_LENGTH);
    } else {
        let has_req_headers = state.flags().contains(Flags::REQ_HEADERS);
        let has_authority_or_host = state.has_flag(Flags::P_AUTHORITY) || state.has_flag(Flags::HOST);
        if !has_req_headers || !has_authority_or_host {
            return Err(HttpSemanticsError);
        }
    }

    if let FrameKind::PushPromise = frame_kind {
        state.reuse_for_push_response();
    }

    Ok(())
}

/// Called when a response header block ends.
pub fn on_response_headers_complete(state: &mut StreamHttpState) -> SemanticsResult {
    if !state.has_flag(Flags::P_STATUS) {
        return Err(HttpSemanticsError);
    }

    let status = state.status_code();
    if status / 100 == 1 {
        state.collapse_to_interim();
        return Ok(());
    }

    state.clear_expect_final_response();

    // The 1xx case is unreachable here (handled above); `status / 100 == 1`
    // stays in the predicate for symmetry with the source, which computes
    // "does a body follow" as one expression regardless of call site.
    let no_body_expected = state.has_flag(Flags::METH_HEAD) || status / 100 == 1 || status == 204 || status == 304;

    if no_body_expected {
        state.set_content_length(0);
    } else if state.has_flag(Flags::METH_CONNECT) {
        state.set_content_length(UNKNOWN_LENGTH);
    }

    Ok(())
}

/// Called when a trailer header block ends. `end_stream` is
/// the `END_STREAM` flag on the frame that carried the trailers.
pub fn on_trailer_headers_complete(end_stream: bool) -> SemanticsResult {
    if !end_stream {
        return Err(HttpSemanticsError);
    }
    Ok(())
}

/// Called when the peer half-closes the stream.
pub fn on_remote_end_stream(state: &StreamHttpState) -> SemanticsResult {
    if state.has_flag(Flags::EXPECT_FINAL_RESPONSE) {
        return Err(HttpSemanticsError);
    }
    if state.content_length() != UNKNOWN_LENGTH && state.content_length() as u64 != state.recv_content_length() {
        return Err(HttpSemanticsError);
    }
    Ok(())
}

/// Updates body accounting for one DATA chunk of `n` bytes.
pub fn on_data_chunk(state: &mut StreamHttpState, n: u64) -> SemanticsResult {
    state.add_recv_bytes(n);

    if state.has_flag(Flags::EXPECT_FINAL_RESPONSE) {
        return Err(HttpSemanticsError);
    }
    let declared = state.content_length();
    if declared != UNKNOWN_LENGTH && state.recv_content_length() > declared as u64 {
        return Err(HttpSemanticsError);
    }
    Ok(())
}

/// Primes method-family flags before full validation runs, by scanning a
/// `HEADERS`/`PUSH_PROMISE` header list for the first `:method`.
///
/// The scan stops at the first `:method` header it finds regardless of its
/// value, not at the first one whose value happens to be `HEAD` or
/// `CONNECT`. Frame kinds other than `Headers`/`PushPromise` are ignored;
/// nothing else carries a method.
pub fn record_request_method<'a, I>(state: &mut StreamHttpState, frame_kind: FrameKind, headers: I)
where
    I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
{
    if !matches!(frame_kind, FrameKind::Headers | FrameKind::PushPromise) {
        return;
    }

    for (name, value) in headers {
        if classify(name) != Token::Method {
            continue;
        }
        if value == b"CONNECT" {
            state.set_flag(Flags::METH_CONNECT);
        } else if value == b"HEAD" {
            state.set_flag(Flags::METH_HEAD);
        }
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uint_rejects_empty_input() {
        assert_eq!(parse_uint(b""), Err(ParseIntError));
    }

    #[test]
    fn parse_uint_rejects_non_digit_byte() {
        assert_eq!(parse_uint(b"12a"), Err(ParseIntError));
        assert_eq!(parse_uint(b"-1"), Err(ParseIntError));
        assert_eq!(parse_uint(b"1.5"), Err(ParseIntError));
    }

    #[test]
    fn parse_uint_rejects_overflow() {
        assert_eq!(parse_uint(b"99999999999999999999"), Err(ParseIntError));
        assert_eq!(parse_uint(b"9223372036854775808"), Err(ParseIntError));
    }

    #[test]
    fn parse_uint_accepts_leading_zeros() {
        assert_eq!(parse_uint(b"007"), Ok(7));
        assert_eq!(parse_uint(b"0"), Ok(0));
        assert_eq!(parse_uint(b"9223372036854775807"), Ok(i64::MAX));
    }
}
