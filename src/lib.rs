//! The per-stream HTTP semantics validator that sits between the HPACK/
//! framing layer and the application inside an HTTP/2 endpoint.
//!
//! This crate owns exactly one state machine: header
//! ordering between pseudo-headers and regular headers, method-specific
//! header requirements, interim-vs-final response handling, disallowed
//! connection-specific headers, and content-length reconciliation across
//! `DATA` frames. Framing, HPACK decoding, transport, and the surrounding
//! session are someone else's problem; see [`syntax`] for the two
//! predicates this crate takes as external inputs.

pub mod error;
pub mod peer;
pub mod proto;
pub mod syntax;

use log::trace;

pub use error::{HeaderOutcome, HeaderResult, HttpSemanticsError, Reason, SemanticsResult, StreamError};
pub use peer::{FrameKind, Peer};
pub use proto::streams::state::StreamHttpState;
pub use proto::streams::validate::{
    on_data_chunk, on_remote_end_stream, on_request_headers_complete, on_response_headers_complete,
    on_trailer_headers_complete, parse_uint, record_request_method, ParseIntError,
};

use proto::streams::validate::{validate_request_header, validate_response_header};
use syntax::{valid_header_name, valid_header_value};

/// The single entry point called once per HPACK-decoded header entry.
///
/// Runs the outer syntactic gate shared by both sides, then dispatches to
/// the request-side validator if `peer` is [`Peer::Server`] or the frame
/// is a `PUSH_PROMISE` (that header block always describes a request
/// regardless of which side sent it), otherwise to the response-side
/// validator.
pub fn on_header(
    state: &mut StreamHttpState,
    peer: Peer,
    frame_kind: FrameKind,
    name: &[u8],
    value: &[u8],
    is_trailer: bool,
) -> HeaderResult {
    if !valid_header_name(name) {
        if name.is_empty() || name.first() == Some(&b':') {
            return Err(StreamError(Reason::ProtocolError));
        }
        if name.iter().any(u8::is_ascii_uppercase) {
            return Err(StreamError(Reason::ProtocolError));
        }
        trace!("stream={}: ignoring header with malformed name", state.stream_id());
        state.set_flag(proto::streams::state::Flags::PSEUDO_HEADER_DISALLOWED);
        return Ok(HeaderOutcome::Ignored);
    }

    if !valid_header_value(value) {
        debug_assert!(!name.is_empty());
        if name.first() == Some(&b':') {
            return Err(StreamError(Reason::ProtocolError));
        }
        trace!("stream={}: ignoring header with malformed value", state.stream_id());
        state.set_flag(proto::streams::state::Flags::PSEUDO_HEADER_DISALLOWED);
        return Ok(HeaderOutcome::Ignored);
    }

    let is_request_side = matches!(peer, Peer::Server) || matches!(frame_kind, FrameKind::PushPromise);

    let result = if is_request_side {
        validate_request_header(state, name, value, is_trailer)
    } else {
        validate_response_header(state, name, value, is_trailer)
    };

    result.map(|()| HeaderOutcome::Accepted)
}
