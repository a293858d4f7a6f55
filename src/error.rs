use std::fmt;

/// Abstract protocol error reason carried by a fatal header error.
///
/// This mirrors `h2::error::Reason` in spirit: a small `Copy` enum rather
/// than a wire error code, since translating to the HTTP/2 `RST_STREAM`
/// error code is the surrounding session's job, not this layer's.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reason {
    /// The header block violates HTTP/2 semantics (pseudo-header
    /// ordering, duplicate pseudo-headers, disallowed connection-specific
    /// headers, malformed `content-length`/`:status`, ...).
    ProtocolError,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::ProtocolError => write!(f, "http/2 semantics violation"),
        }
    }
}

/// The result of validating a single `(name, value)` header pair.
///
/// This is the three-way outcome (`Ok | Error | Ignore`)
/// kept as a distinct type instead of collapsing into a plain
/// `Result<(), Error>`, since "ignore and keep going" and "accept" are
/// both non-errors that the caller must still tell apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HeaderOutcome {
    /// The header was well-formed and has been folded into stream state.
    Accepted,
    /// The header was malformed in a way public-internet traffic commonly
    /// produces; it is dropped, not passed to the application, but the
    /// stream continues.
    Ignored,
}

/// A fatal, stream-ending error raised while validating a single header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StreamError(pub Reason);

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StreamError {}

impl From<Reason> for StreamError {
    fn from(reason: Reason) -> Self {
        StreamError(reason)
    }
}

/// A fatal error raised by one of the header-block completion checks, the
/// remote-end-of-stream check, or body accounting.
///
/// There is exactly one way for any of these to fail, so unlike
/// [`StreamError`] no payload is carried.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HttpSemanticsError;

impl fmt::Display for HttpSemanticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream violates http semantics")
    }
}

impl std::error::Error for HttpSemanticsError {}

pub type HeaderResult = Result<HeaderOutcome, StreamError>;
pub type SemanticsResult = Result<(), HttpSemanticsError>;
