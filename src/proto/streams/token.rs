//! Header-name classification.
//!
//! Maps a lowercase header name to one of the thirteen recognized tokens,
//! or `Other` for everything else. HTTP/2 mandates lowercase header names
//! on the wire, so this is a case-sensitive exact match; anything carrying
//! uppercase is rejected earlier, by the outer syntactic gate in
//! [`crate::on_header`], before a name ever reaches `classify`.

/// The closed set of header names this validator treats specially.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    Authority,
    Method,
    Path,
    Scheme,
    Status,
    Connection,
    ContentLength,
    Host,
    KeepAlive,
    ProxyConnection,
    Te,
    TransferEncoding,
    Upgrade,
    Other,
}

/// Classifies `name` (assumed already lowercase). Dispatch is bucketed by
/// length first so the common case of an unrecognized regular header
/// (most headers, most of the time) bails out after a single length
/// check rather than scanning all thirteen candidates.
pub fn classify(name: &[u8]) -> Token {
    match name.len() {
        2 => match name {
            b"te" => Token::Te,
            _ => Token::Other,
        },
        4 => match name {
            b"host" => Token::Host,
            _ => Token::Other,
        },
        5 => match name {
            b":path" => Token::Path,
            _ => Token::Other,
        },
        7 => match name {
            b":method" => Token::Method,
            b":scheme" => Token::Scheme,
            b":status" => Token::Status,
            b"upgrade" => Token::Upgrade,
            _ => Token::Other,
        },
        10 => match name {
            b"connection" => Token::Connection,
            b"keep-alive" => Token::KeepAlive,
            b":authority" => Token::Authority,
            _ => Token::Other,
        },
        14 => match name {
            b"content-length" => Token::ContentLength,
            _ => Token::Other,
        },
        16 => match name {
            b"proxy-connection" => Token::ProxyConnection,
            _ => Token::Other,
        },
        17 => match name {
            b"transfer-encoding" => Token::TransferEncoding,
            _ => Token::Other,
        },
        _ => Token::Other,
    }
}
