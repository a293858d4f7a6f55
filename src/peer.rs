/// Which side of the connection a header block is being validated as.
///
/// `h2` realizes this distinction with marker types (`client::Client`,
/// `server::Server`) implementing a shared `Peer` trait. This crate has no
/// accompanying connection/codec generic to hang that trait off of, so a
/// plain enum carries the same information without pulling in machinery
/// the validator itself never touches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Peer {
    Server,
    Client,
}

/// The frame type that carried the header block under validation.
///
/// Only the two kinds that can carry a header block relevant to this
/// layer are represented; `DATA`, `SETTINGS`, etc. never reach
/// [`crate::on_header`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameKind {
    Headers,
    PushPromise,
}
