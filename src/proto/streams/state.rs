//! Per-stream HTTP semantics state.

/// Bitset over the per-stream observation flags.
///
/// Kept as a packed `u32` rather than individual `bool` fields: the
/// completion checks need to mask and restore several flags at once (see
/// [`StreamHttpState::reuse_for_push_response`] and
/// [`StreamHttpState::collapse_to_interim`]), which reads far more
/// naturally as bitwise ops over one word than as a struct-update on a
/// dozen booleans.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Flags(u32);

impl Flags {
    pub const P_AUTHORITY: Flags = Flags(1 << 0);
    pub const P_METHOD: Flags = Flags(1 << 1);
    pub const P_PATH: Flags = Flags(1 << 2);
    pub const P_SCHEME: Flags = Flags(1 << 3);
    pub const P_STATUS: Flags = Flags(1 << 4);
    pub const HOST: Flags = Flags(1 << 5);
    pub const METH_HEAD: Flags = Flags(1 << 6);
    pub const METH_CONNECT: Flags = Flags(1 << 7);
    pub const PSEUDO_HEADER_DISALLOWED: Flags = Flags(1 << 8);
    pub const EXPECT_FINAL_RESPONSE: Flags = Flags(1 << 9);

    /// Every method-family flag. Survives the flag reset that happens
    /// between a pushed request's headers and the response reusing the
    /// same `StreamHttpState`, and between an interim and final response.
    pub const METH_ALL: Flags = Flags(Self::METH_HEAD.0 | Self::METH_CONNECT.0);

    /// All three pseudo-headers a regular (non-CONNECT) request needs.
    pub const REQ_HEADERS: Flags = Flags(Self::P_METHOD.0 | Self::P_PATH.0 | Self::P_SCHEME.0);

    pub fn empty() -> Flags {
        Flags(0)
    }

    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    /// Keeps only the bits also set in `mask`.
    pub fn mask_to(&mut self, mask: Flags) {
        self.0 &= mask.0;
    }

    /// Clears the bits set in `other`, leaving the rest untouched.
    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for Flags {
    type Output = Flags;
    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

/// Sentinel meaning "unset" for both `content_length` and `status_code`.
pub const UNSET: i64 = -1;

/// Sentinel meaning "declared length is unknown", `content_length` only.
pub const UNKNOWN_LENGTH: i64 = -1;

/// Per-stream HTTP compliance state. One instance per stream, created when
/// the stream opens; there is no separate teardown callback, the owning
/// stream record simply drops this value when the stream closes.
#[derive(Debug, Clone)]
pub struct StreamHttpState {
    flags: Flags,
    status_code: i64,
    content_length: i64,
    recv_content_length: u64,
    stream_id: u32,
}

impl StreamHttpState {
    pub fn new(stream_id: u32) -> Self {
        StreamHttpState {
            flags: Flags::empty(),
            status_code: UNSET,
            content_length: UNKNOWN_LENGTH,
            recv_content_length: 0,
            stream_id,
        }
    }

    pub fn stream_id(&self) -> u32 {
        self.stream_id
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn set_flag(&mut self, flag: Flags) {
        self.flags.insert(flag);
    }

    pub fn has_flag(&self, flag: Flags) -> bool {
        self.flags.intersects(flag)
    }

    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    pub fn set_status_code(&mut self, code: i64) {
        self.status_code = code;
    }

    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    pub fn set_content_length(&mut self, len: i64) {
        self.content_length = len;
    }

    pub fn recv_content_length(&self) -> u64 {
        self.recv_content_length
    }

    /// `stream_id` parity identifies the initiator: odd is client-initiated.
    /// CONNECT may only be used on a client-initiated (odd) stream; a
    /// pushed (even) stream can never carry a tunneling request.
    pub fn is_push_stream(&self) -> bool {
        self.stream_id % 2 == 0
    }

    /// Duplicate/whitespace gate shared by every pseudo-header and by
    /// `host`, which this validator treats as occupying a pseudo-like slot
    /// for duplicate-detection purposes even though it is a regular
    /// header. Returns `true` and sets the flag on success; `false` if the
    /// flag was already set or the value is pure linear whitespace.
    pub fn check_and_set_pseudo(&mut self, flag: Flags, value: &[u8]) -> bool {
        if self.has_flag(flag) {
            return false;
        }
        if is_all_lws(value) {
            return false;
        }
        self.set_flag(flag);
        true
    }

    /// Collapses state to just the method-family flags plus
    /// `EXPECT_FINAL_RESPONSE`, and resets `content_length`/`status_code`.
    /// Called after an interim (1xx) response, so the next header block on
    /// the same stream starts fresh.
    pub fn collapse_to_interim(&mut self) {
        self.flags.mask_to(Flags::METH_ALL);
        self.flags.insert(Flags::EXPECT_FINAL_RESPONSE);
        self.content_length = UNKNOWN_LENGTH;
        self.status_code = UNSET;
    }

    /// Clears all flags except the method-family flags and resets
    /// `content_length`, so the same `StreamHttpState` can be reused to
    /// validate the promised response on a `PUSH_PROMISE` stream.
    pub fn reuse_for_push_response(&mut self) {
        self.flags.mask_to(Flags::METH_ALL);
        self.content_length = UNKNOWN_LENGTH;
    }

    pub fn add_recv_bytes(&mut self, n: u64) {
        self.recv_content_length += n;
    }

    /// Clears `EXPECT_FINAL_RESPONSE` once a non-interim response has been
    /// seen; every other flag only ever grows within a header block.
    pub fn clear_expect_final_response(&mut self) {
        self.flags.remove(Flags::EXPECT_FINAL_RESPONSE);
    }
}

/// `is_all_lws(bytes)`: true iff every byte is SP (0x20) or HTAB (0x09).
///
/// Used to reject pseudo-header (and `host`) values that are pure
/// whitespace, stricter than the leniency afforded to regular headers.
pub fn is_all_lws(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == b' ' || b == b'\t')
}
