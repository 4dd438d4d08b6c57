//! Error types for the tic netcode codecs.

use crate::registry::Protocol;

/// Errors produced while encoding/decoding wire records.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("packet truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("string is not valid UTF-8")]
    InvalidString,

    #[error("player count {count} exceeds session maximum {max}")]
    TooManyPlayers { count: usize, max: usize },

    #[error("{field} is {len} bytes, limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("datagram exceeds limit: limit={limit} actual={actual}")]
    DatagramTooLarge { limit: usize, actual: usize },

    /// An identifier reached the encoder without a registry entry. This is a
    /// build inconsistency, not bad input.
    #[error("protocol {0:?} missing from the protocol name registry")]
    UnregisteredProtocol(Protocol),
}

impl CodecError {
    /// True for errors caused by truncated or hostile input. The caller drops
    /// the whole record; nothing decoded so far may be used.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        !matches!(self, Self::UnregisteredProtocol(_))
    }
}

/// Convenient Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
