//! Error types for scorelink.

use thiserror::Error;

/// Errors that can occur at the scorelink wire boundary.
///
/// Counter operations never fail; only decoding and parsing do.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// MessagePack serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] rmp_serde::encode::Error),

    /// MessagePack deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] rmp_serde::decode::Error),

    /// Invalid message type discriminator
    #[error("invalid message type: {0}")]
    InvalidMessageType(u8),

    /// Invalid mode discriminator or name
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// Invalid protocol version
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// Encoded state has the wrong size
    #[error("invalid state length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Fixed size of an encoded state.
        expected: usize,
        /// Size that was received.
        actual: usize,
    },

    /// A decoded counter is outside its allowed range
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The decoded value.
        value: u16,
    },

    /// Unrecognised scoring command name
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
