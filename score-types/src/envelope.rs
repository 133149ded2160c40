//! Frame - the wire format wrapper for everything sent between the two units.

use serde::{Deserialize, Serialize};

use crate::{NodeAddress, ScoreError};

/// Current frame protocol version.
pub const PROTOCOL_VERSION: u8 = 1;

/// Message type discriminator for frame routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    /// Whole match state; the receiver replaces its copy
    Score = 1,
    /// Acknowledgement carrying the receiver's copy after replacement
    Ack = 2,
    /// Ask the peer to transmit its current state
    Request = 3,
}

impl TryFrom<u8> for MessageType {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageType::Score),
            2 => Ok(MessageType::Ack),
            3 => Ok(MessageType::Request),
            _ => Err(ScoreError::InvalidMessageType(value)),
        }
    }
}

/// The frame wraps an encoded match state with link metadata.
///
/// The payload is the fixed-layout state encoding; its meaning depends on
/// the message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Protocol version (currently 1)
    pub version: u8,
    /// Message type discriminator
    pub msg_type: u8,
    /// Sender's pipe address
    pub sender: NodeAddress,
    /// Sender-assigned sequence; acks echo the sequence they acknowledge
    pub sequence: u32,
    /// Encoded match state (empty for requests)
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a new frame for sending.
    pub fn new(
        msg_type: MessageType,
        sender: NodeAddress,
        sequence: u32,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            msg_type: msg_type as u8,
            sender,
            sequence,
            payload,
        }
    }

    /// Serialize to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ScoreError> {
        rmp_serde::to_vec(self).map_err(ScoreError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScoreError> {
        rmp_serde::from_slice(bytes).map_err(ScoreError::Deserialization)
    }

    /// Get the message type as an enum.
    pub fn message_type(&self) -> Result<MessageType, ScoreError> {
        MessageType::try_from(self.msg_type)
    }

    /// Reject frames from a protocol version we do not speak.
    pub fn check_version(&self) -> Result<(), ScoreError> {
        if self.version == PROTOCOL_VERSION {
            Ok(())
        } else {
            Err(ScoreError::UnsupportedVersion(self.version))
        }
    }
}
