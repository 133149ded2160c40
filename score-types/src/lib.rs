//! # score-types
//!
//! Wire format types for the scorelink two-node cricket scoreboard.
//!
//! This crate provides the vocabulary shared by both scoring units:
//! - [`Mode`] - How a scoring operation is applied (forward, plus, undo)
//! - [`NodeAddress`], [`NodeRole`] - The two fixed radio pipe addresses
//! - [`Frame`] - Message wrapper carrying a whole encoded match state
//! - [`ScoreError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod envelope;
mod error;
mod ids;
mod mode;

pub use envelope::{Frame, MessageType, PROTOCOL_VERSION};
pub use error::ScoreError;
pub use ids::{NodeAddress, NodeRole, PIPES};
pub use mode::Mode;
