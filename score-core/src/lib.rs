//! # score-core
//!
//! Pure logic for scorelink (no I/O, instant tests).
//!
//! This crate implements the cricket match state machine and the
//! replication protocol between the two scoring units, without any radio
//! or disk I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about counter carry and undo
//!
//! The actual I/O (radio, buttons, display) is performed by the embedding
//! application, which interprets the actions produced by [`Replica`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod command;
pub mod overs;
pub mod replica;
pub mod state;

pub use codec::WIRE_LEN;
pub use command::Command;
pub use overs::{Overs, BALLS_PER_OVER};
pub use replica::{Action, Event, LinkState, Replica, ReplicaConfig, ReplicaEvent};
pub use score_types::Mode;
pub use state::{MatchState, StateRecord, SyncKey, MAX_WICKETS, WIDE_NB_PER_OVER};
