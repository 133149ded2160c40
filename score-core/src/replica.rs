//! Whole-state replication between the two scoring units.
//!
//! Each unit owns a [`Replica`]: its copy of the [`MatchState`] plus the
//! link bookkeeping. The replica is a pure state machine. It takes events
//! as input and returns actions to execute; the radio driver that actually
//! sends frames and runs timers lives outside this crate.
//!
//! Consistency is last writer wins. A received `Score` frame replaces the
//! local copy wholesale and is acknowledged with the new local copy, which
//! lets the sender compare the two and retransmit on divergence.

use std::time::Duration;

use score_types::{Frame, MessageType, Mode, NodeAddress, NodeRole};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::state::{MatchState, SyncKey};

/// Retry tuning for unacknowledged score frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicaConfig {
    /// Delay before the first retransmission.
    pub retry_base: Duration,
    /// Upper bound on the exponential part of the delay.
    pub retry_max: Duration,
    /// Random jitter added to every delay, in milliseconds.
    pub jitter_ms: u64,
    /// Transmissions of one sequence before giving up.
    pub max_attempts: u32,
}

impl Default for ReplicaConfig {
    fn default() -> Self {
        Self {
            retry_base: Duration::from_millis(250),
            retry_max: Duration::from_secs(4),
            jitter_ms: 50,
            max_attempts: 8,
        }
    }
}

impl ReplicaConfig {
    /// Delay before retransmission number `attempt + 1`.
    ///
    /// Formula: min(retry_max, retry_base * 2^(attempt-1)) + random(0..=jitter_ms)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let base = self
            .retry_base
            .saturating_mul(1u32 << exponent)
            .min(self.retry_max);
        base + Duration::from_millis(random_jitter_ms(self.jitter_ms))
    }
}

/// Link status as seen by one unit.
///
/// Persisted with the match record; an ack is only accepted while
/// `AwaitingAck` holds its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkState {
    /// Nothing outstanding; the peer's copy is unknown.
    #[default]
    Idle,
    /// A score frame was sent and not yet acknowledged.
    AwaitingAck {
        /// Sequence of the outstanding frame.
        sequence: u32,
        /// Transmissions so far, starting at 1.
        attempt: u32,
    },
    /// The last exchange confirmed both copies equal.
    InSync {
        /// Sequence of the confirming exchange.
        sequence: u32,
    },
}

/// Inputs to the replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The local operator pressed a scoring button.
    Local {
        /// Operation to apply.
        command: Command,
        /// How to apply it.
        mode: Mode,
    },
    /// The local operator started a new innings.
    Reset {
        /// Replacement record.
        state: MatchState,
    },
    /// A frame arrived from the radio.
    FrameReceived {
        /// The decoded frame.
        frame: Frame,
    },
    /// The retry timer fired.
    RetryTimer,
}

/// Instructions for the radio driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send this frame to the peer.
    Transmit(Frame),
    /// (Re)start the retry timer.
    StartRetryTimer {
        /// Delay before [`Event::RetryTimer`] should fire.
        delay: Duration,
    },
    /// Stop any pending retry timer.
    CancelRetryTimer,
    /// Report something to the application.
    EmitEvent(ReplicaEvent),
}

/// Notifications for the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicaEvent {
    /// The local copy was replaced by the peer's.
    Replaced {
        /// Who sent the new state.
        from: NodeAddress,
        /// Sequence of the replacing frame.
        sequence: u32,
    },
    /// The peer acknowledged with an equal copy.
    InSync {
        /// Acknowledged sequence.
        sequence: u32,
    },
    /// The peer acknowledged with a different copy.
    Diverged {
        /// Our copy.
        local: SyncKey,
        /// The peer's copy.
        remote: SyncKey,
    },
    /// Retransmissions were exhausted.
    PeerUnreachable {
        /// Transmissions attempted.
        attempts: u32,
    },
    /// An incoming frame was dropped.
    Rejected {
        /// Why it was dropped.
        reason: String,
    },
}

/// One unit's copy of the match plus its link state.
#[derive(Debug, Clone)]
pub struct Replica {
    address: NodeAddress,
    peer: NodeAddress,
    sequence: u32,
    state: MatchState,
    link: LinkState,
    config: ReplicaConfig,
}

impl Replica {
    /// Create a replica for `role` holding `state`.
    pub fn new(role: NodeRole, state: MatchState, config: ReplicaConfig) -> Self {
        Self {
            address: role.address(),
            peer: role.peer().address(),
            sequence: 0,
            state,
            link: LinkState::Idle,
            config,
        }
    }

    /// Resume from a persisted sequence number.
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// Resume from a persisted link status.
    pub fn with_link(mut self, link: LinkState) -> Self {
        self.link = link;
        self
    }

    /// The local copy.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Consume the replica, keeping only the local copy.
    pub fn into_state(self) -> MatchState {
        self.state
    }

    /// Highest sequence sent or adopted.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Current link status.
    pub fn link(&self) -> LinkState {
        self.link
    }

    /// This unit's address.
    pub fn address(&self) -> NodeAddress {
        self.address
    }

    /// A `Score` frame carrying the current copy at the current sequence.
    pub fn score_frame(&self) -> Frame {
        Frame::new(
            MessageType::Score,
            self.address,
            self.sequence,
            self.state.to_wire().to_vec(),
        )
    }

    /// Process an event and return the actions to execute.
    pub fn on_event(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::Local { command, mode } => {
                self.state.apply(command, mode);
                self.broadcast()
            }
            Event::Reset { state } => {
                tracing::info!("innings reset");
                self.state = state;
                self.broadcast()
            }
            Event::FrameReceived { frame } => self.on_frame(frame),
            Event::RetryTimer => match self.link {
                LinkState::AwaitingAck { sequence, attempt } => self.retransmit(sequence, attempt),
                _ => vec![],
            },
        }
    }

    fn broadcast(&mut self) -> Vec<Action> {
        self.sequence = self.sequence.wrapping_add(1);
        self.link = LinkState::AwaitingAck {
            sequence: self.sequence,
            attempt: 1,
        };
        vec![
            Action::Transmit(self.score_frame()),
            Action::StartRetryTimer {
                delay: self.config.backoff(1),
            },
        ]
    }

    fn retransmit(&mut self, sequence: u32, attempt: u32) -> Vec<Action> {
        if attempt >= self.config.max_attempts {
            tracing::warn!(sequence, attempt, "peer unreachable, giving up");
            self.link = LinkState::Idle;
            return vec![Action::EmitEvent(ReplicaEvent::PeerUnreachable {
                attempts: attempt,
            })];
        }

        let next = attempt + 1;
        self.link = LinkState::AwaitingAck {
            sequence,
            attempt: next,
        };
        vec![
            Action::Transmit(Frame::new(
                MessageType::Score,
                self.address,
                sequence,
                self.state.to_wire().to_vec(),
            )),
            Action::StartRetryTimer {
                delay: self.config.backoff(next),
            },
        ]
    }

    fn on_frame(&mut self, frame: Frame) -> Vec<Action> {
        if frame.sender != self.peer {
            return reject(format!("unexpected sender {}", frame.sender));
        }
        if let Err(e) = frame.check_version() {
            return reject(e.to_string());
        }
        let msg_type = match frame.message_type() {
            Ok(t) => t,
            Err(e) => return reject(e.to_string()),
        };

        match msg_type {
            MessageType::Score => self.on_score(frame),
            MessageType::Ack => self.on_ack(frame),
            MessageType::Request => vec![Action::Transmit(self.score_frame())],
        }
    }

    fn on_score(&mut self, frame: Frame) -> Vec<Action> {
        let remote = match MatchState::from_wire(&frame.payload) {
            Ok(state) => state,
            Err(e) => return reject(e.to_string()),
        };

        tracing::debug!(from = %frame.sender, sequence = frame.sequence, "replacing local state");
        self.state = remote;
        self.sequence = self.sequence.max(frame.sequence);
        self.link = LinkState::InSync {
            sequence: frame.sequence,
        };

        vec![
            Action::Transmit(Frame::new(
                MessageType::Ack,
                self.address,
                frame.sequence,
                self.state.to_wire().to_vec(),
            )),
            Action::CancelRetryTimer,
            Action::EmitEvent(ReplicaEvent::Replaced {
                from: frame.sender,
                sequence: frame.sequence,
            }),
        ]
    }

    fn on_ack(&mut self, frame: Frame) -> Vec<Action> {
        let (sequence, attempt) = match self.link {
            LinkState::AwaitingAck { sequence, attempt } if sequence == frame.sequence => {
                (sequence, attempt)
            }
            _ => {
                tracing::trace!(sequence = frame.sequence, "ignoring stale ack");
                return vec![];
            }
        };

        let remote = match MatchState::from_wire(&frame.payload) {
            Ok(state) => state,
            Err(e) => return reject(e.to_string()),
        };

        if remote == self.state {
            self.link = LinkState::InSync { sequence };
            return vec![
                Action::CancelRetryTimer,
                Action::EmitEvent(ReplicaEvent::InSync { sequence }),
            ];
        }

        tracing::warn!(sequence, "peer copy diverged, retransmitting");
        let mut actions = vec![Action::EmitEvent(ReplicaEvent::Diverged {
            local: self.state.sync_key(),
            remote: remote.sync_key(),
        })];
        actions.extend(self.retransmit(sequence, attempt));
        actions
    }
}

fn reject(reason: String) -> Vec<Action> {
    tracing::debug!(%reason, "frame rejected");
    vec![Action::EmitEvent(ReplicaEvent::Rejected { reason })]
}

/// Generate random jitter between 0 and `max_ms` milliseconds inclusive.
fn random_jitter_ms(max_ms: u64) -> u64 {
    if max_ms == 0 {
        return 0;
    }
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes) % (max_ms + 1),
        Err(_) => 0,
    }
}
