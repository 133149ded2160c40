//! Match state engine for scorelink.
//!
//! [`MatchState`] is the authoritative score record shared by both scoring
//! units. Every mutator takes a [`Mode`]:
//! - [`Mode::Normal`] scores forward and consumes a delivery where applicable
//! - [`Mode::Plus`] scores forward without consuming a delivery
//! - [`Mode::Minus`] undoes the last forward application
//!
//! No operation can fail. Decrements saturate at zero and wickets saturate
//! at ten, so an operator over-pressing undo cannot push the record into an
//! invalid state. The price is that undo past the real history is silently
//! absorbed.

use score_types::{Mode, ScoreError};
use serde::{Deserialize, Serialize};

use crate::overs::Overs;

/// Wides/no-balls per over that do not consume a delivery.
pub const WIDE_NB_PER_OVER: u8 = 2;

/// Dismissals that end an innings.
pub const MAX_WICKETS: u8 = 10;

/// The live score plus the chase target.
///
/// Equality only considers the fields in [`SyncKey`]. The target figures
/// are not compared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "StateRecord", into = "StateRecord")]
pub struct MatchState {
    runs: u16,
    clock: Overs,
    extras: u8,
    wickets: u8,
    wide_nb_this_over: u8,
    target: u16,
    target_clock: Overs,
}

/// The fields two units compare to detect divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncKey {
    /// Total runs.
    pub runs: u16,
    /// Completed overs.
    pub overs: u8,
    /// Deliveries in the current over.
    pub balls: u8,
    /// Extras awarded.
    pub extras: u8,
    /// Wickets fallen.
    pub wickets: u8,
    /// Wides/no-balls this over.
    pub wide_nb_this_over: u8,
}

impl MatchState {
    /// A fresh first-innings record, all counters zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh second-innings record chasing `target` within `deadline`.
    pub fn chasing(target: u16, deadline: Overs) -> Self {
        Self {
            target,
            target_clock: deadline,
            ..Self::default()
        }
    }

    /// Total runs scored.
    pub fn runs(&self) -> u16 {
        self.runs
    }

    /// Completed overs.
    pub fn overs(&self) -> u8 {
        self.clock.overs()
    }

    /// Deliveries bowled in the current over (0..=5).
    pub fn balls(&self) -> u8 {
        self.clock.balls()
    }

    /// The live over/ball clock.
    pub fn clock(&self) -> Overs {
        self.clock
    }

    /// Runs awarded as extras.
    pub fn extras(&self) -> u8 {
        self.extras
    }

    /// Wickets fallen (0..=10).
    pub fn wickets(&self) -> u8 {
        self.wickets
    }

    /// Wides/no-balls recorded since the current over started.
    pub fn wide_nb_this_over(&self) -> u8 {
        self.wide_nb_this_over
    }

    /// Runs required to win.
    pub fn target(&self) -> u16 {
        self.target
    }

    /// Completed overs of the chase deadline.
    pub fn target_overs(&self) -> u8 {
        self.target_clock.overs()
    }

    /// Balls of the chase deadline (0..=5).
    pub fn target_balls(&self) -> u8 {
        self.target_clock.balls()
    }

    /// The chase deadline clock.
    pub fn target_clock(&self) -> Overs {
        self.target_clock
    }

    /// Project onto the fields used for equality.
    pub fn sync_key(&self) -> SyncKey {
        SyncKey {
            runs: self.runs,
            overs: self.clock.overs(),
            balls: self.clock.balls(),
            extras: self.extras,
            wickets: self.wickets,
            wide_nb_this_over: self.wide_nb_this_over,
        }
    }

    /// Record a delivery, or take one back.
    ///
    /// Completing an over also clears the wide/no-ball count. Taking a
    /// delivery back never restores that count.
    pub fn ball(&mut self, mode: Mode) {
        if mode.is_undo() {
            self.clock.retract();
        } else if self.clock.advance() {
            tracing::debug!(
                overs = self.clock.overs(),
                wide_nb = self.wide_nb_this_over,
                "over completed"
            );
            self.wide_nb_this_over = 0;
        }
    }

    /// Record a run off the bat.
    pub fn run(&mut self, mode: Mode) {
        if mode.is_undo() {
            self.runs = self.runs.saturating_sub(1);
        } else {
            self.runs = self.runs.saturating_add(1);
            if mode.consumes_delivery() {
                self.ball(mode);
            }
        }
    }

    /// Record a wide or no-ball.
    ///
    /// The first [`WIDE_NB_PER_OVER`] in an over are free; each one after
    /// that also counts as a delivery. `first_press` separates a fresh undo
    /// from a repeated press correcting the same event, and only controls
    /// whether the per-over count is taken back.
    ///
    /// Undo never retracts a delivery, even when the forward call counted one.
    pub fn extra(&mut self, mode: Mode, first_press: bool) {
        if mode.is_undo() {
            self.extras = self.extras.saturating_sub(1);
            self.runs = self.runs.saturating_sub(1);
            if first_press {
                self.wide_nb_this_over = self.wide_nb_this_over.saturating_sub(1);
            }
        } else {
            self.extras = self.extras.saturating_add(1);
            self.runs = self.runs.saturating_add(1);
            if mode.consumes_delivery() {
                self.wide_nb_this_over = self.wide_nb_this_over.saturating_add(1);
            }
            if self.wide_nb_this_over > WIDE_NB_PER_OVER {
                tracing::debug!(
                    wide_nb = self.wide_nb_this_over,
                    "wide/no-ball allowance exceeded, counting delivery"
                );
                self.ball(mode);
            }
        }
    }

    /// Record a leg bye. Undo only takes back the extra, not the run.
    pub fn leg_bye(&mut self, mode: Mode) {
        if mode.is_undo() {
            self.extras = self.extras.saturating_sub(1);
        } else {
            self.extras = self.extras.saturating_add(1);
            self.run(mode);
        }
    }

    /// Record a dismissal. Ignored once ten wickets have fallen.
    pub fn wicket(&mut self, mode: Mode) {
        if mode.is_undo() {
            self.wickets = self.wickets.saturating_sub(1);
        } else if self.wickets < MAX_WICKETS {
            self.wickets += 1;
            if mode.consumes_delivery() {
                self.ball(mode);
            }
        }
    }

    /// Record a dot ball.
    pub fn no_score(&mut self, mode: Mode) {
        self.ball(mode);
    }

    /// Adjust the runs required to win.
    pub fn target_runs_change(&mut self, mode: Mode) {
        if mode.is_undo() {
            self.target = self.target.saturating_sub(1);
        } else {
            self.target = self.target.saturating_add(1);
        }
    }

    /// Adjust the chase deadline by one ball.
    pub fn target_balls_change(&mut self, mode: Mode) {
        if mode.is_undo() {
            self.target_clock.retract();
        } else {
            self.target_clock.advance();
        }
    }

    /// Runs per six deliveries so far; `0.0` before the first ball.
    pub fn current_run_rate(&self) -> f32 {
        let bowled = self.clock.total_balls();
        if bowled == 0 {
            0.0
        } else {
            (f32::from(self.runs) / bowled as f32) * 6.0
        }
    }

    /// Runs per six deliveries needed to reach the target in time.
    ///
    /// Returns `0.0` when no deliveries remain. Past the deadline or the
    /// target the result goes negative rather than being clamped.
    pub fn target_run_rate(&self) -> f32 {
        let runs_remaining = i32::from(self.target) - i32::from(self.runs);
        let balls_remaining =
            self.target_clock.total_balls() as i32 - self.clock.total_balls() as i32;
        if balls_remaining == 0 {
            0.0
        } else {
            (runs_remaining as f32 / balls_remaining as f32) * 6.0
        }
    }
}

impl PartialEq for MatchState {
    fn eq(&self, other: &Self) -> bool {
        self.sync_key() == other.sync_key()
    }
}

impl Eq for MatchState {}

/// Flat, unvalidated view of every field, in wire order.
///
/// Used for serde and the fixed-layout codec; converting back into a
/// [`MatchState`] checks the range invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Total runs.
    pub runs: u16,
    /// Completed overs.
    pub overs: u8,
    /// Deliveries in the current over.
    pub balls: u8,
    /// Extras awarded.
    pub extras: u8,
    /// Wickets fallen.
    pub wickets: u8,
    /// Wides/no-balls this over.
    pub wide_nb_this_over: u8,
    /// Runs required to win.
    pub target: u16,
    /// Completed overs of the chase deadline.
    pub target_overs: u8,
    /// Balls of the chase deadline.
    pub target_balls: u8,
}

impl From<MatchState> for StateRecord {
    fn from(state: MatchState) -> Self {
        Self {
            runs: state.runs,
            overs: state.clock.overs(),
            balls: state.clock.balls(),
            extras: state.extras,
            wickets: state.wickets,
            wide_nb_this_over: state.wide_nb_this_over,
            target: state.target,
            target_overs: state.target_clock.overs(),
            target_balls: state.target_clock.balls(),
        }
    }
}

impl TryFrom<StateRecord> for MatchState {
    type Error = ScoreError;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        let clock = Overs::new(record.overs, record.balls).ok_or(ScoreError::OutOfRange {
            field: "balls",
            value: record.balls.into(),
        })?;
        let target_clock = Overs::new(record.target_overs, record.target_balls).ok_or(
            ScoreError::OutOfRange {
                field: "target_balls",
                value: record.target_balls.into(),
            },
        )?;
        if record.wickets > MAX_WICKETS {
            return Err(ScoreError::OutOfRange {
                field: "wickets",
                value: record.wickets.into(),
            });
        }
        Ok(Self {
            runs: record.runs,
            clock,
            extras: record.extras,
            wickets: record.wickets,
            wide_nb_this_over: record.wide_nb_this_over,
            target: record.target,
            target_clock,
        })
    }
}
