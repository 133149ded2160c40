//! Scoring commands as produced by an input device.
//!
//! A button press maps to a `(Command, Mode)` pair; [`MatchState::apply`]
//! dispatches it to the matching operation.

use score_types::{Mode, ScoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::state::MatchState;

/// One named scoring operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// A run off the bat.
    Run,
    /// A wide or no-ball.
    Extra {
        /// False when correcting an already-recorded event.
        first_press: bool,
    },
    /// A leg bye.
    LegBye,
    /// A dismissal.
    Wicket,
    /// A dot ball.
    NoScore,
    /// A bare delivery with no other effect.
    Ball,
    /// Runs required to win.
    TargetRuns,
    /// One ball of the chase deadline.
    TargetBalls,
}

impl MatchState {
    /// Apply `command` under `mode`.
    pub fn apply(&mut self, command: Command, mode: Mode) {
        tracing::trace!(%command, %mode, "apply");
        match command {
            Command::Run => self.run(mode),
            Command::Extra { first_press } => self.extra(mode, first_press),
            Command::LegBye => self.leg_bye(mode),
            Command::Wicket => self.wicket(mode),
            Command::NoScore => self.no_score(mode),
            Command::Ball => self.ball(mode),
            Command::TargetRuns => self.target_runs_change(mode),
            Command::TargetBalls => self.target_balls_change(mode),
        }
    }
}

impl FromStr for Command {
    type Err = ScoreError;

    /// Parse a console name. `extra` parses as a first press.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run" => Ok(Command::Run),
            "extra" | "wide" | "no-ball" => Ok(Command::Extra { first_press: true }),
            "leg-bye" => Ok(Command::LegBye),
            "wicket" => Ok(Command::Wicket),
            "dot" => Ok(Command::NoScore),
            "ball" => Ok(Command::Ball),
            "target-runs" => Ok(Command::TargetRuns),
            "target-balls" => Ok(Command::TargetBalls),
            other => Err(ScoreError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Run => "run",
            Command::Extra { .. } => "extra",
            Command::LegBye => "leg-bye",
            Command::Wicket => "wicket",
            Command::NoScore => "dot",
            Command::Ball => "ball",
            Command::TargetRuns => "target-runs",
            Command::TargetBalls => "target-balls",
        };
        f.write_str(name)
    }
}
