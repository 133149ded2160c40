//! Operating mode passed into every scoring operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ScoreError;

/// Selects which semantics a scoring operation applies.
///
/// A mode is chosen per call and never stored on the match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Mode {
    /// Standard forward scoring; consumes a delivery where applicable.
    #[default]
    Normal = 0,
    /// Forward scoring that never consumes a delivery.
    Plus = 1,
    /// Undo the most recent application of the same operation.
    Minus = 2,
}

impl Mode {
    /// True for [`Mode::Minus`].
    pub fn is_undo(self) -> bool {
        self == Mode::Minus
    }

    /// True when a forward operation should also advance the ball count.
    pub fn consumes_delivery(self) -> bool {
        self == Mode::Normal
    }
}

impl TryFrom<u8> for Mode {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Normal),
            1 => Ok(Mode::Plus),
            2 => Ok(Mode::Minus),
            _ => Err(ScoreError::InvalidMode(value.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "plus" => Ok(Mode::Plus),
            "minus" => Ok(Mode::Minus),
            _ => Err(ScoreError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "normal",
            Mode::Plus => "plus",
            Mode::Minus => "minus",
        };
        f.write_str(name)
    }
}
