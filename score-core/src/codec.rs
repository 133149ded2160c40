//! Fixed-layout encoding of a [`MatchState`] for transfer between units.
//!
//! Layout (11 bytes, little-endian, no padding):
//!
//! | Offset | Len | Field |
//! |---|---|---|
//! | 0 | 2 | runs |
//! | 2 | 1 | overs |
//! | 3 | 1 | balls |
//! | 4 | 1 | extras |
//! | 5 | 1 | wickets |
//! | 6 | 1 | wide/no-balls this over |
//! | 7 | 2 | target |
//! | 9 | 1 | target overs |
//! | 10 | 1 | target balls |

use score_types::ScoreError;

use crate::state::{MatchState, StateRecord};

/// Size of an encoded [`MatchState`].
pub const WIRE_LEN: usize = 11;

impl MatchState {
    /// Encode every field, including the target, in wire order.
    pub fn to_wire(&self) -> [u8; WIRE_LEN] {
        let r = StateRecord::from(self.clone());
        let runs = r.runs.to_le_bytes();
        let target = r.target.to_le_bytes();
        [
            runs[0],
            runs[1],
            r.overs,
            r.balls,
            r.extras,
            r.wickets,
            r.wide_nb_this_over,
            target[0],
            target[1],
            r.target_overs,
            r.target_balls,
        ]
    }

    /// Decode a state produced by [`MatchState::to_wire`].
    ///
    /// # Errors
    ///
    /// Fails if `bytes` is not exactly [`WIRE_LEN`] long or a counter is
    /// outside its range.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ScoreError> {
        let b: &[u8; WIRE_LEN] = bytes.try_into().map_err(|_| ScoreError::InvalidLength {
            expected: WIRE_LEN,
            actual: bytes.len(),
        })?;
        let record = StateRecord {
            runs: u16::from_le_bytes([b[0], b[1]]),
            overs: b[2],
            balls: b[3],
            extras: b[4],
            wickets: b[5],
            wide_nb_this_over: b[6],
            target: u16::from_le_bytes([b[7], b[8]]),
            target_overs: b[9],
            target_balls: b[10],
        };
        MatchState::try_from(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Overs;
    use score_types::Mode;

    #[test]
    fn layout_matches_documented_offsets() {
        let mut state = MatchState::chasing(0x0102, Overs::new(20, 3).unwrap());
        for _ in 0..300 {
            state.run(Mode::Plus);
        }
        state.extra(Mode::Normal, true);
        state.wicket(Mode::Normal);
        state.wicket(Mode::Normal);

        let bytes = state.to_wire();
        assert_eq!(
            bytes,
            [0x2D, 0x01, 0, 2, 1, 2, 1, 0x02, 0x01, 20, 3],
            "301 runs, 0.2 overs, 1 extra, 2 wickets, 1 wide, target 258 in 20.3"
        );
    }

    #[test]
    fn fresh_state_encodes_to_zeros() {
        assert_eq!(MatchState::new().to_wire(), [0u8; WIRE_LEN]);
    }

    #[test]
    fn decode_restores_target_fields() {
        let state = MatchState::chasing(199, Overs::new(50, 0).unwrap());
        let restored = MatchState::from_wire(&state.to_wire()).unwrap();
        assert_eq!(restored.target(), 199);
        assert_eq!(restored.target_overs(), 50);
    }

    #[test]
    fn wrong_length_rejected() {
        let result = MatchState::from_wire(&[0u8; 10]);
        assert!(matches!(
            result,
            Err(ScoreError::InvalidLength {
                expected: 11,
                actual: 10
            })
        ));
        assert!(MatchState::from_wire(&[0u8; 12]).is_err());
    }

    #[test]
    fn out_of_range_counters_rejected() {
        let mut bytes = [0u8; WIRE_LEN];
        bytes[3] = 6;
        assert!(matches!(
            MatchState::from_wire(&bytes),
            Err(ScoreError::OutOfRange { field: "balls", value: 6 })
        ));

        let mut bytes = [0u8; WIRE_LEN];
        bytes[5] = 11;
        assert!(matches!(
            MatchState::from_wire(&bytes),
            Err(ScoreError::OutOfRange { field: "wickets", .. })
        ));

        let mut bytes = [0u8; WIRE_LEN];
        bytes[10] = 9;
        assert!(matches!(
            MatchState::from_wire(&bytes),
            Err(ScoreError::OutOfRange { field: "target_balls", .. })
        ));
    }
}
