//! Over/ball clock with carry and borrow across the over boundary.
//!
//! Both the live innings and the chase deadline count deliveries the same
//! way, so the rule lives here once.

/// Legal deliveries in one over.
pub const BALLS_PER_OVER: u8 = 6;

/// Index of the final delivery of an over.
const LAST_BALL: u8 = BALLS_PER_OVER - 1;

/// Completed overs plus deliveries bowled in the current over.
///
/// `balls` is always in `0..=5`. Advancing past the last ball carries into
/// `overs`; retracting before the first ball borrows from it and stops at
/// `0.0` instead of going negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Overs {
    overs: u8,
    balls: u8,
}

impl Overs {
    /// The start of an innings.
    pub const ZERO: Overs = Overs { overs: 0, balls: 0 };

    /// Create a clock reading, or `None` if `balls` is not a valid index.
    pub fn new(overs: u8, balls: u8) -> Option<Self> {
        (balls <= LAST_BALL).then_some(Self { overs, balls })
    }

    /// Completed overs.
    pub fn overs(&self) -> u8 {
        self.overs
    }

    /// Deliveries bowled in the current over.
    pub fn balls(&self) -> u8 {
        self.balls
    }

    /// Total deliveries represented by this reading.
    pub fn total_balls(&self) -> u32 {
        u32::from(self.overs) * u32::from(BALLS_PER_OVER) + u32::from(self.balls)
    }

    /// Count one delivery. Returns `true` if this completed an over.
    pub fn advance(&mut self) -> bool {
        if self.balls == LAST_BALL {
            self.overs = self.overs.saturating_add(1);
            self.balls = 0;
            true
        } else {
            self.balls += 1;
            false
        }
    }

    /// Take back one delivery, saturating at `0.0`.
    pub fn retract(&mut self) {
        if self.balls > 0 {
            self.balls -= 1;
        } else if self.overs > 0 {
            self.overs -= 1;
            self.balls = LAST_BALL;
        }
    }
}

impl std::fmt::Display for Overs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.overs, self.balls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_seventh_ball_index() {
        assert!(Overs::new(3, 5).is_some());
        assert!(Overs::new(3, 6).is_none());
    }

    #[test]
    fn advance_carries_into_overs() {
        let mut clock = Overs::new(2, 4).unwrap();
        assert!(!clock.advance());
        assert_eq!(clock, Overs::new(2, 5).unwrap());

        assert!(clock.advance());
        assert_eq!(clock, Overs::new(3, 0).unwrap());
    }

    #[test]
    fn retract_borrows_from_overs() {
        let mut clock = Overs::new(3, 0).unwrap();
        clock.retract();
        assert_eq!(clock, Overs::new(2, 5).unwrap());
    }

    #[test]
    fn retract_at_start_of_innings_is_absorbed() {
        let mut clock = Overs::ZERO;
        clock.retract();
        clock.retract();
        assert_eq!(clock, Overs::ZERO);
    }

    #[test]
    fn advance_then_retract_is_identity() {
        let start = Overs::new(1, 3).unwrap();
        let mut clock = start;
        for _ in 0..20 {
            clock.advance();
        }
        assert_eq!(clock.total_balls(), start.total_balls() + 20);
        for _ in 0..20 {
            clock.retract();
        }
        assert_eq!(clock, start);
    }

    #[test]
    fn overs_saturate_instead_of_wrapping() {
        let mut clock = Overs::new(u8::MAX, 5).unwrap();
        clock.advance();
        assert_eq!(clock.overs(), u8::MAX);
        assert_eq!(clock.balls(), 0);
    }

    #[test]
    fn display_uses_cricket_notation() {
        assert_eq!(Overs::new(12, 4).unwrap().to_string(), "12.4");
    }
}
