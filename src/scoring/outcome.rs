use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ScoringError;

/// Most runs a single delivery can be scored for.
pub const MAX_RUNS_OFF_BALL: u8 = 6;

/// What happened on one delivery, as tapped by the scorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallOutcome {
    Runs(u8),
    Out,
    NoBall,
}

impl BallOutcome {
    /// Every outcome the scorer panel offers, in display order.
    pub const ALL: [BallOutcome; 9] = [
        BallOutcome::Runs(0),
        BallOutcome::Runs(1),
        BallOutcome::Runs(2),
        BallOutcome::Runs(3),
        BallOutcome::Runs(4),
        BallOutcome::Runs(5),
        BallOutcome::Runs(6),
        BallOutcome::Out,
        BallOutcome::NoBall,
    ];

    pub fn runs(value: u8) -> Result<Self, ScoringError> {
        BallOutcome::Runs(value).validate()
    }

    /// Rejects a hand-built `Runs` above six.
    pub fn validate(self) -> Result<Self, ScoringError> {
        match self {
            BallOutcome::Runs(value) if value > MAX_RUNS_OFF_BALL => {
                Err(ScoringError::InvalidOutcome(value.to_string()))
            }
            _ => Ok(self),
        }
    }

    pub fn is_wicket(self) -> bool {
        matches!(self, BallOutcome::Out)
    }

    pub fn is_no_ball(self) -> bool {
        matches!(self, BallOutcome::NoBall)
    }

    /// Runs added to the team total: one for a no-ball, none for a wicket.
    pub fn runs_awarded(self) -> u32 {
        match self {
            BallOutcome::Runs(value) => u32::from(value),
            BallOutcome::Out => 0,
            BallOutcome::NoBall => 1,
        }
    }
}

impl TryFrom<u8> for BallOutcome {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BallOutcome::runs(value)
    }
}

impl FromStr for BallOutcome {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("OUT") {
            return Ok(BallOutcome::Out);
        }
        if token.eq_ignore_ascii_case("NOBALL") {
            return Ok(BallOutcome::NoBall);
        }
        // Exactly one digit: no sign, no padding.
        let mut chars = token.chars();
        match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
            (Some(digit), None) => BallOutcome::runs(digit as u8),
            _ => Err(ScoringError::InvalidOutcome(token.to_string())),
        }
    }
}

impl fmt::Display for BallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallOutcome::Runs(value) => write!(f, "{}", value),
            BallOutcome::Out => f.write_str("OUT"),
            BallOutcome::NoBall => f.write_str("NOBALL"),
        }
    }
}
