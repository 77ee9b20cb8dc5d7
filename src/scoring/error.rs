use std::fmt;

/// Validation failures raised before any state is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// The value is not one of 0..=6, `OUT` or `NOBALL`.
    InvalidOutcome(String),
    /// The id does not name a not-out player of the batting team.
    NoStrikerResolved(String),
    /// Undo was requested with no balls recorded.
    EmptyBallLog,
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::InvalidOutcome(value) => write!(f, "invalid ball outcome: {}", value),
            ScoringError::NoStrikerResolved(id) => {
                write!(f, "no striker resolved for player {:?}", id)
            }
            ScoringError::EmptyBallLog => write!(f, "no balls to undo"),
        }
    }
}

impl std::error::Error for ScoringError {}
