use std::fmt;

use super::MatchStatus;
use crate::entity::PayloadError;
use crate::scoring::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Scoring(ScoringError),
    Payload(PayloadError),
    InvalidSetup(String),
    AlreadyCreated(String),
    NotCreated,
    AlreadyStarted,
    AlreadyCompleted,
    NotLive(MatchStatus),
    UnknownTeam(String),
    UnknownPlayer(String),
    PlayerOut(String),
    /// A stored event no longer fits the state rebuilt before it.
    ReplayMismatch(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Scoring(e) => write!(f, "{}", e),
            MatchError::Payload(e) => write!(f, "{}", e),
            MatchError::InvalidSetup(msg) => write!(f, "invalid match setup: {}", msg),
            MatchError::AlreadyCreated(id) => write!(f, "match {} already exists", id),
            MatchError::NotCreated => write!(f, "match has not been created"),
            MatchError::AlreadyStarted => write!(f, "match has already started"),
            MatchError::AlreadyCompleted => write!(f, "match is already completed"),
            MatchError::NotLive(status) => write!(f, "match is {}, not live", status),
            MatchError::UnknownTeam(id) => write!(f, "team {} is not part of this match", id),
            MatchError::UnknownPlayer(id) => write!(f, "player {} is not in the squad", id),
            MatchError::PlayerOut(id) => write!(f, "player {} is already out", id),
            MatchError::ReplayMismatch(msg) => write!(f, "replay mismatch: {}", msg),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Scoring(e) => Some(e),
            MatchError::Payload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScoringError> for MatchError {
    fn from(err: ScoringError) -> Self {
        MatchError::Scoring(err)
    }
}

impl From<PayloadError> for MatchError {
    fn from(err: PayloadError) -> Self {
        MatchError::Payload(err)
    }
}
