use crate::entity::{encode_payload, EventRecord, PayloadError};
use crate::scoring::BallOutcome;

use super::{MatchRules, MatchSetup, ScorecardAmendment};

/// Every change a match can go through, as stored in its event stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchEvent {
    Created {
        id: String,
        setup: MatchSetup,
        rules: MatchRules,
    },
    Started {
        batting_team: String,
    },
    StrikerSelected {
        player_id: String,
    },
    BallBowled {
        outcome: BallOutcome,
        striker_id: String,
    },
    BallUndone {
        ball_id: String,
    },
    TossRecorded {
        team_id: String,
    },
    Completed,
    ScorecardAmended(ScorecardAmendment),
}

impl MatchEvent {
    pub const CREATED: &'static str = "MatchCreated";
    pub const STARTED: &'static str = "MatchStarted";
    pub const STRIKER_SELECTED: &'static str = "StrikerSelected";
    pub const BALL_BOWLED: &'static str = "BallBowled";
    pub const BALL_UNDONE: &'static str = "BallUndone";
    pub const TOSS_RECORDED: &'static str = "TossRecorded";
    pub const COMPLETED: &'static str = "MatchCompleted";
    pub const SCORECARD_AMENDED: &'static str = "ScorecardAmended";

    pub fn event_name(&self) -> &'static str {
        match self {
            MatchEvent::Created { .. } => Self::CREATED,
            MatchEvent::Started { .. } => Self::STARTED,
            MatchEvent::StrikerSelected { .. } => Self::STRIKER_SELECTED,
            MatchEvent::BallBowled { .. } => Self::BALL_BOWLED,
            MatchEvent::BallUndone { .. } => Self::BALL_UNDONE,
            MatchEvent::TossRecorded { .. } => Self::TOSS_RECORDED,
            MatchEvent::Completed => Self::COMPLETED,
            MatchEvent::ScorecardAmended(_) => Self::SCORECARD_AMENDED,
        }
    }

    /// Bitcode payload for the event stream.
    pub fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        let name = self.event_name();
        match self {
            MatchEvent::Created { id, setup, rules } => encode_payload(name, &(id, setup, rules)),
            MatchEvent::Started { batting_team } => encode_payload(name, batting_team),
            MatchEvent::StrikerSelected { player_id } => encode_payload(name, player_id),
            MatchEvent::BallBowled {
                outcome,
                striker_id,
            } => encode_payload(name, &(outcome, striker_id)),
            MatchEvent::BallUndone { ball_id } => encode_payload(name, ball_id),
            MatchEvent::TossRecorded { team_id } => encode_payload(name, team_id),
            MatchEvent::Completed => encode_payload(name, &()),
            MatchEvent::ScorecardAmended(amendment) => encode_payload(name, amendment),
        }
    }
}

impl TryFrom<&EventRecord> for MatchEvent {
    type Error = PayloadError;

    fn try_from(record: &EventRecord) -> Result<Self, Self::Error> {
        let event = match record.event_name.as_str() {
            Self::CREATED => {
                let (id, setup, rules) = record.decode::<(String, MatchSetup, MatchRules)>()?;
                MatchEvent::Created { id, setup, rules }
            }
            Self::STARTED => MatchEvent::Started {
                batting_team: record.decode()?,
            },
            Self::STRIKER_SELECTED => MatchEvent::StrikerSelected {
                player_id: record.decode()?,
            },
            Self::BALL_BOWLED => {
                let (outcome, striker_id) = record.decode::<(BallOutcome, String)>()?;
                MatchEvent::BallBowled {
                    outcome,
                    striker_id,
                }
            }
            Self::BALL_UNDONE => MatchEvent::BallUndone {
                ball_id: record.decode()?,
            },
            Self::TOSS_RECORDED => MatchEvent::TossRecorded {
                team_id: record.decode()?,
            },
            Self::COMPLETED => MatchEvent::Completed,
            Self::SCORECARD_AMENDED => MatchEvent::ScorecardAmended(record.decode()?),
            other => {
                return Err(PayloadError {
                    event_name: other.to_string(),
                    message: "unknown match event".to_string(),
                })
            }
        };
        Ok(event)
    }
}
