//! Event-sourced match records driven by the scorer panel.

mod aggregate;
mod error;
mod events;
mod model;

pub use aggregate::MatchAggregate;
pub use error::MatchError;
pub use events::MatchEvent;
pub use model::{
    BatsmanLine, MatchRules, MatchSetup, MatchSnapshot, MatchStatus, PlayerLine,
    ScorecardAmendment, Scoreboard, TeamTotals,
};
