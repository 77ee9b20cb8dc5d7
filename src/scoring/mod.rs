//! Ball-by-ball scoring.
//!
//! [`ScoringEngine`] is a pure reducer: it takes an [`InningsState`] snapshot
//! and a [`BallOutcome`] and returns a new snapshot, or reverts the most
//! recent ball. It never mutates its input, so a rejected ball leaves the
//! caller's state untouched.

mod engine;
mod error;
mod outcome;
mod state;
pub mod summary;

pub use engine::{BallApplied, BallUndone, ScoringEngine};
pub use error::ScoringError;
pub use outcome::{BallOutcome, MAX_RUNS_OFF_BALL};
pub use state::{Ball, InningsState, Player, Team};
