//! Scoring service integration tests.
//!
//! Exercises the panel workflow end to end:
//! - Session gate in front of every mutation
//! - One notification per committed change, scoped to its match
//! - Viewer queries over the record store
