//! Scoreboard figures derived from scoring state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Player, Team};

/// Cricket notation for a count of legal balls: `"4.2"` is four overs and two balls.
pub fn overs_display(legal_balls: u32, balls_per_over: u32) -> String {
    let per_over = balls_per_over.max(1);
    format!("{}.{}", legal_balls / per_over, legal_balls % per_over)
}

/// Runs per over; 0 before the first legal ball.
pub fn run_rate(runs: u32, legal_balls: u32, balls_per_over: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    let overs = f64::from(legal_balls) / f64::from(balls_per_over.max(1));
    f64::from(runs) / overs
}

pub fn format_run_rate(runs: u32, legal_balls: u32, balls_per_over: u32) -> String {
    format!("{:.2}", run_rate(runs, legal_balls, balls_per_over))
}

/// Runs per hundred balls faced.
pub fn strike_rate(runs: u32, balls_faced: u32) -> f64 {
    if balls_faced == 0 {
        return 0.0;
    }
    f64::from(runs) * 100.0 / f64::from(balls_faced)
}

pub fn format_score(runs: u32, wickets: u32) -> String {
    format!("{}/{}", runs, wickets)
}

pub fn is_innings_complete(wickets: u32, max_wickets: u32) -> bool {
    wickets >= max_wickets
}

/// Wickets left before the side is all out (the last batsman cannot bat alone).
pub fn remaining_wickets(wickets: u32, squad_size: u32) -> u32 {
    squad_size.saturating_sub(1).saturating_sub(wickets)
}

pub fn batsmen_at_crease(players: &[Player]) -> Vec<&Player> {
    players.iter().filter(|p| p.at_crease()).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Margin {
    Runs(u32),
    Wickets(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Won {
        team_id: String,
        team_name: String,
        margin: Margin,
    },
    Tie,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Won {
                team_name,
                margin: Margin::Runs(n),
                ..
            } => write!(f, "{} won by {} runs", team_name, n),
            MatchResult::Won {
                team_name,
                margin: Margin::Wickets(n),
                ..
            } => write!(f, "{} won by {} wickets", team_name, n),
            MatchResult::Tie => f.write_str("Match tied"),
        }
    }
}

/// Team one bats first: a higher total wins by runs, a chase wins by wickets in hand.
pub fn match_result(team1: &Team, team2: &Team, max_wickets: u32) -> MatchResult {
    if team1.runs > team2.runs {
        MatchResult::Won {
            team_id: team1.id.clone(),
            team_name: team1.name.clone(),
            margin: Margin::Runs(team1.runs - team2.runs),
        }
    } else if team2.runs > team1.runs {
        MatchResult::Won {
            team_id: team2.id.clone(),
            team_name: team2.name.clone(),
            margin: Margin::Wickets(max_wickets.saturating_sub(team2.wickets)),
        }
    } else {
        MatchResult::Tie
    }
}
