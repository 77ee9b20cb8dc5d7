use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{ScoringConfig, DEFAULT_BALLS_PER_OVER, DEFAULT_MAX_WICKETS};
use crate::scoring::{Ball, Team};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
        })
    }
}

/// Rules fixed when the match is created, so replay never depends on the
/// config in force at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub balls_per_over: u32,
    pub max_wickets: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        MatchRules {
            balls_per_over: DEFAULT_BALLS_PER_OVER,
            max_wickets: DEFAULT_MAX_WICKETS,
        }
    }
}

impl From<&ScoringConfig> for MatchRules {
    fn from(config: &ScoringConfig) -> Self {
        MatchRules {
            balls_per_over: config.balls_per_over,
            max_wickets: config.max_wickets,
        }
    }
}

/// The create-match form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub heading: String,
    pub match_number: u32,
    pub team1_name: String,
    pub team2_name: String,
    pub team1_players: Vec<String>,
    pub team2_players: Vec<String>,
}

impl MatchSetup {
    /// Trimmed copy with blank roster rows dropped.
    pub fn normalized(&self) -> MatchSetup {
        fn roster(names: &[String]) -> Vec<String> {
            names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect()
        }

        MatchSetup {
            heading: self.heading.trim().to_string(),
            match_number: self.match_number,
            team1_name: self.team1_name.trim().to_string(),
            team2_name: self.team2_name.trim().to_string(),
            team1_players: roster(&self.team1_players),
            team2_players: roster(&self.team2_players),
        }
    }

    /// Checks a normalized setup against the squad limits.
    pub fn validate(&self, config: &ScoringConfig) -> Result<(), String> {
        if self.heading.is_empty() {
            return Err("match heading is required".into());
        }
        if self.match_number == 0 {
            return Err("match number is required".into());
        }
        for (label, name, players) in [
            ("Team 1", &self.team1_name, &self.team1_players),
            ("Team 2", &self.team2_name, &self.team2_players),
        ] {
            if name.is_empty() {
                return Err(format!("{} name is required", label));
            }
            if players.len() < config.min_players {
                return Err(format!(
                    "{} needs at least {} players",
                    label, config.min_players
                ));
            }
            if players.len() > config.max_players {
                return Err(format!(
                    "{} can have at most {} players",
                    label, config.max_players
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub runs: u32,
    pub wickets: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub player_id: String,
    pub runs_scored: u32,
    pub balls_faced: u32,
    pub is_out: bool,
}

/// The edit-scorecard form: overwrites totals after the fact and closes the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardAmendment {
    pub heading: String,
    pub match_number: u32,
    pub toss_winner: Option<String>,
    pub team1: TeamTotals,
    pub team2: TeamTotals,
    pub players: Vec<PlayerLine>,
}

/// Read model handed to viewers and persisted by callers that want a flat row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub id: String,
    pub heading: String,
    pub match_number: u32,
    pub status: MatchStatus,
    pub batting_team: Option<String>,
    pub toss_winner: Option<String>,
    pub current_over: u32,
    pub current_ball: u32,
    pub team1: Team,
    pub team2: Team,
    pub balls: Vec<Ball>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatsmanLine {
    pub player_id: String,
    pub name: String,
    pub runs_scored: u32,
    pub balls_faced: u32,
    pub strike_rate: f64,
    pub on_strike: bool,
}

/// What the live scoreboard shows for the batting side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub status: MatchStatus,
    pub batting_team: Option<String>,
    pub score: String,
    pub overs: String,
    pub run_rate: String,
    pub at_crease: Vec<BatsmanLine>,
    pub result: Option<String>,
}
