use serde::{Deserialize, Serialize};

use super::{Ball, BallOutcome, InningsState, ScoringError};
use crate::config::{ScoringConfig, DEFAULT_BALLS_PER_OVER};

/// Result of applying one delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallApplied {
    pub state: InningsState,
    pub ball: Ball,
    /// Set on a wicket: the caller must pick the incoming batsman.
    pub requires_new_batsman: bool,
}

/// Result of reverting the most recent delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallUndone {
    pub state: InningsState,
    pub ball: Ball,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringEngine {
    balls_per_over: u32,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        ScoringEngine {
            balls_per_over: DEFAULT_BALLS_PER_OVER,
        }
    }
}

impl ScoringEngine {
    pub fn new(balls_per_over: u32) -> Self {
        ScoringEngine {
            balls_per_over: balls_per_over.max(1),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        ScoringEngine::new(config.balls_per_over)
    }

    pub fn balls_per_over(&self) -> u32 {
        self.balls_per_over
    }

    /// Apply one delivery faced by `striker_id`.
    ///
    /// `state` is not modified; on error nothing is derived at all.
    pub fn apply_ball(
        &self,
        state: &InningsState,
        outcome: BallOutcome,
        striker_id: &str,
    ) -> Result<BallApplied, ScoringError> {
        let outcome = outcome.validate()?;
        let resolved = state
            .batting_team
            .player(striker_id)
            .is_some_and(|p| !p.is_out);
        if !resolved {
            return Err(ScoringError::NoStrikerResolved(striker_id.to_string()));
        }

        let is_wicket = outcome.is_wicket();
        let is_no_ball = outcome.is_no_ball();
        let runs = outcome.runs_awarded();

        let ball = Ball {
            id: format!("{}-b{}", state.match_id, state.balls.len() + 1),
            match_id: state.match_id.clone(),
            team_id: state.batting_team.id.clone(),
            batsman_id: striker_id.to_string(),
            over_number: state.current_over,
            ball_number: state.current_ball + 1,
            runs,
            is_wicket,
            is_no_ball,
        };

        let mut next = state.clone();
        if !is_no_ball {
            let (over, ball_in_over) = self.advance(state.current_over, state.current_ball);
            next.current_over = over;
            next.current_ball = ball_in_over;
        }

        let team = &mut next.batting_team;
        team.runs += runs;
        if is_wicket {
            team.wickets += 1;
        }

        let (credit_runs, credit_balls) = ball.batsman_credit();
        if let Some(striker) = team.player_mut(striker_id) {
            striker.runs_scored += credit_runs;
            striker.balls_faced += credit_balls;
            if is_wicket {
                striker.is_out = true;
                striker.is_on_strike = false;
            }
        }

        if !is_wicket {
            let on_strike = if runs % 2 == 1 {
                team.partner_of(striker_id)
                    .map(|p| p.id.clone())
                    .unwrap_or_else(|| striker_id.to_string())
            } else {
                striker_id.to_string()
            };
            team.set_striker(&on_strike);
        }

        next.balls.push(ball.clone());

        Ok(BallApplied {
            state: next,
            ball,
            requires_new_batsman: is_wicket,
        })
    }

    /// Revert the most recent delivery in `state.balls`.
    ///
    /// Counters step back one legal ball (borrowing an over, floored at 0.0);
    /// a no-ball never advanced them, so undoing one leaves them alone.
    pub fn undo_last_ball(&self, state: &InningsState) -> Result<BallUndone, ScoringError> {
        let Some(ball) = state.balls.last().cloned() else {
            return Err(ScoringError::EmptyBallLog);
        };

        let mut next = state.clone();
        next.balls.pop();

        if !ball.is_no_ball {
            let (over, ball_in_over) = self.rewind(state.current_over, state.current_ball);
            next.current_over = over;
            next.current_ball = ball_in_over;
        }

        let team = &mut next.batting_team;
        team.runs = team.runs.saturating_sub(ball.runs);
        if ball.is_wicket {
            team.wickets = team.wickets.saturating_sub(1);
        }

        let (credit_runs, credit_balls) = ball.batsman_credit();
        if let Some(batsman) = team.player_mut(&ball.batsman_id) {
            batsman.runs_scored = batsman.runs_scored.saturating_sub(credit_runs);
            batsman.balls_faced = batsman.balls_faced.saturating_sub(credit_balls);
            batsman.is_out = false;
        }
        team.set_striker(&ball.batsman_id);

        Ok(BallUndone { state: next, ball })
    }

    fn advance(&self, over: u32, ball: u32) -> (u32, u32) {
        let next = ball + 1;
        if next >= self.balls_per_over {
            (over + 1, 0)
        } else {
            (over, next)
        }
    }

    fn rewind(&self, over: u32, ball: u32) -> (u32, u32) {
        match (over, ball) {
            (0, 0) => (0, 0),
            (over, 0) => (over - 1, self.balls_per_over - 1),
            (over, ball) => (over, ball - 1),
        }
    }
}
