use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub runs_scored: u32,
    pub balls_faced: u32,
    pub is_out: bool,
    pub is_on_strike: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, team_id: impl Into<String>, name: impl Into<String>) -> Self {
        Player {
            id: id.into(),
            team_id: team_id.into(),
            name: name.into(),
            runs_scored: 0,
            balls_faced: 0,
            is_out: false,
            is_on_strike: false,
        }
    }

    /// Not out and has faced at least one legal ball.
    pub fn at_crease(&self) -> bool {
        !self.is_out && self.balls_faced > 0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub match_id: String,
    pub name: String,
    pub runs: u32,
    pub wickets: u32,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(id: impl Into<String>, match_id: impl Into<String>, name: impl Into<String>) -> Self {
        Team {
            id: id.into(),
            match_id: match_id.into(),
            name: name.into(),
            runs: 0,
            wickets: 0,
            players: Vec::new(),
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The not-out player flagged on strike, if any.
    pub fn striker(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_on_strike && !p.is_out)
    }

    /// Clear every strike flag, then flag `id`. Returns false if `id` is not in the squad.
    pub fn set_striker(&mut self, id: &str) -> bool {
        if self.player(id).is_none() {
            return false;
        }
        for player in &mut self.players {
            player.is_on_strike = player.id == id;
        }
        true
    }

    /// The other batsman at the crease: first not-out player, other than
    /// `striker_id`, who has already faced a ball.
    pub fn partner_of(&self, striker_id: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.id != striker_id && p.at_crease())
    }

    /// Sum of legal balls faced across the squad.
    pub fn balls_faced(&self) -> u32 {
        self.players.iter().map(|p| p.balls_faced).sum()
    }
}

/// One delivery in a match's append-only ball log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub id: String,
    pub match_id: String,
    pub team_id: String,
    pub batsman_id: String,
    pub over_number: u32,
    /// `current_ball + 1` when bowled; a no-ball repeats the next legal number.
    pub ball_number: u32,
    pub runs: u32,
    pub is_wicket: bool,
    pub is_no_ball: bool,
}

impl Ball {
    /// Runs and balls this delivery credits to the batsman. No-balls credit nothing.
    pub fn batsman_credit(&self) -> (u32, u32) {
        if self.is_no_ball {
            (0, 0)
        } else {
            (self.runs, 1)
        }
    }
}

/// Everything the engine reads and writes for one delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsState {
    pub match_id: String,
    pub current_over: u32,
    pub current_ball: u32,
    pub batting_team: Team,
    pub balls: Vec<Ball>,
}

impl InningsState {
    pub fn new(match_id: impl Into<String>, batting_team: Team) -> Self {
        InningsState {
            match_id: match_id.into(),
            current_over: 0,
            current_ball: 0,
            batting_team,
            balls: Vec::new(),
        }
    }

    pub fn last_ball(&self) -> Option<&Ball> {
        self.balls.last()
    }

    /// Legal deliveries bowled so far, from the over/ball counters.
    pub fn legal_balls(&self, balls_per_over: u32) -> u32 {
        self.current_over * balls_per_over + self.current_ball
    }
}
