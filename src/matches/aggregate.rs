use crate::config::ScoringConfig;
use crate::entity::{Entity, EventRecord};
use crate::scoring::summary;
use crate::scoring::{
    Ball, BallApplied, BallOutcome, BallUndone, InningsState, Player, ScoringEngine, ScoringError,
    Team,
};

use super::{
    BatsmanLine, MatchError, MatchEvent, MatchRules, MatchSetup, MatchSnapshot, MatchStatus,
    PlayerLine, ScorecardAmendment, Scoreboard, TeamTotals,
};

/// One cricket match, rebuilt from its event stream.
///
/// Commands validate first, then encode the event, then apply it. A command
/// that returns an error has recorded nothing and changed nothing.
#[derive(Default)]
pub struct MatchAggregate {
    pub entity: Entity,
    created: bool,
    heading: String,
    match_number: u32,
    rules: MatchRules,
    status: MatchStatus,
    team1: Team,
    team2: Team,
    batting_team: Option<String>,
    toss_winner: Option<String>,
    current_over: u32,
    current_ball: u32,
    balls: Vec<Ball>,
}

impl MatchAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn create(
        &mut self,
        id: impl Into<String>,
        setup: &MatchSetup,
        config: &ScoringConfig,
    ) -> Result<(), MatchError> {
        let id = id.into();
        if self.created {
            return Err(MatchError::AlreadyCreated(self.id().to_string()));
        }
        if id.trim().is_empty() {
            return Err(MatchError::InvalidSetup("match id is required".into()));
        }
        let setup = setup.normalized();
        setup.validate(config).map_err(MatchError::InvalidSetup)?;

        self.execute(MatchEvent::Created {
            id,
            setup,
            rules: MatchRules::from(config),
        })
    }

    /// Back-fill a match that was played without live scoring.
    pub fn record_completed(
        &mut self,
        id: impl Into<String>,
        setup: &MatchSetup,
        config: &ScoringConfig,
    ) -> Result<(), MatchError> {
        self.create(id, setup, config)?;
        self.execute(MatchEvent::Completed)
    }

    /// Put a team in to bat and go live. Team one bats when none is named.
    pub fn start(&mut self, batting_team: Option<&str>) -> Result<(), MatchError> {
        self.require_created()?;
        let batting_team = batting_team.unwrap_or(self.team1.id.as_str()).to_string();
        self.execute(MatchEvent::Started { batting_team })
    }

    pub fn select_striker(&mut self, player_id: &str) -> Result<(), MatchError> {
        self.execute(MatchEvent::StrikerSelected {
            player_id: player_id.to_string(),
        })
    }

    /// Score one delivery. With no `striker_id`, the batsman flagged on strike faces it.
    pub fn bowl(
        &mut self,
        outcome: BallOutcome,
        striker_id: Option<&str>,
    ) -> Result<BallApplied, MatchError> {
        self.require_live()?;
        let striker_id = match striker_id {
            Some(id) => id.to_string(),
            None => self
                .striker()
                .map(|p| p.id.clone())
                .ok_or_else(|| ScoringError::NoStrikerResolved(String::new()))?,
        };

        let event = MatchEvent::BallBowled {
            outcome,
            striker_id: striker_id.clone(),
        };
        let payload = event.encode()?;
        let applied = self.bowled(outcome, &striker_id)?;
        self.entity.record(event.event_name(), payload);
        Ok(applied)
    }

    pub fn undo_last_ball(&mut self) -> Result<Ball, MatchError> {
        self.require_live()?;
        let ball_id = self
            .balls
            .last()
            .map(|b| b.id.clone())
            .ok_or(ScoringError::EmptyBallLog)?;

        let event = MatchEvent::BallUndone {
            ball_id: ball_id.clone(),
        };
        let payload = event.encode()?;
        let undone = self.undone(&ball_id)?;
        self.entity.record(event.event_name(), payload);
        Ok(undone.ball)
    }

    pub fn record_toss(&mut self, team_id: &str) -> Result<(), MatchError> {
        self.execute(MatchEvent::TossRecorded {
            team_id: team_id.to_string(),
        })
    }

    /// Close a live match. Use `record_completed` for matches never scored live.
    pub fn complete(&mut self) -> Result<(), MatchError> {
        if self.status == MatchStatus::Completed {
            return Err(MatchError::AlreadyCompleted);
        }
        self.require_live()?;
        self.execute(MatchEvent::Completed)
    }

    pub fn amend_scorecard(&mut self, amendment: &ScorecardAmendment) -> Result<(), MatchError> {
        self.execute(MatchEvent::ScorecardAmended(amendment.clone()))
    }

    // ------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------

    fn execute(&mut self, event: MatchEvent) -> Result<(), MatchError> {
        let payload = event.encode()?;
        self.apply(&event)?;
        self.entity.record(event.event_name(), payload);
        Ok(())
    }

    /// Replay hook used by `hydrate`.
    pub fn replay(&mut self, record: &EventRecord) -> Result<(), String> {
        let event = MatchEvent::try_from(record).map_err(|e| e.to_string())?;
        self.apply(&event).map_err(|e| e.to_string())
    }

    /// Validate `event` against the current state, then change the state.
    /// Everything fallible happens before the first write.
    fn apply(&mut self, event: &MatchEvent) -> Result<(), MatchError> {
        match event {
            MatchEvent::Created { id, setup, rules } => {
                if self.created {
                    return Err(MatchError::AlreadyCreated(self.id().to_string()));
                }
                self.entity.set_id(id.as_str());
                self.created = true;
                self.heading = setup.heading.clone();
                self.match_number = setup.match_number;
                self.rules = *rules;
                self.status = MatchStatus::Upcoming;
                self.team1 = roster(id, "t1", &setup.team1_name, &setup.team1_players);
                self.team2 = roster(id, "t2", &setup.team2_name, &setup.team2_players);
            }
            MatchEvent::Started { batting_team } => {
                self.require_created()?;
                match self.status {
                    MatchStatus::Upcoming => {}
                    MatchStatus::Live => return Err(MatchError::AlreadyStarted),
                    MatchStatus::Completed => return Err(MatchError::AlreadyCompleted),
                }
                if self.team(batting_team).is_none() {
                    return Err(MatchError::UnknownTeam(batting_team.clone()));
                }
                self.batting_team = Some(batting_team.clone());
                self.status = MatchStatus::Live;
            }
            MatchEvent::StrikerSelected { player_id } => {
                self.require_live()?;
                let team = self.batting_team_mut()?;
                match team.player(player_id) {
                    None => return Err(MatchError::UnknownPlayer(player_id.clone())),
                    Some(p) if p.is_out => return Err(MatchError::PlayerOut(player_id.clone())),
                    Some(_) => {}
                }
                team.set_striker(player_id);
            }
            MatchEvent::BallBowled {
                outcome,
                striker_id,
            } => {
                self.bowled(*outcome, striker_id)?;
            }
            MatchEvent::BallUndone { ball_id } => {
                self.undone(ball_id)?;
            }
            MatchEvent::TossRecorded { team_id } => {
                self.require_created()?;
                if self.status == MatchStatus::Completed {
                    return Err(MatchError::AlreadyCompleted);
                }
                if self.team(team_id).is_none() {
                    return Err(MatchError::UnknownTeam(team_id.clone()));
                }
                self.toss_winner = Some(team_id.clone());
            }
            MatchEvent::Completed => {
                self.require_created()?;
                if self.status == MatchStatus::Completed {
                    return Err(MatchError::AlreadyCompleted);
                }
                self.status = MatchStatus::Completed;
                for player in self.team1.players.iter_mut().chain(self.team2.players.iter_mut()) {
                    player.is_on_strike = false;
                }
            }
            MatchEvent::ScorecardAmended(amendment) => {
                self.require_created()?;
                self.check_amendment(amendment)?;
                self.heading = amendment.heading.trim().to_string();
                self.match_number = amendment.match_number;
                self.toss_winner = amendment.toss_winner.clone();
                set_totals(&mut self.team1, amendment.team1);
                set_totals(&mut self.team2, amendment.team2);
                let players = self.team1.players.iter_mut().chain(self.team2.players.iter_mut());
                for player in players {
                    if let Some(line) = amendment.players.iter().find(|l| l.player_id == player.id) {
                        player.runs_scored = line.runs_scored;
                        player.balls_faced = line.balls_faced;
                        player.is_out = line.is_out;
                        player.is_on_strike = false;
                    }
                }
                self.status = MatchStatus::Completed;
            }
        }
        Ok(())
    }

    fn bowled(&mut self, outcome: BallOutcome, striker_id: &str) -> Result<BallApplied, MatchError> {
        self.require_live()?;
        let applied = self
            .engine()
            .apply_ball(&self.innings()?, outcome, striker_id)?;
        self.store_innings(&applied.state)?;
        Ok(applied)
    }

    fn undone(&mut self, ball_id: &str) -> Result<BallUndone, MatchError> {
        self.require_live()?;
        match self.balls.last() {
            Some(last) if last.id == ball_id => {}
            Some(last) => {
                return Err(MatchError::ReplayMismatch(format!(
                    "undo of {} but last ball is {}",
                    ball_id, last.id
                )))
            }
            None => return Err(ScoringError::EmptyBallLog.into()),
        }
        let undone = self.engine().undo_last_ball(&self.innings()?)?;
        self.store_innings(&undone.state)?;
        Ok(undone)
    }

    fn check_amendment(&self, amendment: &ScorecardAmendment) -> Result<(), MatchError> {
        if amendment.heading.trim().is_empty() {
            return Err(MatchError::InvalidSetup("match heading is required".into()));
        }
        if amendment.match_number == 0 {
            return Err(MatchError::InvalidSetup("match number is required".into()));
        }
        if let Some(team_id) = &amendment.toss_winner {
            if self.team(team_id).is_none() {
                return Err(MatchError::UnknownTeam(team_id.clone()));
            }
        }
        for line in &amendment.players {
            if self.player(&line.player_id).is_none() {
                return Err(MatchError::UnknownPlayer(line.player_id.clone()));
            }
        }
        Ok(())
    }

    fn require_created(&self) -> Result<(), MatchError> {
        if self.created {
            Ok(())
        } else {
            Err(MatchError::NotCreated)
        }
    }

    fn require_live(&self) -> Result<(), MatchError> {
        self.require_created()?;
        if self.status == MatchStatus::Live {
            Ok(())
        } else {
            Err(MatchError::NotLive(self.status))
        }
    }

    fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.rules.balls_per_over)
    }

    /// Snapshot of the batting side for the engine.
    pub fn innings(&self) -> Result<InningsState, MatchError> {
        let team = self.batting_team().ok_or(MatchError::NotLive(self.status))?;
        Ok(InningsState {
            match_id: self.id().to_string(),
            current_over: self.current_over,
            current_ball: self.current_ball,
            batting_team: team.clone(),
            balls: self.balls.clone(),
        })
    }

    fn store_innings(&mut self, state: &InningsState) -> Result<(), MatchError> {
        let team = self.batting_team_mut()?;
        *team = state.batting_team.clone();
        self.current_over = state.current_over;
        self.current_ball = state.current_ball;
        self.balls = state.balls.clone();
        Ok(())
    }

    fn batting_team_mut(&mut self) -> Result<&mut Team, MatchError> {
        let status = self.status;
        match self.batting_team.as_deref() {
            Some(id) if id == self.team1.id => Ok(&mut self.team1),
            Some(id) if id == self.team2.id => Ok(&mut self.team2),
            _ => Err(MatchError::NotLive(status)),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn match_number(&self) -> u32 {
        self.match_number
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    pub fn team1(&self) -> &Team {
        &self.team1
    }

    pub fn team2(&self) -> &Team {
        &self.team2
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        [&self.team1, &self.team2]
            .into_iter()
            .find(|t| t.id == team_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.team1
            .player(player_id)
            .or_else(|| self.team2.player(player_id))
    }

    pub fn batting_team(&self) -> Option<&Team> {
        self.batting_team.as_deref().and_then(|id| self.team(id))
    }

    pub fn bowling_team(&self) -> Option<&Team> {
        let batting = self.batting_team.as_deref()?;
        [&self.team1, &self.team2]
            .into_iter()
            .find(|t| t.id != batting)
    }

    pub fn toss_winner(&self) -> Option<&str> {
        self.toss_winner.as_deref()
    }

    pub fn current_over(&self) -> u32 {
        self.current_over
    }

    pub fn current_ball(&self) -> u32 {
        self.current_ball
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// The not-out batsman flagged on strike for the batting side.
    pub fn striker(&self) -> Option<&Player> {
        self.batting_team().and_then(Team::striker)
    }

    /// Live with nobody on strike: the panel must ask for a batsman before the next ball.
    pub fn needs_striker(&self) -> bool {
        self.status == MatchStatus::Live && self.striker().is_none()
    }

    /// Current values, ready to prefill the edit-scorecard form.
    pub fn amendment(&self) -> ScorecardAmendment {
        ScorecardAmendment {
            heading: self.heading.clone(),
            match_number: self.match_number,
            toss_winner: self.toss_winner.clone(),
            team1: TeamTotals {
                runs: self.team1.runs,
                wickets: self.team1.wickets,
            },
            team2: TeamTotals {
                runs: self.team2.runs,
                wickets: self.team2.wickets,
            },
            players: self
                .team1
                .players
                .iter()
                .chain(self.team2.players.iter())
                .map(|p| PlayerLine {
                    player_id: p.id.clone(),
                    runs_scored: p.runs_scored,
                    balls_faced: p.balls_faced,
                    is_out: p.is_out,
                })
                .collect(),
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            id: self.id().to_string(),
            heading: self.heading.clone(),
            match_number: self.match_number,
            status: self.status,
            batting_team: self.batting_team.clone(),
            toss_winner: self.toss_winner.clone(),
            current_over: self.current_over,
            current_ball: self.current_ball,
            team1: self.team1.clone(),
            team2: self.team2.clone(),
            balls: self.balls.clone(),
        }
    }

    pub fn result(&self) -> Option<summary::MatchResult> {
        (self.status == MatchStatus::Completed)
            .then(|| summary::match_result(&self.team1, &self.team2, self.rules.max_wickets))
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let per_over = self.rules.balls_per_over;
        let legal_balls = self.current_over * per_over + self.current_ball;
        let (score, run_rate, at_crease) = match self.batting_team() {
            Some(team) => (
                summary::format_score(team.runs, team.wickets),
                summary::format_run_rate(team.runs, legal_balls, per_over),
                summary::batsmen_at_crease(&team.players)
                    .into_iter()
                    .map(|p| BatsmanLine {
                        player_id: p.id.clone(),
                        name: p.name.clone(),
                        runs_scored: p.runs_scored,
                        balls_faced: p.balls_faced,
                        strike_rate: summary::strike_rate(p.runs_scored, p.balls_faced),
                        on_strike: p.is_on_strike,
                    })
                    .collect(),
            ),
            None => (
                summary::format_score(0, 0),
                summary::format_run_rate(0, 0, per_over),
                Vec::new(),
            ),
        };

        Scoreboard {
            status: self.status,
            batting_team: self.batting_team().map(|t| t.name.clone()),
            score,
            overs: summary::overs_display(legal_balls, per_over),
            run_rate,
            at_crease,
            result: self.result().map(|r| r.to_string()),
        }
    }
}

crate::impl_aggregate!(MatchAggregate, entity, replay);

fn roster(match_id: &str, slot: &str, name: &str, players: &[String]) -> Team {
    let team_id = format!("{}-{}", match_id, slot);
    let mut team = Team::new(team_id.as_str(), match_id, name);
    team.players = players
        .iter()
        .enumerate()
        .map(|(i, player)| {
            Player::new(
                format!("{}-p{}", team_id, i + 1),
                team_id.as_str(),
                player.as_str(),
            )
        })
        .collect();
    team
}

fn set_totals(team: &mut Team, totals: TeamTotals) {
    team.runs = totals.runs;
    team.wickets = totals.wickets;
}
