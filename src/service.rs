//! What the scorer panel does for each button press.
//!
//! Every mutation follows the same path: check the session, load the match,
//! run the command, commit, then tell viewers. A command that fails leaves
//! both the store and the change feed untouched.

use std::error::Error;
use std::fmt;

use crate::aggregate::{AggregateBuilder, AggregateRepository};
use crate::config::{ConfigError, ScoringConfig};
use crate::matches::{
    MatchAggregate, MatchError, MatchSetup, MatchSnapshot, MatchStatus, ScorecardAmendment,
    Scoreboard,
};
use crate::notify::{MatchNotification, MatchNotifier, NotificationKind};
use crate::repository::{Repository, RepositoryError};
use crate::scoring::{Ball, BallApplied, BallOutcome};
use crate::session::SessionGate;

#[derive(Debug)]
pub enum ServiceError {
    /// The caller's session may not change matches.
    Unauthorized,
    NotFound(String),
    /// The match rejected the command.
    Match(MatchError),
    Repository(RepositoryError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Unauthorized => write!(f, "unauthorized"),
            ServiceError::NotFound(id) => write!(f, "match not found: {}", id),
            ServiceError::Match(e) => write!(f, "rejected: {}", e),
            ServiceError::Repository(e) => write!(f, "repository error: {}", e),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Match(e) => Some(e),
            ServiceError::Repository(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MatchError> for ServiceError {
    fn from(err: MatchError) -> Self {
        ServiceError::Match(err)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::Repository(err)
    }
}

pub struct ScoringService<R, N> {
    matches: AggregateRepository<R, MatchAggregate>,
    notifier: N,
    config: ScoringConfig,
}

impl<R, N> ScoringService<R, N>
where
    R: Repository,
    N: MatchNotifier,
{
    /// Fails if `config` does not validate, so rules stored on new matches
    /// are always usable by the engine.
    pub fn new(repo: R, notifier: N, config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ScoringService {
            matches: repo.aggregate::<MatchAggregate>(),
            notifier,
            config,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn repo(&self) -> &R {
        self.matches.repo()
    }

    // ------------------------------------------------------------------
    // Panel commands
    // ------------------------------------------------------------------

    pub fn create_match(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        setup: &MatchSetup,
    ) -> Result<MatchSnapshot, ServiceError> {
        self.open(gate, id, NotificationKind::Created, |game, config| {
            game.create(id, setup, config)
        })
    }

    /// Back-fill a result for a match that was never scored live.
    pub fn record_completed(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        setup: &MatchSetup,
    ) -> Result<MatchSnapshot, ServiceError> {
        self.open(gate, id, NotificationKind::Completed, |game, config| {
            game.record_completed(id, setup, config)
        })
    }

    pub fn start(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        batting_team: Option<&str>,
    ) -> Result<MatchSnapshot, ServiceError> {
        self.mutate(gate, id, NotificationKind::Started, |game| {
            game.start(batting_team)?;
            Ok(game.snapshot())
        })
    }

    pub fn select_striker(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        player_id: &str,
    ) -> Result<MatchSnapshot, ServiceError> {
        self.mutate(gate, id, NotificationKind::StrikerSelected, |game| {
            game.select_striker(player_id)?;
            Ok(game.snapshot())
        })
    }

    pub fn bowl(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        outcome: BallOutcome,
        striker_id: Option<&str>,
    ) -> Result<BallApplied, ServiceError> {
        let applied = self.mutate(gate, id, NotificationKind::BallBowled, |game| {
            game.bowl(outcome, striker_id)
        })?;
        tracing::debug!(
            match_id = %id,
            ball = %applied.ball.id,
            batsman = %applied.ball.batsman_id,
            %outcome,
            over = applied.state.current_over,
            ball_in_over = applied.state.current_ball,
            "ball bowled"
        );
        if applied.requires_new_batsman {
            tracing::info!(match_id = %id, "wicket; waiting for the next batsman");
        }
        Ok(applied)
    }

    pub fn undo(&self, gate: &dyn SessionGate, id: &str) -> Result<Ball, ServiceError> {
        let ball = self.mutate(gate, id, NotificationKind::BallUndone, |game| {
            game.undo_last_ball()
        })?;
        tracing::debug!(match_id = %id, ball = %ball.id, "ball undone");
        Ok(ball)
    }

    pub fn record_toss(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        team_id: &str,
    ) -> Result<MatchSnapshot, ServiceError> {
        self.mutate(gate, id, NotificationKind::TossRecorded, |game| {
            game.record_toss(team_id)?;
            Ok(game.snapshot())
        })
    }

    pub fn complete(&self, gate: &dyn SessionGate, id: &str) -> Result<MatchSnapshot, ServiceError> {
        self.mutate(gate, id, NotificationKind::Completed, |game| {
            game.complete()?;
            Ok(game.snapshot())
        })
    }

    pub fn amend(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        amendment: &ScorecardAmendment,
    ) -> Result<MatchSnapshot, ServiceError> {
        self.mutate(gate, id, NotificationKind::ScorecardAmended, |game| {
            game.amend_scorecard(amendment)?;
            Ok(game.snapshot())
        })
    }

    // ------------------------------------------------------------------
    // Viewer queries
    // ------------------------------------------------------------------

    pub fn get(&self, id: &str) -> Result<MatchAggregate, ServiceError> {
        self.matches
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    pub fn snapshot(&self, id: &str) -> Result<MatchSnapshot, ServiceError> {
        Ok(self.get(id)?.snapshot())
    }

    pub fn scoreboard(&self, id: &str) -> Result<Scoreboard, ServiceError> {
        Ok(self.get(id)?.scoreboard())
    }

    /// Every match, in creation order.
    pub fn list(&self) -> Result<Vec<MatchSnapshot>, ServiceError> {
        let matches = self.matches.find(|_| true)?;
        Ok(matches.iter().map(MatchAggregate::snapshot).collect())
    }

    pub fn list_by_status(&self, status: MatchStatus) -> Result<Vec<MatchSnapshot>, ServiceError> {
        let matches = self.matches.find(|game| game.status() == status)?;
        Ok(matches.iter().map(MatchAggregate::snapshot).collect())
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn authorize(&self, gate: &dyn SessionGate, id: &str) -> Result<(), ServiceError> {
        if gate.can_mutate() {
            Ok(())
        } else {
            tracing::warn!(match_id = %id, "mutation without a panel session");
            Err(ServiceError::Unauthorized)
        }
    }

    /// Run a command against a brand-new aggregate.
    fn open<F>(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        kind: NotificationKind,
        command: F,
    ) -> Result<MatchSnapshot, ServiceError>
    where
        F: FnOnce(&mut MatchAggregate, &ScoringConfig) -> Result<(), MatchError>,
    {
        self.authorize(gate, id)?;
        if self.matches.get(id)?.is_some() {
            return Err(MatchError::AlreadyCreated(id.to_string()).into());
        }

        let mut game = MatchAggregate::new();
        if let Err(err) = command(&mut game, &self.config) {
            tracing::warn!(match_id = %id, %err, "match not created");
            return Err(err.into());
        }
        self.commit(&mut game, kind)?;
        Ok(game.snapshot())
    }

    /// Load, run, commit, publish.
    fn mutate<T, F>(
        &self,
        gate: &dyn SessionGate,
        id: &str,
        kind: NotificationKind,
        command: F,
    ) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut MatchAggregate) -> Result<T, MatchError>,
    {
        self.authorize(gate, id)?;
        let mut game = self.get(id)?;

        let output = match command(&mut game) {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(match_id = %id, %kind, %err, "command rejected");
                return Err(err.into());
            }
        };
        self.commit(&mut game, kind)?;
        Ok(output)
    }

    fn commit(&self, game: &mut MatchAggregate, kind: NotificationKind) -> Result<(), ServiceError> {
        self.matches.commit(game)?;
        let notification = MatchNotification::new(game.id(), kind, game.entity.version());
        tracing::info!(
            match_id = %notification.match_id,
            %kind,
            version = notification.version,
            status = %game.status(),
            "match updated"
        );
        self.notifier.publish(&notification);
        Ok(())
    }
}
