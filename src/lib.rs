//! Ball-by-ball cricket scoring on an event-sourced match record.

pub mod aggregate;
pub mod config;
pub mod entity;
pub mod matches;
pub mod notify;
pub mod repository;
pub mod scoring;
pub mod service;
pub mod session;

pub use aggregate::{hydrate, Aggregate, AggregateBuilder, AggregateRepository};
pub use config::{ConfigError, ScoringConfig};
pub use entity::{Committable, Entity, EventRecord, PayloadError};
pub use matches::{MatchAggregate, MatchError, MatchSetup, MatchSnapshot, MatchStatus};
pub use notify::{ChannelNotifier, MatchNotification, MatchNotifier, NotificationKind};
pub use repository::{Commit, Find, Get, HashMapRepository, Repository, RepositoryError};
pub use scoring::{BallOutcome, InningsState, ScoringEngine, ScoringError};
pub use service::{ScoringService, ServiceError};
pub use session::{AllowAll, PanelGate, Session, SessionGate, SessionToken};

#[cfg(feature = "emitter")]
pub use notify::EmitterNotifier;
