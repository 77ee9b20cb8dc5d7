//! Change notifications for match viewers.
//!
//! The service publishes one [`MatchNotification`] after every committed
//! mutation. Viewers subscribe per match id and reload the match when told
//! something changed.

mod channel;
#[cfg(feature = "emitter")]
mod emitter;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use channel::{ChannelNotifier, Subscription};
#[cfg(feature = "emitter")]
pub use emitter::EmitterNotifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    Created,
    Started,
    StrikerSelected,
    BallBowled,
    BallUndone,
    TossRecorded,
    Completed,
    ScorecardAmended,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchNotification {
    pub match_id: String,
    pub kind: NotificationKind,
    /// Entity version after the commit that triggered this notification.
    pub version: u64,
}

impl MatchNotification {
    pub fn new(match_id: impl Into<String>, kind: NotificationKind, version: u64) -> Self {
        MatchNotification {
            match_id: match_id.into(),
            kind,
            version,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    LockPoisoned(&'static str),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::LockPoisoned(what) => write!(f, "{} lock poisoned", what),
        }
    }
}

impl std::error::Error for NotifyError {}

/// Delivery side of the change feed.
///
/// Publishing never fails the mutation that triggered it: the commit has
/// already happened, so implementations log delivery problems and move on.
pub trait MatchNotifier: Send + Sync {
    fn publish(&self, notification: &MatchNotification);
}

impl<N: MatchNotifier + ?Sized> MatchNotifier for Arc<N> {
    fn publish(&self, notification: &MatchNotification) {
        (**self).publish(notification)
    }
}

/// Drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl MatchNotifier for NoopNotifier {
    fn publish(&self, _notification: &MatchNotification) {}
}
