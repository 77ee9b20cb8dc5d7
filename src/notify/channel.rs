use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{MatchNotification, MatchNotifier, NotifyError};

/// In-process change feed backed by `std::sync::mpsc` channels.
///
/// Cheap to clone; clones share the same subscriber table, so the service can
/// own one handle while viewers subscribe through another.
#[derive(Clone, Default)]
pub struct ChannelNotifier {
    subscribers: Arc<Mutex<HashMap<String, Vec<Sender<MatchNotification>>>>>,
}

impl ChannelNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every notification published for `match_id` from now on.
    pub fn subscribe(&self, match_id: &str) -> Result<Subscription, NotifyError> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .map_err(|_| NotifyError::LockPoisoned("subscribers"))?
            .entry(match_id.to_string())
            .or_default()
            .push(tx);
        Ok(Subscription {
            match_id: match_id.to_string(),
            receiver: rx,
        })
    }

    /// Live subscriptions for `match_id`, counting only those seen open at the last publish.
    pub fn subscriber_count(&self, match_id: &str) -> usize {
        self.subscribers
            .lock()
            .map(|subs| subs.get(match_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl MatchNotifier for ChannelNotifier {
    fn publish(&self, notification: &MatchNotification) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            tracing::warn!(
                match_id = %notification.match_id,
                "subscriber table poisoned, notification dropped"
            );
            return;
        };
        let Some(senders) = subscribers.get_mut(&notification.match_id) else {
            return;
        };

        senders.retain(|tx| tx.send(notification.clone()).is_ok());
        if senders.is_empty() {
            subscribers.remove(&notification.match_id);
        }
    }
}

/// Receiving end of one match's change feed. Dropping it unsubscribes.
pub struct Subscription {
    match_id: String,
    receiver: Receiver<MatchNotification>,
}

impl Subscription {
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn try_next(&self) -> Option<MatchNotification> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout`; `None` on timeout or once the notifier is gone.
    pub fn next_timeout(&self, timeout: Duration) -> Option<MatchNotification> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Everything already delivered, without blocking.
    pub fn drain(&self) -> Vec<MatchNotification> {
        self.receiver.try_iter().collect()
    }
}
