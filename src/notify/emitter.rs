use std::sync::Mutex;

use event_emitter_rs::EventEmitter;

use super::{MatchNotification, MatchNotifier, NotifyError};

/// Callback-style change feed on top of `event_emitter_rs`.
///
/// Listeners get the notification as a JSON string. The emitter runs each
/// callback on its own thread, so delivery is asynchronous.
///
/// ```ignore
/// let notifier = EmitterNotifier::new();
/// notifier.on_match("m1", |json| println!("m1 changed: {}", json))?;
/// ```
pub struct EmitterNotifier {
    emitter: Mutex<EventEmitter>,
}

impl Default for EmitterNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitterNotifier {
    pub fn new() -> Self {
        Self {
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    pub fn topic(match_id: &str) -> String {
        format!("match:{}", match_id)
    }

    /// Register `listener` for one match. Returns the listener id for `remove_listener`.
    pub fn on_match<F>(&self, match_id: &str, listener: F) -> Result<String, NotifyError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| NotifyError::LockPoisoned("emitter"))?;
        Ok(emitter.on(&Self::topic(match_id), listener))
    }

    /// Returns false when no listener had that id.
    pub fn remove_listener(&self, listener_id: &str) -> Result<bool, NotifyError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| NotifyError::LockPoisoned("emitter"))?;
        Ok(emitter.remove_listener(listener_id).is_some())
    }
}

impl MatchNotifier for EmitterNotifier {
    fn publish(&self, notification: &MatchNotification) {
        let json = match serde_json::to_string(notification) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(
                    match_id = %notification.match_id,
                    %err,
                    "notification not encodable"
                );
                return;
            }
        };
        let Ok(mut emitter) = self.emitter.lock() else {
            tracing::warn!(
                match_id = %notification.match_id,
                "emitter poisoned, notification dropped"
            );
            return;
        };
        emitter.emit(&Self::topic(&notification.match_id), json);
    }
}
