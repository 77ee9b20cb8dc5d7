use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::EventRecord;

/// The persisted half of an aggregate: an id plus its append-only event stream.
#[derive(Clone, Serialize, Deserialize)]
pub struct Entity {
    id: String,
    version: u64,
    events: Vec<EventRecord>,
    #[serde(skip, default)]
    replaying: bool,
    #[serde(skip, default)]
    committed_version: u64,
    updated_at: SystemTime,
}

impl Default for Entity {
    fn default() -> Self {
        Entity {
            id: String::new(),
            version: 0,
            events: Vec::new(),
            replaying: false,
            committed_version: 0,
            updated_at: SystemTime::now(),
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("events", &self.events.len())
            .field("replaying", &self.replaying)
            .field("committed_version", &self.committed_version)
            .finish()
    }
}

impl Entity {
    pub fn new() -> Self {
        Entity::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let mut entity = Entity::default();
        entity.id = id.into();
        entity
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Version the store held when this entity was loaded or last committed.
    pub fn committed_version(&self) -> u64 {
        self.committed_version
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Events recorded since the entity was loaded (not yet persisted).
    pub fn new_events(&self) -> &[EventRecord] {
        &self.events[self.committed_version as usize..]
    }

    pub fn has_uncommitted(&self) -> bool {
        self.version > self.committed_version
    }

    pub fn updated_at(&self) -> SystemTime {
        self.updated_at
    }

    /// Called by the repository after a successful commit.
    pub fn mark_committed(&mut self) {
        self.committed_version = self.version;
    }

    /// Append an already-encoded payload. Does nothing while replaying.
    pub fn record(&mut self, name: impl Into<String>, payload: Vec<u8>) {
        if self.replaying {
            return;
        }

        let sequence = self.events.len() as u64 + 1;
        self.events.push(EventRecord::new(name, payload, sequence));
        self.version = self.events.len() as u64;
        self.updated_at = SystemTime::now();
    }

    pub fn load_from_history(&mut self, history: Vec<EventRecord>) {
        self.events = history;
        self.version = self.events.len() as u64;
        self.committed_version = self.version;
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn set_replaying(&mut self, replaying: bool) {
        self.replaying = replaying;
    }
}
