use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{Commit, Find, Get, RepositoryError};
use crate::entity::{Committable, Entity, EventRecord};

/// In-memory record store keyed by entity id.
///
/// Clones share the same storage. Writes are checked against the version the
/// writer loaded, so a stale scorer session cannot overwrite newer balls.
#[derive(Clone, Default)]
pub struct HashMapRepository {
    storage: Arc<RwLock<HashMap<String, Vec<EventRecord>>>>,
    order: Arc<RwLock<Vec<String>>>,
}

impl HashMapRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("len"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

fn load(id: &str, events: &[EventRecord]) -> Entity {
    let mut entity = Entity::with_id(id);
    entity.load_from_history(events.to_vec());
    entity
}

impl Get for HashMapRepository {
    fn get(&self, id: &str) -> Result<Option<Entity>, RepositoryError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;

        Ok(storage.get(id).map(|events| load(id, events)))
    }
}

impl Find for HashMapRepository {
    /// Results come back in first-commit order.
    fn find<F>(&self, predicate: F) -> Result<Vec<Entity>, RepositoryError>
    where
        F: Fn(&Entity) -> bool,
    {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("find"))?;
        let order = self
            .order
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("find"))?;

        Ok(order
            .iter()
            .filter_map(|id| storage.get(id).map(|events| load(id, events)))
            .filter(|entity| predicate(entity))
            .collect())
    }
}

impl Commit for HashMapRepository {
    fn commit<C: Committable + ?Sized>(&self, committable: &mut C) -> Result<(), RepositoryError> {
        let mut entities = committable.entities_mut();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;
        let mut order = self
            .order
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;

        // Check every entity before touching any of them.
        for entity in entities.iter() {
            let actual = storage
                .get(entity.id())
                .map(|events| events.len() as u64)
                .unwrap_or(0);
            if actual != entity.committed_version() {
                return Err(RepositoryError::ConcurrentWrite {
                    id: entity.id().to_string(),
                    expected: entity.committed_version(),
                    actual,
                });
            }
        }

        for entity in entities.iter_mut() {
            if !storage.contains_key(entity.id()) {
                order.push(entity.id().to_string());
            }
            debug!(
                id = entity.id(),
                new_events = entity.new_events().len(),
                version = entity.version(),
                "committing entity"
            );
            storage.insert(entity.id().to_string(), entity.events().to_vec());
            entity.mark_committed();
        }

        Ok(())
    }
}
