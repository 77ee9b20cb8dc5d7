use super::error::RepositoryError;
use crate::entity::{Committable, Entity};

/// Load entities by id.
pub trait Get {
    fn get(&self, id: &str) -> Result<Option<Entity>, RepositoryError>;

    /// Missing ids are skipped; order follows `ids`.
    fn get_all(&self, ids: &[&str]) -> Result<Vec<Entity>, RepositoryError> {
        let mut entities = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(entity) = self.get(id)? {
                entities.push(entity);
            }
        }
        Ok(entities)
    }
}

/// Find all entities matching a predicate.
pub trait Find {
    fn find<F>(&self, predicate: F) -> Result<Vec<Entity>, RepositoryError>
    where
        F: Fn(&Entity) -> bool;
}

/// Commit one or more entities.
pub trait Commit {
    fn commit<C: Committable + ?Sized>(&self, committable: &mut C) -> Result<(), RepositoryError>;
}

/// Full repository trait combining all capabilities.
pub trait Repository: Get + Find + Commit {}

impl<T> Repository for T where T: Get + Find + Commit {}
