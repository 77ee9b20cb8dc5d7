use std::fmt;
use std::marker::PhantomData;

use crate::entity::{Entity, EventRecord};
use crate::repository::{Commit, Find, Get, RepositoryError};

/// Domain type rebuilt by replaying its entity's event stream.
pub trait Aggregate: Sized + Default {
    type ReplayError: fmt::Display;

    fn new_empty() -> Self {
        Self::default()
    }
    fn entity(&self) -> &Entity;
    fn entity_mut(&mut self) -> &mut Entity;
    fn replay_event(&mut self, event: &EventRecord) -> Result<(), Self::ReplayError>;
}

#[macro_export]
macro_rules! impl_aggregate {
    ($ty:ty, $entity:ident, $replay:ident) => {
        $crate::impl_aggregate!($ty, $entity, $replay, String);
    };
    ($ty:ty, $entity:ident, $replay:ident, $err:ty) => {
        impl $crate::Aggregate for $ty {
            type ReplayError = $err;

            fn entity(&self) -> &$crate::Entity {
                &self.$entity
            }

            fn entity_mut(&mut self) -> &mut $crate::Entity {
                &mut self.$entity
            }

            fn replay_event(
                &mut self,
                event: &$crate::EventRecord,
            ) -> Result<(), Self::ReplayError> {
                Self::$replay(self, event)
            }
        }
    };
}

/// Hydrate an aggregate from an entity by replaying its events.
pub fn hydrate<A: Aggregate>(entity: Entity) -> Result<A, RepositoryError> {
    let mut agg = A::new_empty();
    *agg.entity_mut() = entity;

    let events = agg.entity().events().to_vec();

    agg.entity_mut().set_replaying(true);
    let replayed = events.iter().try_for_each(|event| {
        agg.replay_event(event).map_err(|err| {
            RepositoryError::Replay(format!(
                "{} #{}: {}",
                event.event_name, event.sequence, err
            ))
        })
    });
    agg.entity_mut().set_replaying(false);
    replayed?;

    Ok(agg)
}

/// Builder trait for creating typed aggregate repositories.
pub trait AggregateBuilder: Sized {
    fn aggregate<A: Aggregate>(self) -> AggregateRepository<Self, A> {
        AggregateRepository::new(self)
    }
}

impl<T> AggregateBuilder for T {}

/// A repository wrapper that provides typed access to a specific aggregate type.
pub struct AggregateRepository<R, A> {
    repo: R,
    _marker: PhantomData<A>,
}

impl<R: Clone, A> Clone for AggregateRepository<R, A> {
    fn clone(&self) -> Self {
        AggregateRepository::new(self.repo.clone())
    }
}

impl<R, A> AggregateRepository<R, A> {
    pub fn new(repo: R) -> Self {
        AggregateRepository {
            repo,
            _marker: PhantomData,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
}

impl<R, A> AggregateRepository<R, A>
where
    R: Get,
    A: Aggregate,
{
    pub fn get(&self, id: &str) -> Result<Option<A>, RepositoryError> {
        let entity = self.repo.get(id)?;
        let Some(entity) = entity else {
            return Ok(None);
        };
        Ok(Some(hydrate::<A>(entity)?))
    }

    pub fn get_all(&self, ids: &[&str]) -> Result<Vec<A>, RepositoryError> {
        let entities = self.repo.get_all(ids)?;
        let mut aggregates = Vec::with_capacity(entities.len());
        for entity in entities {
            aggregates.push(hydrate::<A>(entity)?);
        }
        Ok(aggregates)
    }
}

impl<R, A> AggregateRepository<R, A>
where
    R: Commit,
    A: Aggregate,
{
    pub fn commit(&self, aggregate: &mut A) -> Result<(), RepositoryError> {
        self.repo.commit(aggregate.entity_mut())
    }
}

impl<R, A> AggregateRepository<R, A>
where
    R: Find,
    A: Aggregate,
{
    /// Find all aggregates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> Result<Vec<A>, RepositoryError>
    where
        F: Fn(&A) -> bool,
    {
        let entities = self.repo.find(|_| true)?;
        let mut results = Vec::new();
        for entity in entities {
            let agg = hydrate::<A>(entity)?;
            if predicate(&agg) {
                results.push(agg);
            }
        }
        Ok(results)
    }
}
