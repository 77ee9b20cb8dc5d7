mod error;
mod hashmap;
mod repository;

pub use error::RepositoryError;
pub use hashmap::HashMapRepository;
pub use repository::{Commit, Find, Get, Repository};
