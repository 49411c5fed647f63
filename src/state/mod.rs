pub mod factory;
pub mod sled_store;
pub mod store;

pub use factory::{create_in_memory_repositories, create_repositories, Repositories};
pub use sled_store::SledNamedRepo;
pub use store::InMemoryNamedRepo;

use crate::error::Result;
use crate::models::DefaultEntity;
use async_trait::async_trait;

/// Storage for records whose natural key is their name
#[async_trait]
pub trait NamedRepo<E: DefaultEntity>: Send + Sync {
    /// Find a record by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<E>>;

    /// Insert or replace the record with this id.
    ///
    /// Fails with `Conflict` when another record already holds the name.
    async fn save(&self, entity: E) -> Result<E>;

    /// All records ordered by name
    async fn find_all(&self) -> Result<Vec<E>>;

    async fn count(&self) -> Result<u64>;
}
