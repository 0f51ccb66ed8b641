//! Repository trait for entity persistence

use crate::core::Data;
use crate::core::error::StorageError;
use async_trait::async_trait;

/// Persistence service for a single entity type
///
/// Implementations own the storage of one entity type. The admin actions
/// only talk to this trait, the concrete backend is injected at startup.
/// `persist` flushes immediately; a write that violates a constraint fails
/// with [`StorageError::ConstraintViolation`].
#[async_trait]
pub trait Repository<T: Data>: Send + Sync {
    /// Find an entity by id
    async fn find(&self, id: i64) -> Result<Option<T>, StorageError>;

    /// Find all entities with the given name
    async fn find_by_name(&self, name: &str) -> Result<Vec<T>, StorageError>;

    /// List all entities, ordered by id
    async fn list(&self) -> Result<Vec<T>, StorageError>;

    /// Insert (id 0) or update the entity and return the stored version
    async fn persist(&self, entity: T) -> Result<T, StorageError>;

    /// Remove the entity with the given id
    async fn remove(&self, id: i64) -> Result<(), StorageError>;
}
