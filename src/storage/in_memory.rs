//! In-memory implementation of Repository for testing and development

use crate::core::error::StorageError;
use crate::core::{Data, Repository};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

/// In-memory repository implementation
///
/// Rows are kept in id order. Uses RwLock for thread-safe access; ids are
/// assigned from a counter that starts above the highest seeded id.
pub struct InMemoryRepository<T> {
    inner: Arc<RwLock<Table<T>>>,
}

struct Table<T> {
    rows: IndexMap<i64, T>,
    next_id: i64,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Data> InMemoryRepository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Table {
                rows: IndexMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a repository pre-filled with rows
    ///
    /// Rows with an explicit id keep it, rows with id 0 get the next free
    /// one. Seeds go through the same constraint checks as `persist`.
    pub fn with_rows(rows: Vec<T>) -> Result<Self, StorageError> {
        let repository = Self::new();
        {
            let mut table = repository.write()?;
            // explicit ids first so generated ones never collide with them
            let (explicit, generated): (Vec<T>, Vec<T>) =
                rows.into_iter().partition(|row| !row.is_new());
            for row in explicit.into_iter().chain(generated) {
                table.store(row)?;
            }
        }
        Ok(repository)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Table<T>>, StorageError> {
        self.inner.read().map_err(|e| StorageError::Backend {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Table<T>>, StorageError> {
        self.inner.write().map_err(|e| StorageError::Backend {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

impl<T: Data> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Data> Table<T> {
    fn store(&mut self, mut entity: T) -> Result<T, StorageError> {
        if T::unique_name() {
            let taken = self
                .rows
                .values()
                .any(|row| row.id() != entity.id() && row.name() == entity.name());
            if taken {
                return Err(StorageError::ConstraintViolation {
                    entity_type: T::entity_type().to_string(),
                    field: "name".to_string(),
                    value: entity.name().to_string(),
                });
            }
        }

        if entity.is_new() {
            entity.set_id(self.next_id);
        }
        let following = entity.id().checked_add(1).ok_or_else(|| StorageError::Backend {
            backend: BACKEND.to_string(),
            message: format!("No ids left after {} {}", T::entity_type(), entity.id()),
        })?;
        self.next_id = self.next_id.max(following);

        self.rows.insert(entity.id(), entity.clone());
        self.rows.sort_unstable_keys();

        Ok(entity)
    }
}

#[async_trait]
impl<T: Data> Repository<T> for InMemoryRepository<T> {
    async fn find(&self, id: i64) -> Result<Option<T>, StorageError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<T>, StorageError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|row| row.name() == name)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn persist(&self, entity: T) -> Result<T, StorageError> {
        let mut table = self.write()?;

        if !entity.is_new() && !table.rows.contains_key(&entity.id()) {
            return Err(StorageError::MissingRow {
                entity_type: T::entity_type().to_string(),
                id: entity.id(),
            });
        }

        table.store(entity)
    }

    async fn remove(&self, id: i64) -> Result<(), StorageError> {
        let mut table = self.write()?;

        table
            .rows
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::MissingRow {
                entity_type: T::entity_type().to_string(),
                id,
            })
    }
}
