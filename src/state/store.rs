use crate::error::{AppError, Result};
use crate::models::DefaultEntity;
use crate::state::NamedRepo;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory repository (for development and testing)
#[derive(Clone)]
pub struct InMemoryNamedRepo<E: DefaultEntity> {
    records: Arc<DashMap<Uuid, E>>,
    name_index: Arc<DashMap<String, Uuid>>,
}

impl<E: DefaultEntity> InMemoryNamedRepo<E> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            name_index: Arc::new(DashMap::new()),
        }
    }
}

impl<E: DefaultEntity> Default for InMemoryNamedRepo<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: DefaultEntity> NamedRepo<E> for InMemoryNamedRepo<E> {
    async fn find_by_name(&self, name: &str) -> Result<Option<E>> {
        let Some(id) = self.name_index.get(name).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, entity: E) -> Result<E> {
        let id = entity.id();

        // Claim the name first; the shard lock serialises competing saves
        match self.name_index.entry(entity.name().to_string()) {
            Entry::Occupied(existing) if *existing.get() != id => {
                return Err(AppError::Conflict(format!(
                    "{} named '{}' already exists",
                    E::KIND,
                    entity.name()
                )));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(vacant) => {
                vacant.insert(id);
            }
        }

        if let Some(previous) = self.records.insert(id, entity.clone()) {
            if previous.name() != entity.name() {
                self.name_index
                    .remove_if(previous.name(), |_, owner| *owner == id);
            }
        }

        tracing::debug!(kind = E::KIND, id = %id, name = entity.name(), "Record saved");
        Ok(entity)
    }

    async fn find_all(&self) -> Result<Vec<E>> {
        let mut records: Vec<E> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(records)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }
}
