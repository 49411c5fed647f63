use crate::error::{AppError, Result};
use crate::models::DefaultEntity;
use crate::state::NamedRepo;
use async_trait::async_trait;
use sled::Db;
use std::marker::PhantomData;
use std::path::Path;
use uuid::Uuid;

/// Persistent repository using the Sled embedded database
///
/// Records live in a `<kind>s` tree keyed by id; `<kind>_names` maps each
/// name to its record id.
#[derive(Clone)]
pub struct SledNamedRepo<E: DefaultEntity> {
    records_tree: sled::Tree,
    name_tree: sled::Tree,
    _entity: PhantomData<fn() -> E>,
}

impl<E: DefaultEntity> SledNamedRepo<E> {
    /// Open a database of its own at the specified path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref()).map_err(|e| {
            AppError::Database(format!("Failed to open Sled database: {}", e))
        })?;

        tracing::info!(path = ?path.as_ref(), "Initialized Sled store");
        Self::open(&db)
    }

    /// Open this entity type's trees inside a shared database
    pub fn open(db: &Db) -> Result<Self> {
        let records_tree = db.open_tree(format!("{}s", E::KIND)).map_err(|e| {
            AppError::Database(format!("Failed to open {} tree: {}", E::KIND, e))
        })?;

        let name_tree = db.open_tree(format!("{}_names", E::KIND)).map_err(|e| {
            AppError::Database(format!("Failed to open {} name index: {}", E::KIND, e))
        })?;

        Ok(Self {
            records_tree,
            name_tree,
            _entity: PhantomData,
        })
    }

    fn serialize_entity(entity: &E) -> Result<Vec<u8>> {
        bincode::serialize(entity).map_err(|e| {
            AppError::Serialization(format!("Failed to serialize {}: {}", E::KIND, e))
        })
    }

    fn deserialize_entity(bytes: &[u8]) -> Result<E> {
        bincode::deserialize(bytes).map_err(|e| {
            AppError::Serialization(format!("Failed to deserialize {}: {}", E::KIND, e))
        })
    }

    fn id_from_bytes(bytes: &[u8]) -> Result<Uuid> {
        Uuid::from_slice(bytes)
            .map_err(|e| AppError::Database(format!("Corrupt {} name index: {}", E::KIND, e)))
    }

    fn get_by_id(&self, id: &Uuid) -> Result<Option<E>> {
        self.records_tree
            .get(id.as_bytes())?
            .map(|bytes| Self::deserialize_entity(&bytes))
            .transpose()
    }
}

#[async_trait]
impl<E: DefaultEntity> NamedRepo<E> for SledNamedRepo<E> {
    async fn find_by_name(&self, name: &str) -> Result<Option<E>> {
        match self.name_tree.get(name.as_bytes())? {
            Some(id) => self.get_by_id(&Self::id_from_bytes(&id)?),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: E) -> Result<E> {
        let id = entity.id();
        let name = entity.name().as_bytes();

        // Claim the name only if it is free or already ours
        let claimed = self
            .name_tree
            .compare_and_swap(name, None as Option<&[u8]>, Some(id.as_bytes().as_slice()))?;
        if let Err(current) = claimed {
            let owner = current.current.map(|bytes| Self::id_from_bytes(&bytes)).transpose()?;
            if owner != Some(id) {
                return Err(AppError::Conflict(format!(
                    "{} named '{}' already exists",
                    E::KIND,
                    entity.name()
                )));
            }
        }

        let previous = self
            .records_tree
            .insert(id.as_bytes(), Self::serialize_entity(&entity)?)?
            .map(|bytes| Self::deserialize_entity(&bytes))
            .transpose()?;

        if let Some(previous) = previous {
            if previous.name() != entity.name() {
                self.name_tree.remove(previous.name().as_bytes())?;
            }
        }

        tracing::debug!(kind = E::KIND, id = %id, name = entity.name(), "Record saved");
        Ok(entity)
    }

    async fn find_all(&self) -> Result<Vec<E>> {
        // The name tree iterates in byte order of names
        let mut records = Vec::new();
        for item in self.name_tree.iter() {
            let (_, id) = item?;
            if let Some(entity) = self.get_by_id(&Self::id_from_bytes(&id)?)? {
                records.push(entity);
            }
        }
        Ok(records)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records_tree.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DirectoryView, Theme};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_sled_repo_upsert() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SledNamedRepo::<Theme>::new(temp_dir.path()).unwrap();

        let mut theme = Theme::new("TAMU", "Texas A&M");
        repo.save(theme.clone()).await.unwrap();

        theme.active = true;
        repo.save(theme.clone()).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find_by_name("TAMU").await.unwrap(), Some(theme));
    }

    #[tokio::test]
    async fn test_sled_repo_rejects_duplicate_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SledNamedRepo::<Theme>::new(temp_dir.path()).unwrap();

        repo.save(Theme::new("TAMU", "Texas A&M")).await.unwrap();
        let result = repo.save(Theme::new("TAMU", "Other")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_sled_repo_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = SledNamedRepo::<Theme>::new(temp_dir.path()).unwrap();
            repo.save(Theme::new("UNT", "North Texas")).await.unwrap();
            repo.save(Theme::new("Baylor", "Baylor")).await.unwrap();
        }

        let repo = SledNamedRepo::<Theme>::new(temp_dir.path()).unwrap();
        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Baylor", "UNT"]);
    }

    #[tokio::test]
    async fn test_entity_types_use_separate_trees() {
        let temp_dir = TempDir::new().unwrap();
        let db = sled::open(temp_dir.path()).unwrap();

        let themes = SledNamedRepo::<Theme>::open(&db).unwrap();
        let views = SledNamedRepo::<DirectoryView>::open(&db).unwrap();

        themes.save(Theme::new("People", "Texas A&M")).await.unwrap();

        assert_eq!(themes.count().await.unwrap(), 1);
        assert_eq!(views.count().await.unwrap(), 0);
        assert!(views.find_by_name("People").await.unwrap().is_none());
    }
}
