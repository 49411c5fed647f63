use crate::defaults::{Defaults, SeedOutcome, SeedSummary};
use crate::error::{AppError, Result};
use crate::models::DefaultEntity;
use crate::state::NamedRepo;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Seeds entities of type `E` from a YAML list
pub struct DefaultsLoader<E: DefaultEntity> {
    path: PathBuf,
    repo: Arc<dyn NamedRepo<E>>,
    update_defaults: bool,
}

impl<E: DefaultEntity> DefaultsLoader<E> {
    pub fn new(path: impl Into<PathBuf>, repo: Arc<dyn NamedRepo<E>>, update_defaults: bool) -> Self {
        Self {
            path: path.into(),
            repo,
            update_defaults,
        }
    }

    /// Decode a YAML list of entities; an empty document is an empty list
    fn read(&self, contents: &str) -> Result<Vec<E>> {
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entities: Vec<E> = serde_yaml::from_str(contents).map_err(|e| {
            AppError::Serialization(format!("Failed to decode {}: {}", self.path.display(), e))
        })?;

        for entity in &entities {
            entity.validate()?;
        }
        Ok(entities)
    }
}

#[async_trait]
impl<E: DefaultEntity> Defaults<E> for DefaultsLoader<E> {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<SeedSummary> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "Could not read defaults, resource does not exist");
                return Ok(SeedSummary::default());
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_file() {
            tracing::debug!(path = ?self.path, "Could not read defaults, resource is not a file");
            return Ok(SeedSummary::default());
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        let entities = self.read(&contents)?;

        // Sequential: later records must observe earlier inserts
        let mut summary = SeedSummary::default();
        for entity in entities {
            summary.record(self.process(entity).await?);
        }
        Ok(summary)
    }

    async fn process(&self, entity: E) -> Result<SeedOutcome> {
        match self.repo.find_by_name(entity.name()).await? {
            Some(existing) => self.update(entity, existing).await,
            None => {
                let saved = self.repo.save(entity).await?;
                tracing::info!(kind = E::KIND, "Created {} defaults.", saved.name());
                Ok(SeedOutcome::Created)
            }
        }
    }

    async fn update(&self, entity: E, mut existing: E) -> Result<SeedOutcome> {
        if !self.update_defaults {
            return Ok(SeedOutcome::Unchanged);
        }

        existing.overwrite_with(entity);
        let saved = self.repo.save(existing).await?;
        tracing::info!(kind = E::KIND, "Updated {} defaults.", saved.name());
        Ok(SeedOutcome::Updated)
    }
}
