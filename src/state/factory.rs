use crate::config::{StateBackend, StateConfig};
use crate::error::{AppError, Result};
use crate::models::{DirectoryView, DiscoveryView, Theme};
use crate::state::{InMemoryNamedRepo, NamedRepo, SledNamedRepo};
use std::sync::Arc;

/// One repository per seeded entity type
#[derive(Clone)]
pub struct Repositories {
    pub themes: Arc<dyn NamedRepo<Theme>>,
    pub directory_views: Arc<dyn NamedRepo<DirectoryView>>,
    pub discovery_views: Arc<dyn NamedRepo<DiscoveryView>>,
}

/// Create repositories based on configuration
pub async fn create_repositories(config: &StateConfig) -> Result<Repositories> {
    match config.backend {
        StateBackend::Sled => {
            let path = config.path.as_ref().ok_or_else(|| {
                AppError::Configuration("Sled backend requires 'path' configuration".to_string())
            })?;

            tracing::info!(path = ?path, "Initializing Sled storage backend");

            let db = sled::open(path).map_err(|e| {
                AppError::Database(format!("Failed to open Sled database: {}", e))
            })?;

            Ok(Repositories {
                themes: Arc::new(SledNamedRepo::<Theme>::open(&db)?),
                directory_views: Arc::new(SledNamedRepo::<DirectoryView>::open(&db)?),
                discovery_views: Arc::new(SledNamedRepo::<DiscoveryView>::open(&db)?),
            })
        }

        StateBackend::Memory => Ok(create_in_memory_repositories()),
    }
}

/// Create in-memory repositories (for testing and development)
pub fn create_in_memory_repositories() -> Repositories {
    tracing::info!("Initializing in-memory storage backend");
    Repositories {
        themes: Arc::new(InMemoryNamedRepo::<Theme>::new()),
        directory_views: Arc::new(InMemoryNamedRepo::<DirectoryView>::new()),
        discovery_views: Arc::new(InMemoryNamedRepo::<DiscoveryView>::new()),
    }
}
