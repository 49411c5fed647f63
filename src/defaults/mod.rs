//! Default-data seeding
//!
//! Bundled YAML resources list reference records (themes, directory views,
//! discovery views). At startup each record is inserted when no record of the
//! same name exists. Existing records are overwritten only when
//! `defaults.update_defaults` is set.

mod loader;

pub use loader::DefaultsLoader;

use crate::config::DefaultsConfig;
use crate::error::Result;
use crate::models::{DefaultEntity, DirectoryView, DiscoveryView, Theme};
use crate::state::Repositories;
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

/// What seeding did with one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOutcome {
    Created,
    Updated,
    /// An existing record was left alone
    Unchanged,
}

/// Outcome counts for one resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl SeedSummary {
    pub fn record(&mut self, outcome: SeedOutcome) {
        match outcome {
            SeedOutcome::Created => self.created += 1,
            SeedOutcome::Updated => self.updated += 1,
            SeedOutcome::Unchanged => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged
    }
}

/// Per-type summaries of one startup seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub themes: SeedSummary,
    pub directory_views: SeedSummary,
    pub discovery_views: SeedSummary,
}

/// Seeds one entity type from a bundled resource
#[async_trait]
pub trait Defaults<E: DefaultEntity>: Send + Sync {
    /// Location of the resource listing the defaults
    fn path(&self) -> &Path;

    /// Read the resource and process every record in order.
    ///
    /// A missing resource, or one that is not a file, seeds nothing.
    async fn load(&self) -> Result<SeedSummary>;

    /// Insert `entity`, or hand it to [`Defaults::update`] when its name is taken
    async fn process(&self, entity: E) -> Result<SeedOutcome>;

    /// Overwrite `existing` with `entity` when updates are enabled
    async fn update(&self, entity: E, existing: E) -> Result<SeedOutcome>;
}

/// Seed every default entity type.
///
/// The types are independent and run concurrently; one failing does not stop
/// the others. The first failure is returned once all have finished.
pub async fn seed_all(config: &DefaultsConfig, repos: &Repositories) -> Result<SeedReport> {
    let root = &config.resource_root;

    let themes = DefaultsLoader::new(
        root.join(&config.themes),
        repos.themes.clone(),
        config.update_defaults,
    );
    let directory_views = DefaultsLoader::new(
        root.join(&config.directory_views),
        repos.directory_views.clone(),
        config.update_defaults,
    );
    let discovery_views = DefaultsLoader::new(
        root.join(&config.discovery_views),
        repos.discovery_views.clone(),
        config.update_defaults,
    );

    let (themes, directory_views, discovery_views) = futures::join!(
        load_logged::<Theme>(&themes),
        load_logged::<DirectoryView>(&directory_views),
        load_logged::<DiscoveryView>(&discovery_views),
    );

    Ok(SeedReport {
        themes: themes?,
        directory_views: directory_views?,
        discovery_views: discovery_views?,
    })
}

async fn load_logged<E: DefaultEntity>(defaults: &dyn Defaults<E>) -> Result<SeedSummary> {
    match defaults.load().await {
        Ok(summary) => {
            tracing::info!(
                kind = E::KIND,
                created = summary.created,
                updated = summary.updated,
                unchanged = summary.unchanged,
                "Defaults loaded"
            );
            Ok(summary)
        }
        Err(e) => {
            tracing::error!(kind = E::KIND, path = ?defaults.path(), error = %e, "Failed to load defaults");
            Err(e)
        }
    }
}
