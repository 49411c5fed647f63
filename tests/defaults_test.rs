//! Default-data seeding against bundled and temporary resources

use scholars_middleware::config::DefaultsConfig;
use scholars_middleware::defaults::{seed_all, Defaults, DefaultsLoader, SeedSummary};
use scholars_middleware::error::AppError;
use scholars_middleware::models::{DiscoveryView, Theme};
use scholars_middleware::state::{create_in_memory_repositories, InMemoryNamedRepo, NamedRepo};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const THEMES_V1: &str = r#"
- name: TAMU
  organization: Texas A&M
  active: false
- name: UNT
  organization: North Texas
"#;

const THEMES_V2: &str = r#"
- name: TAMU
  organization: Texas A&M University
  active: true
- name: UNT
  organization: North Texas
- name: Baylor
  organization: Baylor University
"#;

fn write_themes(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("themes.yml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn themes_loader(path: &Path, repo: &Arc<InMemoryNamedRepo<Theme>>, update: bool) -> DefaultsLoader<Theme> {
    DefaultsLoader::new(path, repo.clone(), update)
}

async fn snapshot(repo: &InMemoryNamedRepo<Theme>) -> Vec<Theme> {
    repo.find_all().await.unwrap()
}

#[tokio::test]
async fn test_reseeding_without_overwrite_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_themes(&dir, THEMES_V1);
    let repo = Arc::new(InMemoryNamedRepo::<Theme>::new());

    let first = themes_loader(&path, &repo, false).load().await.unwrap();
    let after_first = snapshot(&repo).await;

    let second = themes_loader(&path, &repo, false).load().await.unwrap();
    let after_second = snapshot(&repo).await;

    assert_eq!(first, SeedSummary { created: 2, updated: 0, unchanged: 0 });
    assert_eq!(second, SeedSummary { created: 0, updated: 0, unchanged: 2 });
    assert_eq!(after_first, after_second);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_overwrite_flag_controls_updates() {
    let dir = TempDir::new().unwrap();
    let repo = Arc::new(InMemoryNamedRepo::<Theme>::new());

    let path = write_themes(&dir, THEMES_V1);
    themes_loader(&path, &repo, false).load().await.unwrap();
    let original = repo.find_by_name("TAMU").await.unwrap().unwrap();

    // Flag off: existing value stays
    let path = write_themes(&dir, THEMES_V2);
    themes_loader(&path, &repo, false).load().await.unwrap();
    let kept = repo.find_by_name("TAMU").await.unwrap().unwrap();
    assert_eq!(kept.organization, "Texas A&M");
    assert!(!kept.active);

    // Flag on: incoming values win, identity is kept
    let summary = themes_loader(&path, &repo, true).load().await.unwrap();
    let updated = repo.find_by_name("TAMU").await.unwrap().unwrap();
    assert_eq!(updated.organization, "Texas A&M University");
    assert!(updated.active);
    assert_eq!(updated.id, original.id);
    assert_eq!(summary.updated, 3);
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_overwrite_converges() {
    let dir = TempDir::new().unwrap();
    let path = write_themes(&dir, THEMES_V2);
    let repo = Arc::new(InMemoryNamedRepo::<Theme>::new());

    themes_loader(&path, &repo, true).load().await.unwrap();
    let first = snapshot(&repo).await;

    themes_loader(&path, &repo, true).load().await.unwrap();
    assert_eq!(snapshot(&repo).await, first);
}

#[tokio::test]
async fn test_new_entities_inserted_regardless_of_flag() {
    for update in [false, true] {
        let dir = TempDir::new().unwrap();
        let repo = Arc::new(InMemoryNamedRepo::<Theme>::new());

        let path = write_themes(&dir, THEMES_V1);
        themes_loader(&path, &repo, update).load().await.unwrap();

        let path = write_themes(&dir, THEMES_V2);
        let summary = themes_loader(&path, &repo, update).load().await.unwrap();

        assert_eq!(summary.created, 1);
        assert!(repo.find_by_name("Baylor").await.unwrap().is_some());
    }
}

#[tokio::test]
async fn test_decode_failure_propagates() {
    let dir = TempDir::new().unwrap();
    let path = write_themes(&dir, "- name: TAMU\n  colors: not-a-list\n");
    let repo = Arc::new(InMemoryNamedRepo::<Theme>::new());

    let result = themes_loader(&path, &repo, false).load().await;

    assert!(matches!(result, Err(AppError::Serialization(_))));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_all_bundled_resources() {
    let config = DefaultsConfig {
        resource_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("defaults"),
        ..Default::default()
    };
    let repos = create_in_memory_repositories();

    let report = seed_all(&config, &repos).await.unwrap();

    assert!(report.themes.created >= 1);
    assert!(report.directory_views.created >= 1);
    assert!(report.discovery_views.created >= 1);

    let view: DiscoveryView = repos.discovery_views.find_by_name("Scholars").await.unwrap().unwrap();
    assert_eq!(view.collection, "persons");
    assert!(!view.facets.is_empty());

    // Second pass with the flag off changes nothing
    let again = seed_all(&config, &repos).await.unwrap();
    assert_eq!(again.themes.created, 0);
    assert_eq!(again.themes.unchanged, report.themes.created);
}

#[tokio::test]
async fn test_seed_all_missing_root_is_noop() {
    let dir = TempDir::new().unwrap();
    let config = DefaultsConfig {
        resource_root: dir.path().join("absent"),
        ..Default::default()
    };
    let repos = create_in_memory_repositories();

    let report = seed_all(&config, &repos).await.unwrap();

    assert_eq!(report.themes.total(), 0);
    assert_eq!(repos.themes.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_all_failure_does_not_stop_other_types() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("themes.yml"), "{ not: [valid").unwrap();
    std::fs::write(
        dir.path().join("discoveryViews.yml"),
        "- name: Scholars\n  collection: persons\n",
    )
    .unwrap();

    let config = DefaultsConfig {
        resource_root: dir.path().to_path_buf(),
        ..Default::default()
    };
    let repos = create_in_memory_repositories();

    let result = seed_all(&config, &repos).await;

    assert!(result.is_err());
    assert_eq!(repos.discovery_views.count().await.unwrap(), 1);
}
