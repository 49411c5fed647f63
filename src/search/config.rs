//! Search configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Path to the search index directory
    pub index_path: PathBuf,

    /// Index writer heap size in bytes (default: 50MB)
    pub writer_heap_size: usize,

    /// Number of indexing threads
    pub indexing_threads: usize,

    /// Commit after every write
    pub realtime_indexing: bool,

    /// Upper bound on `offset + size` for result pages
    pub max_results: usize,

    /// Facet page size when a request does not name one
    pub default_facet_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("./data/search_index"),
            writer_heap_size: 50_000_000,
            indexing_threads: 1,
            realtime_indexing: true,
            max_results: 10_000,
            default_facet_limit: 10,
        }
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn index_path(mut self, path: PathBuf) -> Self {
        self.config.index_path = path;
        self
    }

    pub fn writer_heap_size(mut self, size: usize) -> Self {
        self.config.writer_heap_size = size;
        self
    }

    pub fn indexing_threads(mut self, threads: usize) -> Self {
        self.config.indexing_threads = threads;
        self
    }

    pub fn realtime_indexing(mut self, enabled: bool) -> Self {
        self.config.realtime_indexing = enabled;
        self
    }

    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = max;
        self
    }

    pub fn default_facet_limit(mut self, limit: u32) -> Self {
        self.config.default_facet_limit = limit;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = SearchConfigBuilder::new()
            .index_path(PathBuf::from("/tmp/scholars-index"))
            .max_results(500)
            .default_facet_limit(25)
            .build();

        assert_eq!(config.index_path, PathBuf::from("/tmp/scholars-index"));
        assert_eq!(config.max_results, 500);
        assert_eq!(config.default_facet_limit, 25);
        assert!(config.realtime_indexing);
        assert_eq!(config.writer_heap_size, 50_000_000);
    }
}
