//! Search index management

use crate::search::config::SearchConfig;
use crate::search::document::{build_person_schema, SearchDocument};
use crate::search::error::{SearchError, SearchResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tantivy::collector::Count;
use tantivy::schema::Schema;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};
use tokio::sync::RwLock;

/// Index statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Total number of documents in the index
    pub total_documents: u64,

    /// Index size in bytes
    pub index_size_bytes: u64,

    /// Number of segments
    pub num_segments: usize,

    /// Last commit made by this process
    pub last_commit: Option<DateTime<Utc>>,
}

/// Manages the Tantivy search index
pub struct IndexManager {
    index: Index,
    schema: Schema,

    /// Single writer; tantivy allows one per index
    writer: RwLock<IndexWriter>,

    reader: IndexReader,
    last_commit: RwLock<Option<DateTime<Utc>>>,
    config: SearchConfig,
}

impl IndexManager {
    /// Open the index at the configured path, creating it when absent
    pub async fn new(config: SearchConfig) -> SearchResult<Self> {
        std::fs::create_dir_all(&config.index_path).map_err(|e| {
            SearchError::IndexInitFailed(format!("Failed to create index directory: {}", e))
        })?;

        let index = if Self::index_exists(&config.index_path) {
            Index::open_in_dir(&config.index_path).map_err(|e| {
                SearchError::IndexInitFailed(format!("Failed to open existing index: {}", e))
            })?
        } else {
            Index::create_in_dir(&config.index_path, build_person_schema()).map_err(|e| {
                SearchError::IndexInitFailed(format!("Failed to create new index: {}", e))
            })?
        };
        let schema = index.schema();

        let writer = index
            .writer_with_num_threads(config.indexing_threads.max(1), config.writer_heap_size)
            .map_err(|e| SearchError::IndexInitFailed(format!("Failed to create writer: {}", e)))?;

        // Reloads happen explicitly after each commit
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::IndexInitFailed(format!("Failed to create reader: {}", e)))?;

        tracing::info!(path = ?config.index_path, "Search index opened");

        Ok(Self {
            index,
            schema,
            writer: RwLock::new(writer),
            reader,
            last_commit: RwLock::new(None),
            config,
        })
    }

    fn index_exists(path: &Path) -> bool {
        path.join("meta.json").exists()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }

    /// Replace any document with the same id, then add this one
    fn replace(&self, writer: &mut IndexWriter, document: &impl SearchDocument) -> SearchResult<()> {
        let tantivy_doc = document.to_tantivy_doc(&self.schema)?;

        let id_field = self
            .schema
            .get_field("id")
            .map_err(|e| SearchError::IndexingFailed(e.to_string()))?;
        writer.delete_term(tantivy::Term::from_field_text(id_field, &document.document_id()));

        writer
            .add_document(tantivy_doc)
            .map_err(|e| SearchError::IndexingFailed(format!("Failed to add document: {}", e)))?;
        Ok(())
    }

    async fn commit_locked(&self, writer: &mut IndexWriter) -> SearchResult<()> {
        writer
            .commit()
            .map_err(|e| SearchError::IndexingFailed(format!("Failed to commit: {}", e)))?;
        self.reader
            .reload()
            .map_err(|e| SearchError::IndexingFailed(format!("Failed to reload reader: {}", e)))?;
        *self.last_commit.write().await = Some(Utc::now());
        Ok(())
    }

    /// Index a single document
    pub async fn index_document(&self, document: &impl SearchDocument) -> SearchResult<()> {
        let mut writer = self.writer.write().await;
        self.replace(&mut writer, document)?;

        if self.config.realtime_indexing {
            self.commit_locked(&mut writer).await?;
        }
        Ok(())
    }

    /// Index a batch of documents and commit once
    pub async fn index_documents<D: SearchDocument>(&self, documents: &[D]) -> SearchResult<usize> {
        let mut writer = self.writer.write().await;

        for document in documents {
            self.replace(&mut writer, document)?;
        }

        self.commit_locked(&mut writer).await?;
        tracing::debug!(count = documents.len(), "Indexed document batch");
        Ok(documents.len())
    }

    /// Delete a document by ID
    pub async fn delete_document(&self, document_id: &str) -> SearchResult<()> {
        let id_field = self
            .schema
            .get_field("id")
            .map_err(|e| SearchError::DeletionFailed(e.to_string()))?;

        let mut writer = self.writer.write().await;
        writer.delete_term(tantivy::Term::from_field_text(id_field, document_id));

        if self.config.realtime_indexing {
            self.commit_locked(&mut writer).await?;
        }
        Ok(())
    }

    /// Commit pending changes
    pub async fn commit(&self) -> SearchResult<()> {
        let mut writer = self.writer.write().await;
        self.commit_locked(&mut writer).await
    }

    /// Clear the entire index
    pub async fn clear_index(&self) -> SearchResult<()> {
        let mut writer = self.writer.write().await;
        writer
            .delete_all_documents()
            .map_err(|e| SearchError::IndexingFailed(format!("Failed to clear index: {}", e)))?;
        self.commit_locked(&mut writer).await
    }

    /// Get index statistics
    pub async fn get_stats(&self) -> SearchResult<IndexStats> {
        let searcher = self.reader.searcher();

        let total_documents = searcher
            .search(&tantivy::query::AllQuery, &Count)
            .map_err(|e| SearchError::SearchFailed(format!("Failed to count documents: {}", e)))?
            as u64;

        let num_segments = searcher.segment_readers().len();

        let index_size_bytes = std::fs::read_dir(&self.config.index_path)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter_map(|e| e.metadata().ok())
                    .map(|m| m.len())
                    .sum()
            })
            .unwrap_or(0);

        Ok(IndexStats {
            total_documents,
            index_size_bytes,
            num_segments,
            last_commit: *self.last_commit.read().await,
        })
    }
}
