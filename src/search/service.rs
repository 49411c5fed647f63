//! Main search service implementation

use crate::discovery::{FacetFieldEntry, FacetPage, FacetResultPage, Page, Pageable, SearchPage};
use crate::models::Person;
use crate::search::config::SearchConfig;
use crate::search::document::{facet_index_field, PersonDocument};
use crate::search::error::{SearchError, SearchResult};
use crate::search::index::{IndexManager, IndexStats};
use crate::search::query::{FacetRequest, FacetSort, QueryBuilder, SearchQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tantivy::collector::{Count, FacetCollector, TopDocs};
use tantivy::query::Query;
use tantivy::{Searcher, TantivyDocument};

/// A single search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonHit {
    #[serde(flatten)]
    pub person: Person,

    /// Relevance score
    pub score: f32,
}

/// Main search service
pub struct SearchService {
    index_manager: Arc<IndexManager>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a new search service
    pub async fn new(config: SearchConfig) -> SearchResult<Self> {
        if config.max_results == 0 {
            return Err(SearchError::InvalidConfiguration(
                "max_results must be at least 1".to_string(),
            ));
        }

        let index_manager = Arc::new(IndexManager::new(config.clone()).await?);

        Ok(Self {
            index_manager,
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Unfiltered listing; never carries facets
    pub async fn find_all(&self, pageable: Pageable) -> SearchResult<SearchPage<PersonHit>> {
        let query = SearchQuery {
            pageable,
            ..SearchQuery::all()
        };
        let page = self.execute(&query)?.0;
        Ok(SearchPage::Plain(page))
    }

    /// Search persons; faceted when the query requests facets
    pub async fn search(&self, query: &SearchQuery) -> SearchResult<SearchPage<PersonHit>> {
        for facet in &query.facets {
            facet.check()?;
        }

        let start_time = std::time::Instant::now();
        let (page, tantivy_query, searcher) = self.execute(query)?;

        let result = if query.facets.is_empty() {
            SearchPage::Plain(page)
        } else {
            let facet_result_pages = query
                .facets
                .iter()
                .map(|facet| self.facet_result_page(&searcher, &*tantivy_query, facet))
                .collect::<SearchResult<Vec<_>>>()?;
            SearchPage::Faceted(FacetPage::new(page, facet_result_pages))
        };

        tracing::debug!(
            query = ?query.query,
            total = result.page().total_elements,
            facets = query.facets.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Search executed"
        );

        Ok(result)
    }

    fn execute(
        &self,
        query: &SearchQuery,
    ) -> SearchResult<(Page<PersonHit>, Box<dyn Query>, Searcher)> {
        let query_builder = QueryBuilder::new(
            self.index_manager.schema().clone(),
            self.index_manager.index().clone(),
        );
        let tantivy_query = query_builder.build(query)?;

        let searcher = self.index_manager.reader().searcher();

        let offset = query.pageable.offset();
        let total_hits = searcher
            .search(&*tantivy_query, &Count)
            .map_err(|e| SearchError::SearchFailed(format!("Count failed: {}", e)))?;

        let mut hits = Vec::new();
        if offset < self.config.max_results {
            let limit = (query.pageable.size as usize)
                .min(self.config.max_results - offset)
                .max(1);
            let collector = TopDocs::with_limit(limit).and_offset(offset);

            let top_docs = searcher
                .search(&*tantivy_query, &collector)
                .map_err(|e| SearchError::SearchFailed(format!("Search execution failed: {}", e)))?;

            let schema = self.index_manager.schema();
            for (score, doc_address) in top_docs {
                let retrieved: TantivyDocument = searcher
                    .doc(doc_address)
                    .map_err(|e| SearchError::SearchFailed(format!("Failed to retrieve doc: {}", e)))?;

                hits.push(PersonHit {
                    person: PersonDocument::from_stored(&retrieved, schema)?,
                    score,
                });
            }
        }

        let page = Page::new(hits, query.pageable, total_hits as u64);
        Ok((page, tantivy_query, searcher))
    }

    /// Count values of one facet field over the whole result set, then slice
    fn facet_result_page(
        &self,
        searcher: &Searcher,
        query: &dyn Query,
        request: &FacetRequest,
    ) -> SearchResult<FacetResultPage> {
        let index_field = facet_index_field(&request.field)
            .ok_or_else(|| SearchError::UnknownField(request.field.clone()))?;

        let root = tantivy::schema::Facet::from_path(vec![index_field]);
        let mut facet_collector = FacetCollector::for_field(index_field);
        facet_collector.add_facet(root.clone());

        let facet_counts = searcher
            .search(query, &facet_collector)
            .map_err(|e| SearchError::SearchFailed(format!("Facet aggregation failed: {}", e)))?;

        let mut counts: Vec<(String, u64)> = facet_counts
            .get(root)
            .filter_map(|(facet, count)| {
                facet.to_path().last().map(|value| (value.to_string(), count))
            })
            .collect();

        match request.sort {
            FacetSort::Count => counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))),
            FacetSort::Index => counts.sort_by(|a, b| a.0.cmp(&b.0)),
        }

        let total_elements = counts.len() as u64;
        let entries = counts
            .into_iter()
            .skip(request.offset as usize)
            .take(request.limit as usize)
            .map(|(value, count)| FacetFieldEntry::new(request.field.as_str(), value, count))
            .collect();

        Ok(FacetResultPage::new(entries, request.pageable(), total_elements))
    }

    /// Index a single person
    pub async fn index_person(&self, person: &Person) -> SearchResult<()> {
        self.index_manager
            .index_document(&PersonDocument::from(person))
            .await
    }

    /// Index multiple persons
    pub async fn index_persons(&self, persons: &[Person]) -> SearchResult<usize> {
        let documents: Vec<_> = persons.iter().map(PersonDocument::from).collect();
        self.index_manager.index_documents(&documents).await
    }

    /// Delete a person from the index
    pub async fn delete_person(&self, person_id: &str) -> SearchResult<()> {
        self.index_manager.delete_document(person_id).await
    }

    /// Get index statistics
    pub async fn get_stats(&self) -> SearchResult<IndexStats> {
        self.index_manager.get_stats().await
    }

    /// Commit pending changes
    pub async fn commit(&self) -> SearchResult<()> {
        self.index_manager.commit().await
    }

    /// Clear the entire index
    pub async fn clear_index(&self) -> SearchResult<()> {
        self.index_manager.clear_index().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::SearchConfigBuilder;
    use tempfile::TempDir;

    async fn create_test_service(dir: &TempDir) -> SearchService {
        let config = SearchConfigBuilder::new()
            .index_path(dir.path().to_path_buf())
            .writer_heap_size(20_000_000)
            .build();

        SearchService::new(config).await.unwrap()
    }

    fn person(id: &str, name: &str, organization: &str, areas: Vec<&str>) -> Person {
        Person::new(id, name)
            .with_organization(organization)
            .with_subject_areas(areas)
    }

    #[tokio::test]
    async fn test_index_and_search() {
        let dir = TempDir::new().unwrap();
        let service = create_test_service(&dir).await;

        service
            .index_person(&person("per-1", "Barbara McClintock", "Genetics", vec!["Biology"]))
            .await
            .unwrap();

        let results = service.search(&SearchQuery::new("mcclintock")).await.unwrap();
        assert!(!results.is_faceted());
        assert_eq!(results.page().total_elements, 1);
        assert_eq!(results.page().content[0].person.id, "per-1");
    }

    #[tokio::test]
    async fn test_faceted_search_counts_and_slices() {
        let dir = TempDir::new().unwrap();
        let service = create_test_service(&dir).await;

        service
            .index_persons(&[
                person("per-1", "A", "Library", vec!["Biology", "Chemistry"]),
                person("per-2", "B", "Library", vec!["Biology"]),
                person("per-3", "C", "Engineering", vec!["Physics"]),
            ])
            .await
            .unwrap();

        let query = SearchQuery::all()
            .with_facet(FacetRequest::new("subjectArea", 2))
            .with_facet(FacetRequest::new("organization", 10).with_sort(FacetSort::Index));

        let results = service.search(&query).await.unwrap();
        let SearchPage::Faceted(faceted) = results else {
            panic!("expected faceted page");
        };

        let subject = &faceted.facet_result_pages[0];
        assert_eq!(subject.total_elements, 3);
        assert_eq!(subject.pageable, Pageable::new(0, 2));
        assert_eq!(
            subject.content,
            vec![
                FacetFieldEntry::new("subjectArea", "Biology", 2),
                FacetFieldEntry::new("subjectArea", "Chemistry", 1),
            ]
        );

        let organization = &faceted.facet_result_pages[1];
        assert_eq!(organization.content[0].value, "Engineering");
        assert_eq!(organization.content[1].value, "Library");
    }

    #[tokio::test]
    async fn test_filter_restricts_results() {
        let dir = TempDir::new().unwrap();
        let service = create_test_service(&dir).await;

        service
            .index_persons(&[
                person("per-1", "A", "Library", vec!["Biology"]),
                person("per-2", "B", "Engineering", vec!["Biology"]),
            ])
            .await
            .unwrap();

        let query = SearchQuery::all().with_filter("organization", "Engineering");
        let results = service.search(&query).await.unwrap();

        assert_eq!(results.page().total_elements, 1);
        assert_eq!(results.page().content[0].person.id, "per-2");
    }
}
