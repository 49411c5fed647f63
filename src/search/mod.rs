//! Full-text and faceted person search powered by Tantivy
//!
//! - **Full-Text Search**: name, title, overview and keywords
//! - **Facets**: per-field value counts over the whole result set, sliced by
//!   offset and limit, ordered by count or by value
//! - **Filters**: restrict results to documents carrying facet values
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           Search Service API                     │
//! ├─────────────────────────────────────────────────┤
//! │  - search()        - find_all()                 │
//! │  - index_person()  - delete_person()            │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │           Index Manager                          │
//! ├─────────────────────────────────────────────────┤
//! │  - Schema Management                             │
//! │  - Single Writer, Manually Reloaded Reader       │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │              Tantivy Index                       │
//! ├─────────────────────────────────────────────────┤
//! │  - Inverted Index (name, title, overview)       │
//! │  - Facet Fields (subject area, organization)    │
//! │  - Doc Store (source record)                    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use scholars_middleware::search::{FacetRequest, SearchConfig, SearchQuery, SearchService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let search = SearchService::new(SearchConfig::default()).await?;
//!
//!     let query = SearchQuery::new("cell biology")
//!         .with_facet(FacetRequest::new("subjectArea", 10))
//!         .with_page(0, 20);
//!
//!     let results = search.search(&query).await?;
//!     println!("Found {} persons", results.page().total_elements);
//!
//!     Ok(())
//! }
//! ```

mod config;
mod document;
mod error;
mod index;
mod query;
mod service;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use document::{
    build_person_schema, facet_fields, facet_index_field, is_facet_field, PersonDocument,
    SearchDocument,
};
pub use error::{SearchError, SearchResult};
pub use index::{IndexManager, IndexStats};
pub use query::{FacetRequest, FacetSort, QueryBuilder, SearchFilter, SearchQuery};
pub use service::{PersonHit, SearchService};
