//! Search query building and parsing

use crate::discovery::Pageable;
use crate::search::document::{facet_index_field, facet_value, TEXT_FIELDS};
use crate::search::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Order of a facet's value list
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum FacetSort {
    /// Most frequent values first, ties by value
    #[default]
    Count,
    /// Values in lexical order
    Index,
}

/// Facet requested for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetRequest {
    /// Client-facing field name
    pub field: String,
    pub limit: u32,
    pub offset: u32,
    pub sort: FacetSort,
}

impl FacetRequest {
    pub fn new(field: impl Into<String>, limit: u32) -> Self {
        Self {
            field: field.into(),
            limit,
            offset: 0,
            sort: FacetSort::default(),
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sort(mut self, sort: FacetSort) -> Self {
        self.sort = sort;
        self
    }

    /// Offsets must land on a page boundary so the cursor names the slice returned
    pub fn check(&self) -> SearchResult<()> {
        if self.limit == 0 {
            return Err(SearchError::InvalidFacetRequest(format!(
                "{}.limit must be at least 1",
                self.field
            )));
        }
        if self.offset % self.limit != 0 {
            return Err(SearchError::InvalidFacetRequest(format!(
                "{}.offset {} is not a multiple of {}.limit {}",
                self.field, self.offset, self.field, self.limit
            )));
        }
        Ok(())
    }

    /// Cursor of the requested slice of values
    pub fn pageable(&self) -> Pageable {
        let limit = self.limit.max(1);
        Pageable::new(self.offset / limit, limit)
    }
}

/// Restrict results to documents carrying a facet value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub field: String,
    pub value: String,
}

impl SearchFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Main search query structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free text; `None` matches all documents
    pub query: Option<String>,

    pub pageable: Pageable,

    /// Facets to compute, in response order
    pub facets: Vec<FacetRequest>,

    pub filters: Vec<SearchFilter>,
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: if query.trim().is_empty() { None } else { Some(query) },
            ..Self::all()
        }
    }

    /// Query matching every document
    pub fn all() -> Self {
        Self {
            query: None,
            pageable: Pageable::new(0, 20),
            facets: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn with_page(mut self, number: u32, size: u32) -> Self {
        self.pageable = Pageable::new(number, size);
        self
    }

    pub fn with_facet(mut self, facet: FacetRequest) -> Self {
        self.facets.push(facet);
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(SearchFilter::new(field, value));
        self
    }
}

/// Query builder for constructing complex Tantivy queries
pub struct QueryBuilder {
    schema: tantivy::schema::Schema,
    index: tantivy::Index,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new(schema: tantivy::schema::Schema, index: tantivy::Index) -> Self {
        Self { schema, index }
    }

    /// Build a Tantivy query from a SearchQuery
    pub fn build(&self, search_query: &SearchQuery) -> SearchResult<Box<dyn tantivy::query::Query>> {
        use tantivy::query::*;

        let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        if let Some(ref text) = search_query.query {
            let text_fields = TEXT_FIELDS
                .iter()
                .filter_map(|name| self.schema.get_field(name).ok())
                .collect::<Vec<_>>();

            let query_parser = QueryParser::for_index(&self.index, text_fields);
            subqueries.push((Occur::Must, query_parser.parse_query(text)?));
        }

        // Values of one field are alternatives, distinct fields must all match
        let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
        for filter in &search_query.filters {
            match grouped.iter_mut().find(|(field, _)| *field == filter.field) {
                Some((_, values)) => values.push(filter.value.as_str()),
                None => grouped.push((filter.field.as_str(), vec![filter.value.as_str()])),
            }
        }

        for (field, values) in grouped {
            let index_field = facet_index_field(field)
                .ok_or_else(|| SearchError::UnknownField(field.to_string()))?;
            let schema_field = self
                .schema
                .get_field(index_field)
                .map_err(|e| SearchError::UnknownField(e.to_string()))?;

            let alternatives: Vec<(Occur, Box<dyn Query>)> = values
                .into_iter()
                .map(|value| {
                    let term = tantivy::Term::from_facet(schema_field, &facet_value(index_field, value));
                    let query: Box<dyn Query> = Box::new(TermQuery::new(
                        term,
                        tantivy::schema::IndexRecordOption::Basic,
                    ));
                    (Occur::Should, query)
                })
                .collect();

            subqueries.push((Occur::Must, Box::new(BooleanQuery::new(alternatives))));
        }

        if subqueries.is_empty() {
            return Ok(Box::new(AllQuery));
        }
        if subqueries.len() == 1 {
            if let Some((_, query)) = subqueries.pop() {
                return Ok(query);
            }
        }
        Ok(Box::new(BooleanQuery::new(subqueries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_builder() {
        let query = SearchQuery::new("neural networks")
            .with_page(2, 50)
            .with_facet(FacetRequest::new("subjectArea", 5).with_offset(10))
            .with_filter("organization", "Library");

        assert_eq!(query.query.as_deref(), Some("neural networks"));
        assert_eq!(query.pageable, Pageable::new(2, 50));
        assert_eq!(query.facets[0].pageable(), Pageable::new(2, 5));
        assert_eq!(query.filters.len(), 1);
    }

    #[test]
    fn test_facet_offset_must_align_with_limit() {
        assert!(FacetRequest::new("keyword", 10).with_offset(20).check().is_ok());
        assert!(matches!(
            FacetRequest::new("keyword", 10).with_offset(5).check(),
            Err(SearchError::InvalidFacetRequest(_))
        ));
        assert!(FacetRequest::new("keyword", 0).check().is_err());
    }

    #[test]
    fn test_blank_query_matches_all() {
        assert_eq!(SearchQuery::new("  ").query, None);
    }

    #[test]
    fn test_facet_sort_parsing() {
        assert_eq!("count".parse::<FacetSort>().unwrap(), FacetSort::Count);
        assert_eq!("INDEX".parse::<FacetSort>().unwrap(), FacetSort::Index);
        assert!("random".parse::<FacetSort>().is_err());
        assert_eq!(FacetSort::Index.to_string(), "INDEX");
    }
}
