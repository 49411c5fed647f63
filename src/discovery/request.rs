//! Discovery query-string parsing
//!
//! ```text
//! ?query=cell biology&page=0&size=20
//!  &facets=subjectArea,organization
//!  &subjectArea.limit=5&subjectArea.offset=5&subjectArea.sort=INDEX
//!  &organization.filter=Library
//! ```

use crate::discovery::page::Pageable;
use crate::error::{AppError, Result};
use crate::search::{is_facet_field, FacetRequest, FacetSort, SearchFilter, SearchQuery};
use std::str::FromStr;

const QUERY_PARAM: &str = "query";
const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";
const FACETS_PARAM: &str = "facets";

/// Bounds applied while parsing
#[derive(Debug, Clone, Copy)]
pub struct RequestLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub default_facet_limit: u32,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 1000,
            default_facet_limit: 10,
        }
    }
}

/// A parsed discovery request
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryRequest {
    /// Free text, `None` matches everything
    pub query: Option<String>,
    pub pageable: Pageable,
    pub facets: Vec<FacetRequest>,
    pub filters: Vec<SearchFilter>,
}

impl DiscoveryRequest {
    /// Parse raw query pairs, in the order they appeared on the URL
    pub fn parse(params: &[(String, String)], limits: &RequestLimits) -> Result<Self> {
        let query = last(params, QUERY_PARAM)
            .map(str::trim)
            .filter(|q| !q.is_empty() && *q != "*")
            .map(str::to_string);

        let number = match last(params, PAGE_PARAM) {
            Some(raw) => parse_number::<u32>(PAGE_PARAM, raw)?,
            None => 0,
        };

        let size = match last(params, SIZE_PARAM) {
            Some(raw) => parse_number::<u32>(SIZE_PARAM, raw)?,
            None => limits.default_page_size,
        };
        if size == 0 {
            return Err(AppError::Validation("size must be at least 1".to_string()));
        }
        let size = size.min(limits.max_page_size);

        let mut fields: Vec<String> = Vec::new();
        for (_, value) in params.iter().filter(|(k, _)| k == FACETS_PARAM) {
            for field in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                if !is_facet_field(field) {
                    return Err(AppError::Validation(format!("{} is not a faceted field", field)));
                }
                if !fields.iter().any(|f| f == field) {
                    fields.push(field.to_string());
                }
            }
        }

        let facets = fields
            .into_iter()
            .map(|field| facet_request(params, field, limits))
            .collect::<Result<Vec<_>>>()?;

        let mut filters = Vec::new();
        for (key, value) in params {
            let Some(field) = key.strip_suffix(".filter") else {
                continue;
            };
            if !is_facet_field(field) {
                return Err(AppError::Validation(format!("{} is not a faceted field", field)));
            }
            if !value.is_empty() {
                filters.push(SearchFilter::new(field, value.clone()));
            }
        }

        Ok(Self {
            query,
            pageable: Pageable::new(number, size),
            facets,
            filters,
        })
    }

    pub fn to_search_query(&self) -> SearchQuery {
        SearchQuery {
            query: self.query.clone(),
            pageable: self.pageable,
            facets: self.facets.clone(),
            filters: self.filters.clone(),
        }
    }
}

fn facet_request(
    params: &[(String, String)],
    field: String,
    limits: &RequestLimits,
) -> Result<FacetRequest> {
    let limit_key = format!("{}.limit", field);
    let limit = match last(params, &limit_key) {
        Some(raw) => parse_number::<u32>(&limit_key, raw)?,
        None => limits.default_facet_limit,
    };
    if limit == 0 {
        return Err(AppError::Validation(format!("{} must be at least 1", limit_key)));
    }

    let offset_key = format!("{}.offset", field);
    let offset = match last(params, &offset_key) {
        Some(raw) => parse_number::<u32>(&offset_key, raw)?,
        None => 0,
    };

    let sort_key = format!("{}.sort", field);
    let sort = match last(params, &sort_key) {
        Some(raw) => FacetSort::from_str(raw)
            .map_err(|_| AppError::Validation(format!("{} must be COUNT or INDEX", sort_key)))?,
        None => FacetSort::default(),
    };

    let request = FacetRequest {
        field,
        limit,
        offset,
        sort,
    };
    request.check()?;
    Ok(request)
}

fn last<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn parse_number<N: FromStr>(key: &str, raw: &str) -> Result<N> {
    raw.trim()
        .parse::<N>()
        .map_err(|_| AppError::Validation(format!("{} must be a non-negative integer", key)))
}
