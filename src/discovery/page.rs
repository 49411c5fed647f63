//! Paged result sets as produced by the search engine

use serde::{Deserialize, Serialize};

/// Pagination cursor: which slice of an ordered collection is being viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    /// Zero-based page number
    pub number: u32,

    /// Page size
    pub size: u32,
}

impl Pageable {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    /// Index of the first element on this page
    pub fn offset(&self) -> usize {
        self.number as usize * self.size as usize
    }

    pub fn first(&self) -> Self {
        Self::new(0, self.size)
    }

    pub fn next(&self) -> Self {
        Self::new(self.number + 1, self.size)
    }

    /// Previous page, or the first page when already at the start
    pub fn previous_or_first(&self) -> Self {
        Self::new(self.number.saturating_sub(1), self.size)
    }
}

/// Standard page metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl PageMetadata {
    pub fn new(pageable: Pageable, total_elements: u64) -> Self {
        let total_pages = if pageable.size == 0 {
            0
        } else {
            total_elements.div_ceil(pageable.size as u64)
        };

        Self {
            number: pageable.number,
            size: pageable.size,
            total_elements,
            total_pages,
        }
    }
}

/// One page of content plus the cursor that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: Pageable, total_elements: u64) -> Self {
        Self {
            content,
            pageable,
            total_elements,
        }
    }

    pub fn metadata(&self) -> PageMetadata {
        PageMetadata::new(self.pageable, self.total_elements)
    }

    pub fn total_pages(&self) -> u64 {
        self.metadata().total_pages
    }

    pub fn is_first(&self) -> bool {
        self.pageable.number == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        (self.pageable.number as u64) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.pageable.number > 0
    }

    /// Transform the content while keeping the cursor and totals
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            pageable: self.pageable,
            total_elements: self.total_elements,
        }
    }
}

/// A single value/count pair of a faceted field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFieldEntry {
    /// Name of the faceted field this entry belongs to
    pub field: String,
    pub value: String,
    pub count: u64,
}

impl FacetFieldEntry {
    pub fn new(field: impl Into<String>, value: impl Into<String>, count: u64) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            count,
        }
    }
}

/// One faceted field's values, paged independently of the result content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetResultPage {
    pub content: Vec<FacetFieldEntry>,
    pub pageable: Pageable,

    /// Number of distinct values for the field
    pub total_elements: u64,
}

impl FacetResultPage {
    pub fn new(content: Vec<FacetFieldEntry>, pageable: Pageable, total_elements: u64) -> Self {
        Self {
            content,
            pageable,
            total_elements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A page of results carrying one facet result page per requested field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetPage<T> {
    pub page: Page<T>,
    pub facet_result_pages: Vec<FacetResultPage>,
}

impl<T> FacetPage<T> {
    pub fn new(page: Page<T>, facet_result_pages: Vec<FacetResultPage>) -> Self {
        Self {
            page,
            facet_result_pages,
        }
    }
}

/// What a search returns: either a plain page or a faceted one
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPage<T> {
    Plain(Page<T>),
    Faceted(FacetPage<T>),
}

impl<T> SearchPage<T> {
    pub fn page(&self) -> &Page<T> {
        match self {
            SearchPage::Plain(page) => page,
            SearchPage::Faceted(faceted) => &faceted.page,
        }
    }

    pub fn is_faceted(&self) -> bool {
        matches!(self, SearchPage::Faceted(_))
    }

    pub fn map<U, F>(self, f: F) -> SearchPage<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            SearchPage::Plain(page) => SearchPage::Plain(page.map(f)),
            SearchPage::Faceted(faceted) => SearchPage::Faceted(FacetPage {
                page: faceted.page.map(f),
                facet_result_pages: faceted.facet_result_pages,
            }),
        }
    }
}

impl<T> From<Page<T>> for SearchPage<T> {
    fn from(page: Page<T>) -> Self {
        SearchPage::Plain(page)
    }
}

impl<T> From<FacetPage<T>> for SearchPage<T> {
    fn from(page: FacetPage<T>) -> Self {
        SearchPage::Faceted(page)
    }
}
