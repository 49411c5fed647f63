//! Projection of search pages into client-facing paged resources

use crate::discovery::link::{Link, PageLinkBuilder};
use crate::discovery::page::{FacetPage, FacetResultPage, Page, PageMetadata, Pageable, SearchPage};
use serde::{Deserialize, Serialize};

/// A value and how many results carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub value: String,
    pub count: u64,
}

impl Entry {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Facet summary for one field, with its own cursor over the value list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub field: String,
    pub entries: Vec<Entry>,
    pub page: Pageable,
}

/// Paged resource as serialized to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResource<T> {
    pub content: Vec<T>,
    pub page: PageMetadata,
    pub links: Vec<Link>,

    /// Present only for faceted searches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<Facet>>,
}

impl<T> PagedResource<T> {
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }
}

/// Base transformation: page to content, metadata and navigation links
#[derive(Debug, Clone, Copy, Default)]
pub struct PagedResourcesAssembler;

impl PagedResourcesAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn to_resource<T>(&self, page: Page<T>, links: &PageLinkBuilder) -> PagedResource<T> {
        let metadata = page.metadata();
        let links = links.links(&page);

        PagedResource {
            content: page.content,
            page: metadata,
            links,
            facets: None,
        }
    }
}

/// Builds paged resources for plain and faceted search pages alike.
///
/// The base resource always comes from [`PagedResourcesAssembler`], so links
/// and page metadata are identical with or without facets. Faceted input
/// additionally gets one [`Facet`] per non-empty facet result page, in source
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacetPagedResourcesAssembler {
    base: PagedResourcesAssembler,
}

impl FacetPagedResourcesAssembler {
    pub fn new() -> Self {
        Self {
            base: PagedResourcesAssembler::new(),
        }
    }

    pub fn to_resource<T>(&self, page: SearchPage<T>, links: &PageLinkBuilder) -> PagedResource<T> {
        match page {
            SearchPage::Plain(page) => self.base.to_resource(page, links),
            SearchPage::Faceted(FacetPage {
                page,
                facet_result_pages,
            }) => {
                let mut resource = self.base.to_resource(page, links);
                resource.facets = Some(facets(facet_result_pages));
                resource
            }
        }
    }
}

fn facets(facet_result_pages: Vec<FacetResultPage>) -> Vec<Facet> {
    let mut facets: Vec<Facet> = Vec::with_capacity(facet_result_pages.len());

    for facet_result_page in facet_result_pages {
        let Some(facet) = facet(facet_result_page) else {
            continue;
        };

        if facets.iter().any(|f| f.field == facet.field) {
            tracing::warn!(field = %facet.field, "Dropping duplicate facet result page");
            continue;
        }

        facets.push(facet);
    }

    facets
}

/// Field name comes from the first entry; a page without entries yields nothing
fn facet(facet_result_page: FacetResultPage) -> Option<Facet> {
    let FacetResultPage {
        content, pageable, ..
    } = facet_result_page;

    let field = content.first()?.field.clone();

    let entries = content
        .into_iter()
        .map(|entry| {
            if entry.field != field {
                tracing::warn!(
                    field = %field,
                    other = %entry.field,
                    "Facet entry disagrees on field name, keeping first"
                );
            }
            Entry::new(entry.value, entry.count)
        })
        .collect();

    Some(Facet {
        field,
        entries,
        page: pageable,
    })
}
