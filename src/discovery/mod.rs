//! Faceted discovery: paged search results projected into link-navigable
//! resources.
//!
//! ```text
//!  query string ──► DiscoveryRequest ──► SearchService ──► SearchPage<T>
//!                                                              │
//!                                   FacetPagedResourcesAssembler ◄┘
//!                                                              │
//!                                                              ▼
//!                                  PagedResource { content, page, links, facets? }
//! ```

mod assembler;
mod link;
mod page;
mod request;

pub use assembler::{Entry, Facet, FacetPagedResourcesAssembler, PagedResource, PagedResourcesAssembler};
pub use link::{Link, PageLinkBuilder, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV, REL_SELF};
pub use page::{FacetFieldEntry, FacetPage, FacetResultPage, Page, PageMetadata, Pageable, SearchPage};
pub use request::{DiscoveryRequest, RequestLimits};
