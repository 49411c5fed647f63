//! Hypermedia links for paged resources

use crate::discovery::page::{Page, Pageable};
use serde::{Deserialize, Serialize};

pub const REL_SELF: &str = "self";
pub const REL_FIRST: &str = "first";
pub const REL_PREV: &str = "prev";
pub const REL_NEXT: &str = "next";
pub const REL_LAST: &str = "last";

const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";

/// A single navigable link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// Builds page navigation links against a base URL.
///
/// Query parameters other than `page` and `size` are carried through to every
/// link in their original order, so a followed `next` link repeats the same
/// query, facets and filters.
#[derive(Debug, Clone)]
pub struct PageLinkBuilder {
    base_href: String,
    params: Vec<(String, String)>,
}

impl PageLinkBuilder {
    pub fn new<I, K, V>(base_href: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k != PAGE_PARAM && k != SIZE_PARAM)
            .collect();

        Self {
            base_href: base_href.into(),
            params,
        }
    }

    /// Builder without extra query parameters
    pub fn for_path(base_href: impl Into<String>) -> Self {
        Self {
            base_href: base_href.into(),
            params: Vec::new(),
        }
    }

    pub fn href(&self, pageable: Pageable) -> String {
        let page = pageable.number.to_string();
        let size = pageable.size.to_string();

        let mut pairs: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.push((PAGE_PARAM, &page));
        pairs.push((SIZE_PARAM, &size));

        // string pairs always encode
        let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
        format!("{}?{}", self.base_href, query)
    }

    /// Navigation links for a page: self, then first/prev/next/last as they apply
    pub fn links<T>(&self, page: &Page<T>) -> Vec<Link> {
        let pageable = page.pageable;
        let total_pages = page.total_pages();

        let mut links = vec![Link::new(REL_SELF, self.href(pageable))];

        if total_pages > 1 {
            links.push(Link::new(REL_FIRST, self.href(pageable.first())));
        }
        if page.has_previous() {
            links.push(Link::new(REL_PREV, self.href(pageable.previous_or_first())));
        }
        if page.has_next() {
            links.push(Link::new(REL_NEXT, self.href(pageable.next())));
        }
        if total_pages > 1 {
            let last = u32::try_from(total_pages - 1).unwrap_or(u32::MAX);
            links.push(Link::new(REL_LAST, self.href(Pageable::new(last, pageable.size))));
        }

        links
    }
}
