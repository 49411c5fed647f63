pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::config::Config;
use crate::discovery::{FacetPagedResourcesAssembler, RequestLimits};
use crate::harvest::HarvestRegistry;
use crate::search::SearchService;
use crate::state::Repositories;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    pub repos: Repositories,
    pub harvest: Arc<HarvestRegistry>,
    pub assembler: FacetPagedResourcesAssembler,
    pub limits: RequestLimits,

    /// Base of every hypermedia link, without a trailing slash
    pub public_url: String,
}

impl AppState {
    pub fn new(
        search: Arc<SearchService>,
        repos: Repositories,
        harvest: Arc<HarvestRegistry>,
        config: &Config,
    ) -> Self {
        Self {
            search,
            repos,
            harvest,
            assembler: FacetPagedResourcesAssembler::new(),
            limits: RequestLimits {
                default_page_size: config.server.default_page_size,
                max_page_size: config.server.max_page_size,
                default_facet_limit: config.search.default_facet_limit,
            },
            public_url: config.server.public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute href for a request path
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.public_url, path)
    }
}
