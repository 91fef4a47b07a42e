//! Local business search.
//!
//! Businesses near a point are fetched page by page. Paging stops once the
//! provider's (capped) total is reached, or as soon as a page contains a
//! business rated below the cutoff: that page is kept, nothing after it is
//! requested.

mod client;
mod filters;
mod pagination;
mod search;
mod types;

pub use client::{YelpClient, YelpConfig};
pub use filters::{SearchFilters, SearchQuery};
pub use pagination::{PageRequest, PageState, Paginator};
pub use search::search_near;
pub use types::{Business, CategoryRef, SearchPage, parse_search_page};

use crate::error::PipelineError;

/// A paginated business search provider.
pub trait BusinessSearch {
    /// Fetch a single page of results for `query`.
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<SearchPage, PipelineError>;
}
