//! Paging policy for business search.
//!
//! Kept free of I/O so the stopping rules can be tested directly.

use crate::error::PipelineError;

use super::filters::SearchFilters;
use super::types::{Business, SearchPage};

/// Where a search is in its paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Nothing received yet; the provider total is unknown.
    AwaitingFirstPage,
    /// Collecting until `target` businesses are held.
    Paging { target: usize },
    /// Done. No further requests.
    Stopped,
}

/// Offset and size of the next page to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

/// Accumulates pages and decides when to stop.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PageState,
    page_size: usize,
    min_rating: f64,
    max_total: usize,
    businesses: Vec<Business>,
}

impl Paginator {
    /// Create a paginator using the paging policy from `filters`.
    pub fn new(filters: &SearchFilters) -> Self {
        Self {
            state: PageState::AwaitingFirstPage,
            page_size: filters.page_size.max(1),
            min_rating: filters.min_rating,
            max_total: filters.max_total,
            businesses: Vec::new(),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Businesses collected so far, in arrival order.
    pub fn collected(&self) -> &[Business] {
        &self.businesses
    }

    /// The next page to fetch, or `None` once stopped.
    ///
    /// The offset is the number already collected; the last page is
    /// shrunk so the request never reaches past the target.
    pub fn next_request(&self) -> Option<PageRequest> {
        let offset = self.businesses.len();
        match self.state {
            PageState::AwaitingFirstPage => Some(PageRequest {
                offset,
                limit: self.page_size,
            }),
            PageState::Paging { target } => Some(PageRequest {
                offset,
                limit: self.page_size.min(target.saturating_sub(offset)),
            }),
            PageState::Stopped => None,
        }
    }

    /// Take in the page answering the last request.
    ///
    /// The first page fixes the target: the provider total, capped. A page
    /// holding any business rated below the cutoff lowers the target to
    /// what has been collected including that page. A page that adds
    /// nothing while more is expected is an error. Pages received after
    /// stopping are ignored.
    pub fn accept(&mut self, page: SearchPage) -> Result<(), PipelineError> {
        let target = match self.state {
            PageState::Stopped => return Ok(()),
            PageState::AwaitingFirstPage => page.total.min(self.max_total),
            PageState::Paging { target } => target,
        };

        if target == 0 {
            self.state = PageState::Stopped;
            return Ok(());
        }

        if page.businesses.is_empty() {
            self.state = PageState::Stopped;
            return Err(PipelineError::provider(
                "business search",
                format!(
                    "empty page at offset {} before reaching {target} businesses",
                    self.businesses.len()
                ),
            ));
        }

        let low_rated = page.businesses.iter().any(|b| b.rating < self.min_rating);
        self.businesses.extend(page.businesses);

        let target = if low_rated {
            target.min(self.businesses.len())
        } else {
            target
        };

        if self.businesses.len() >= target {
            // Over-delivery past the total never makes it into the result
            self.businesses.truncate(target);
            self.state = PageState::Stopped;
        } else {
            self.state = PageState::Paging { target };
        }

        Ok(())
    }

    /// Finish, returning everything collected.
    pub fn into_businesses(self) -> Vec<Business> {
        self.businesses
    }
}
