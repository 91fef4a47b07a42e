//! Paginated search around a point.

use tracing::debug;

use crate::error::PipelineError;
use crate::geo::GeoPoint;

use super::BusinessSearch;
use super::filters::SearchFilters;
use super::pagination::Paginator;
use super::types::Business;

/// Fetch businesses within `radius_miles` of `point`, in arrival order.
///
/// Pages are requested one after another until the [`Paginator`] stops.
pub async fn search_near<P: BusinessSearch>(
    provider: &P,
    filters: &SearchFilters,
    point: GeoPoint,
    radius_miles: f64,
) -> Result<Vec<Business>, PipelineError> {
    let query = filters.query(point, radius_miles);
    let mut paginator = Paginator::new(filters);
    let mut requests = 0;

    while let Some(request) = paginator.next_request() {
        debug!(
            %point,
            offset = request.offset,
            limit = request.limit,
            "requesting business page"
        );
        let page = provider.search_page(&query, request).await?;
        requests += 1;
        paginator.accept(page)?;
    }

    let businesses = paginator.into_businesses();
    debug!(%point, requests, found = businesses.len(), "business search complete");

    Ok(businesses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::{PageRequest, SearchPage, SearchQuery};
    use std::sync::Mutex;

    /// Serves `total` businesses, honouring offset and limit. Businesses at
    /// the listed indices get a low rating.
    struct FakeSearch {
        total: usize,
        available: usize,
        low_rated: Vec<usize>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl FakeSearch {
        fn new(total: usize) -> Self {
            Self {
                total,
                available: total,
                low_rated: Vec::new(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_low_rated(mut self, index: usize) -> Self {
            self.low_rated.push(index);
            self
        }

        fn with_available(mut self, available: usize) -> Self {
            self.available = available;
            self
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl BusinessSearch for FakeSearch {
        async fn search_page(
            &self,
            _query: &SearchQuery,
            page: PageRequest,
        ) -> Result<SearchPage, PipelineError> {
            self.requests.lock().unwrap().push(page);

            let end = (page.offset + page.limit).min(self.available);
            let businesses = (page.offset..end.max(page.offset))
                .map(|i| {
                    let rating = if self.low_rated.contains(&i) { 2.9 } else { 4.0 };
                    Business::new(format!("b{i}"), rating, &["restaurants"])
                })
                .collect();

            Ok(SearchPage {
                total: self.total,
                businesses,
            })
        }
    }

    fn point() -> GeoPoint {
        GeoPoint::new(34.0, -118.4)
    }

    #[tokio::test]
    async fn collects_total_in_three_requests() {
        let provider = FakeSearch::new(120);
        let found = search_near(&provider, &SearchFilters::default(), point(), 0.5)
            .await
            .unwrap();

        assert_eq!(found.len(), 120);
        assert_eq!(provider.requests().len(), 3);
        assert_eq!(found[0].name, "b0");
        assert_eq!(found[119].name, "b119");
    }

    #[tokio::test]
    async fn low_rating_on_second_page_stops_after_it() {
        let provider = FakeSearch::new(120).with_low_rated(60);
        let found = search_near(&provider, &SearchFilters::default(), point(), 0.5)
            .await
            .unwrap();

        assert_eq!(found.len(), 100);
        assert_eq!(provider.requests().len(), 2);
        assert!(found.iter().any(|b| b.rating < 3.0));
    }

    #[tokio::test]
    async fn total_is_capped_at_one_thousand() {
        let provider = FakeSearch::new(5000);
        let found = search_near(&provider, &SearchFilters::default(), point(), 0.5)
            .await
            .unwrap();

        assert_eq!(found.len(), 1000);
        assert_eq!(provider.requests().len(), 20);
        let last = provider.requests().last().copied().unwrap();
        assert_eq!(last.offset + last.limit, 1000);
    }

    #[tokio::test]
    async fn zero_total_makes_one_request() {
        let provider = FakeSearch::new(0);
        let found = search_near(&provider, &SearchFilters::default(), point(), 0.5)
            .await
            .unwrap();

        assert!(found.is_empty());
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn stalled_provider_is_error_not_a_hang() {
        // Claims 120 but only ever serves 70
        let provider = FakeSearch::new(120).with_available(70);
        let err = search_near(&provider, &SearchFilters::default(), point(), 0.5)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Provider { .. }));
        assert_eq!(provider.requests().len(), 3);
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        struct Failing;

        impl BusinessSearch for Failing {
            async fn search_page(
                &self,
                _query: &SearchQuery,
                _page: PageRequest,
            ) -> Result<SearchPage, PipelineError> {
                Err(PipelineError::Configuration("credential rejected".into()))
            }
        }

        let err = search_near(&Failing, &SearchFilters::default(), point(), 0.5)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
