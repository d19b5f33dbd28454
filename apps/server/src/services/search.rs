//! Search service - filtered, paginated case search
//!
//! Orchestrates a search by:
//! - parsing raw query parameters into a validated request
//! - building one filter expression for it
//! - running the page query and the count query against the store
//! - assembling the paged envelope

use crate::{
    db::{
        search::{
            AdvancedSearchRequest, CaseQuery, FilterBuilder, FilterExpr, PageRequest,
            PageSizePolicy, Paged, RawAdvancedParams, RawSearchParams, SearchRequest,
            SuggestField,
        },
        CaseStore,
    },
    Result,
};
use docket_models::LegalCase;
use std::sync::Arc;

pub struct SearchService {
    store: Arc<dyn CaseStore>,
    filter_builder: FilterBuilder,
    page_policy: PageSizePolicy,
}

impl SearchService {
    pub fn new(
        store: Arc<dyn CaseStore>,
        filter_builder: FilterBuilder,
        page_policy: PageSizePolicy,
    ) -> Self {
        Self {
            store,
            filter_builder,
            page_policy,
        }
    }

    /// GET /search
    ///
    /// Malformed dates and out-of-range paging fail before the store is queried.
    #[tracing::instrument(skip_all)]
    pub async fn search(&self, raw: &RawSearchParams) -> Result<Paged<LegalCase>> {
        let request = SearchRequest::parse(raw, &self.page_policy)?;
        let filter = self.filter_builder.build(&request.criteria);
        self.run("basic", filter, &request.page).await
    }

    /// GET /search/advanced
    #[tracing::instrument(skip_all)]
    pub async fn advanced_search(&self, raw: &RawAdvancedParams) -> Result<Paged<LegalCase>> {
        let request = AdvancedSearchRequest::parse(raw, &self.page_policy)?;
        let filter = self.filter_builder.build_advanced(&request.criteria);
        self.run("advanced", filter, &request.page).await
    }

    /// Sorted distinct values of a suggestion field.
    #[tracing::instrument(skip(self))]
    pub async fn suggest(&self, field: SuggestField) -> Result<Vec<String>> {
        self.store.distinct(field).await
    }

    async fn run(
        &self,
        kind: &'static str,
        filter: FilterExpr,
        page: &PageRequest,
    ) -> Result<Paged<LegalCase>> {
        let query = CaseQuery::new(filter, page.skip(), page.limit());

        let results = self.store.search(&query).await?;
        let total_count = self.store.count(&query.filter).await?;

        crate::metrics::SEARCH_TOTAL_COUNT
            .with_label_values(&[kind])
            .observe(total_count as f64);
        tracing::debug!(
            kind,
            page = page.page(),
            returned = results.len(),
            total_count,
            "Search completed"
        );

        Ok(Paged::new(results, page, total_count))
    }
}
