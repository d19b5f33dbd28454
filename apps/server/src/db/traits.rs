//! Core trait for case storage backends

use crate::{
    db::search::{CaseQuery, FilterExpr, SuggestField},
    Result,
};
use async_trait::async_trait;
use docket_models::{CaseId, LegalCase};

/// Storage operations needed by the case and search services.
///
/// Backends own identifier uniqueness and `case_number` uniqueness: an insert or
/// replace that would duplicate a `case_number` fails with `Error::Conflict`, even
/// when two requests race past the service-level pre-check.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Short backend name used in logs and metrics labels.
    fn backend_name(&self) -> &'static str;

    /// Insert a new case.
    ///
    /// # Errors
    /// * `Conflict` - `case_number` or `id` already present
    async fn insert(&self, case: &LegalCase) -> Result<()>;

    /// Read a case by identifier.
    ///
    /// # Returns
    /// * `Ok(Some(case))` - Case found
    /// * `Ok(None)` - No case with this identifier
    async fn find_by_id(&self, id: &CaseId) -> Result<Option<LegalCase>>;

    /// Read a case by its unique case number (exact match).
    async fn find_by_case_number(&self, case_number: &str) -> Result<Option<LegalCase>>;

    /// Replace the stored document of an existing case.
    ///
    /// # Returns
    /// `false` if no case with `case.id` exists.
    ///
    /// # Errors
    /// * `Conflict` - the new `case_number` belongs to another case
    async fn replace(&self, case: &LegalCase) -> Result<bool>;

    /// Remove a case.
    ///
    /// # Returns
    /// `false` if no case with this identifier exists.
    async fn delete(&self, id: &CaseId) -> Result<bool>;

    /// One page of cases matching `query.filter`.
    ///
    /// Ordered by text relevance (when the filter has a text clause), then
    /// `filed_date` descending, then identifier ascending.
    async fn search(&self, query: &CaseQuery) -> Result<Vec<LegalCase>>;

    /// Number of cases matching `filter`.
    async fn count(&self, filter: &FilterExpr) -> Result<u64>;

    /// Sorted distinct non-empty values of a field.
    async fn distinct(&self, field: SuggestField) -> Result<Vec<String>>;

    /// Check connectivity.
    async fn ping(&self) -> Result<()>;
}
