//! Case service - single-record operations
//!
//! Enforces the record lifecycle on top of a [`CaseStore`]:
//! - identifiers are assigned here on create
//! - `case_number` uniqueness is pre-checked here and enforced again by the store
//! - missing records surface as `NotFound`

use crate::{
    db::{
        search::{CaseQuery, FilterExpr, PageSizePolicy, Paged, RawPageParams},
        CaseStore,
    },
    models::{CasePatch, NewCase},
    Error, Result,
};
use docket_models::{CaseId, LegalCase};
use std::sync::Arc;
use validator::Validate;

pub struct CaseService {
    store: Arc<dyn CaseStore>,
    page_policy: PageSizePolicy,
}

fn not_found(id: &CaseId) -> Error {
    Error::NotFound(format!("Case {id} not found"))
}

impl CaseService {
    pub fn new(store: Arc<dyn CaseStore>, page_policy: PageSizePolicy) -> Self {
        Self { store, page_policy }
    }

    /// Create a case and return it with its new identifier.
    ///
    /// # Errors
    /// * `InvalidField` - a required field is blank or too long
    /// * `Conflict` - `case_number` is already taken
    #[tracing::instrument(skip(self, input), fields(case_number = %input.case_number))]
    pub async fn create(&self, input: NewCase) -> Result<LegalCase> {
        input.validate()?;
        let data = input.into_data();

        if self
            .store
            .find_by_case_number(&data.case_number)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(format!(
                "Case with number {} already exists",
                data.case_number
            )));
        }

        let case = LegalCase::new(CaseId::generate(), data);
        self.store.insert(&case).await?;

        tracing::info!(id = %case.id, "Case created");
        Ok(case)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<LegalCase> {
        let id = CaseId::parse(id)?;
        self.store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_case_number(&self, case_number: &str) -> Result<LegalCase> {
        self.store
            .find_by_case_number(case_number)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Case with number {case_number} not found")))
    }

    /// One page of all cases, newest filing first.
    #[tracing::instrument(skip(self, paging))]
    pub async fn list(&self, paging: &RawPageParams) -> Result<Paged<LegalCase>> {
        let page = paging.parse(&self.page_policy)?;
        let query = CaseQuery::new(FilterExpr::MatchAll, page.skip(), page.limit());

        let results = self.store.search(&query).await?;
        let total_count = self.store.count(&query.filter).await?;

        Ok(Paged::new(results, &page, total_count))
    }

    /// Apply a partial update.
    ///
    /// Keeping the current `case_number` is not a conflict; taking another
    /// case's number is.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: CasePatch) -> Result<LegalCase> {
        let id = CaseId::parse(id)?;
        let mut case = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        if patch.is_empty() {
            return Err(Error::Validation("No fields provided to update".to_string()));
        }
        patch.validate()?;

        let previous_number = case.data.case_number.clone();
        patch.apply_to(&mut case.data);

        if case.data.case_number != previous_number {
            if let Some(owner) = self
                .store
                .find_by_case_number(&case.data.case_number)
                .await?
            {
                if owner.id != id {
                    return Err(Error::Conflict(format!(
                        "Case with number {} already exists",
                        case.data.case_number
                    )));
                }
            }
        }

        if !self.store.replace(&case).await? {
            // Deleted between the read and the write.
            return Err(not_found(&id));
        }

        tracing::info!(id = %case.id, "Case updated");
        Ok(case)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = CaseId::parse(id)?;
        if !self.store.delete(&id).await? {
            return Err(not_found(&id));
        }

        tracing::info!(id = %id, "Case deleted");
        Ok(())
    }
}
