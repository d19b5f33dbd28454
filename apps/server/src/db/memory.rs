//! In-process case store.
//!
//! Backs the `memory` database backend and the test suite. Evaluates filter
//! expressions directly and mirrors the PostgreSQL store's ordering and
//! uniqueness rules.

use crate::{
    db::{
        search::{text::tokenize, CaseQuery, FilterExpr, SuggestField},
        traits::CaseStore,
    },
    Error, Result,
};
use async_trait::async_trait;
use docket_models::{CaseId, LegalCase};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    cases: HashMap<CaseId, LegalCase>,
    /// case_number -> id
    case_numbers: HashMap<String, CaseId>,
}

/// Case store holding every record in memory behind a `RwLock`.
///
/// Each mutation holds the write lock for its whole check-and-write, so the
/// `case_number` check cannot race with another insert.
#[derive(Clone, Default)]
pub struct InMemoryCaseStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.cases.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn duplicate_case_number(case_number: &str) -> Error {
    Error::Conflict(format!("Case with number {case_number} already exists"))
}

/// Number of query-term occurrences in the case's search text.
fn relevance(case: &LegalCase, terms: &[String]) -> usize {
    case.data
        .searchable_text()
        .into_iter()
        .flat_map(tokenize)
        .filter(|token| terms.contains(token))
        .count()
}

fn default_order(a: &LegalCase, b: &LegalCase) -> Ordering {
    b.data
        .filed_date
        .cmp(&a.data.filed_date)
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl CaseStore for InMemoryCaseStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, case: &LegalCase) -> Result<()> {
        let mut inner = self.inner.write().await;

        if inner.case_numbers.contains_key(&case.data.case_number) {
            return Err(duplicate_case_number(&case.data.case_number));
        }
        if inner.cases.contains_key(&case.id) {
            return Err(Error::Conflict(format!("Case id {} already exists", case.id)));
        }

        inner
            .case_numbers
            .insert(case.data.case_number.clone(), case.id.clone());
        inner.cases.insert(case.id.clone(), case.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CaseId) -> Result<Option<LegalCase>> {
        Ok(self.inner.read().await.cases.get(id).cloned())
    }

    async fn find_by_case_number(&self, case_number: &str) -> Result<Option<LegalCase>> {
        let inner = self.inner.read().await;
        Ok(inner
            .case_numbers
            .get(case_number)
            .and_then(|id| inner.cases.get(id))
            .cloned())
    }

    async fn replace(&self, case: &LegalCase) -> Result<bool> {
        let mut inner = self.inner.write().await;

        let Some(previous_number) = inner
            .cases
            .get(&case.id)
            .map(|existing| existing.data.case_number.clone())
        else {
            return Ok(false);
        };

        if previous_number != case.data.case_number {
            if let Some(owner) = inner.case_numbers.get(&case.data.case_number) {
                if *owner != case.id {
                    return Err(duplicate_case_number(&case.data.case_number));
                }
            }
            inner.case_numbers.remove(&previous_number);
            inner
                .case_numbers
                .insert(case.data.case_number.clone(), case.id.clone());
        }

        inner.cases.insert(case.id.clone(), case.clone());
        Ok(true)
    }

    async fn delete(&self, id: &CaseId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.cases.remove(id) {
            Some(removed) => {
                inner.case_numbers.remove(&removed.data.case_number);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search(&self, query: &CaseQuery) -> Result<Vec<LegalCase>> {
        let inner = self.inner.read().await;

        let mut matched: Vec<(usize, &LegalCase)> = inner
            .cases
            .values()
            .filter(|case| query.filter.matches(case))
            .map(|case| {
                let score = query
                    .filter
                    .text_terms()
                    .map(|terms| relevance(case, terms))
                    .unwrap_or(0);
                (score, case)
            })
            .collect();

        matched.sort_by(|(score_a, a), (score_b, b)| {
            score_b.cmp(score_a).then_with(|| default_order(a, b))
        });

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, case)| case.clone())
            .collect())
    }

    async fn count(&self, filter: &FilterExpr) -> Result<u64> {
        let inner = self.inner.read().await;
        Ok(inner.cases.values().filter(|case| filter.matches(case)).count() as u64)
    }

    async fn distinct(&self, field: SuggestField) -> Result<Vec<String>> {
        let inner = self.inner.read().await;
        let values: BTreeSet<&str> = inner
            .cases
            .values()
            .map(|case| field.value(case))
            .filter(|v| !v.is_empty())
            .collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
