//! Filter expressions over case records.
//!
//! [`FilterBuilder`] turns validated search criteria into a single [`FilterExpr`].
//! The PostgreSQL store compiles the expression to parameterized SQL
//! (see `query_builder`); the in-memory store evaluates it with
//! [`FilterExpr::matches`]. Both must agree on every atom.

use super::text::{casefold, sanitize_text_query, tokenize};
use chrono::NaiveDate;
use docket_models::{CaseStatus, LegalCase};
use std::collections::HashSet;

/// Scalar text fields that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseField {
    CaseNumber,
    CaseType,
    County,
    JudgeName,
}

impl CaseField {
    /// Key of the field in the stored JSON document.
    pub fn json_key(&self) -> &'static str {
        match self {
            Self::CaseNumber => "case_number",
            Self::CaseType => "case_type",
            Self::County => "county",
            Self::JudgeName => "judge_name",
        }
    }

    pub fn value<'a>(&self, case: &'a LegalCase) -> &'a str {
        match self {
            Self::CaseNumber => &case.data.case_number,
            Self::CaseType => &case.data.case_type,
            Self::County => &case.data.county,
            Self::JudgeName => &case.data.judge_name,
        }
    }
}

/// Fields offered as search suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestField {
    CaseTypes,
    Statuses,
    Judges,
    Counties,
}

impl SuggestField {
    /// Parse the path segment of `/search/suggest/{field}`.
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "case-types" => Some(Self::CaseTypes),
            "statuses" => Some(Self::Statuses),
            "judges" => Some(Self::Judges),
            "counties" => Some(Self::Counties),
            _ => None,
        }
    }

    pub fn json_key(&self) -> &'static str {
        match self {
            Self::CaseTypes => "case_type",
            Self::Statuses => "status",
            Self::Judges => "judge_name",
            Self::Counties => "county",
        }
    }

    pub fn value<'a>(&self, case: &'a LegalCase) -> &'a str {
        match self {
            Self::CaseTypes => &case.data.case_type,
            Self::Statuses => case.data.status.as_str(),
            Self::Judges => &case.data.judge_name,
            Self::Counties => &case.data.county,
        }
    }
}

/// Which attribute of a party a party filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyField {
    Name,
    Attorney,
}

impl PartyField {
    pub fn json_key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Attorney => "attorney",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAtom {
    /// Every term must occur in the case's search text.
    Text { terms: Vec<String> },
    /// Status is one of the listed values.
    StatusIn(Vec<CaseStatus>),
    /// Case-insensitive substring match on a scalar field.
    FieldContains { field: CaseField, value: String },
    /// Case-insensitive equality with any of the values.
    FieldEqualsAny { field: CaseField, values: Vec<String> },
    /// Some party of the case has a name/attorney containing `value`.
    PartyContains { field: PartyField, value: String },
    FiledOnOrAfter(NaiveDate),
    FiledOnOrBefore(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    MatchAll,
    Atom(FilterAtom),
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Conjunction of `parts`; collapses to [`FilterExpr::MatchAll`] or the single part.
    pub fn all(mut parts: Vec<FilterExpr>) -> Self {
        parts.retain(|p| *p != FilterExpr::MatchAll);
        match parts.len() {
            0 => FilterExpr::MatchAll,
            1 => parts.remove(0),
            _ => FilterExpr::And(parts),
        }
    }

    /// Disjunction of `parts`; a single part is returned as is.
    pub fn any(mut parts: Vec<FilterExpr>) -> Self {
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            FilterExpr::Or(parts)
        }
    }

    /// Terms of the free-text clause, used for relevance ordering.
    pub fn text_terms(&self) -> Option<&[String]> {
        match self {
            FilterExpr::Atom(FilterAtom::Text { terms }) => Some(terms.as_slice()),
            FilterExpr::And(parts) | FilterExpr::Or(parts) => {
                parts.iter().find_map(FilterExpr::text_terms)
            }
            _ => None,
        }
    }

    pub fn matches(&self, case: &LegalCase) -> bool {
        match self {
            FilterExpr::MatchAll => true,
            FilterExpr::Atom(atom) => atom.matches(case),
            FilterExpr::And(parts) => parts.iter().all(|p| p.matches(case)),
            FilterExpr::Or(parts) => parts.iter().any(|p| p.matches(case)),
        }
    }
}

impl FilterAtom {
    fn matches(&self, case: &LegalCase) -> bool {
        let data = &case.data;
        match self {
            FilterAtom::Text { terms } => {
                let tokens: HashSet<String> = data
                    .searchable_text()
                    .into_iter()
                    .flat_map(tokenize)
                    .collect();
                terms.iter().any(|t| tokens.contains(t))
            }
            FilterAtom::StatusIn(statuses) => statuses.contains(&data.status),
            FilterAtom::FieldContains { field, value } => {
                casefold(field.value(case)).contains(&casefold(value))
            }
            FilterAtom::FieldEqualsAny { field, values } => {
                let actual = casefold(field.value(case));
                values.iter().any(|v| casefold(v) == actual)
            }
            FilterAtom::PartyContains { field, value } => {
                let needle = casefold(value);
                data.parties.iter().any(|party| {
                    let haystack = match field {
                        PartyField::Name => Some(party.name.as_str()),
                        PartyField::Attorney => party.attorney.as_deref(),
                    };
                    haystack.is_some_and(|h| casefold(h).contains(&needle))
                })
            }
            FilterAtom::FiledOnOrAfter(date) => data.filed_date >= *date,
            FilterAtom::FiledOnOrBefore(date) => data.filed_date <= *date,
        }
    }
}

/// Validated criteria of a basic search. Absent fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub text: Option<String>,
    pub case_number: Option<String>,
    pub case_type: Option<String>,
    pub status: Option<CaseStatus>,
    pub county: Option<String>,
    pub judge_name: Option<String>,
    pub party_name: Option<String>,
    pub attorney_name: Option<String>,
    pub filed_from: Option<NaiveDate>,
    pub filed_to: Option<NaiveDate>,
}

/// Validated criteria of an advanced search.
///
/// Values within one list are alternatives (OR); lists combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedCriteria {
    pub text: Option<String>,
    pub case_numbers: Vec<String>,
    pub case_types: Vec<String>,
    pub statuses: Vec<CaseStatus>,
    pub counties: Vec<String>,
    pub judges: Vec<String>,
    pub parties: Vec<String>,
    pub attorneys: Vec<String>,
    pub filed_after: Option<NaiveDate>,
    pub filed_before: Option<NaiveDate>,
}

/// Builds filter expressions from search criteria.
#[derive(Debug, Clone, Copy)]
pub struct FilterBuilder {
    max_query_length: usize,
}

impl FilterBuilder {
    pub fn new(max_query_length: usize) -> Self {
        Self { max_query_length }
    }

    pub fn build(&self, criteria: &SearchCriteria) -> FilterExpr {
        let mut clauses = Vec::new();

        if let Some(text) = self.text_clause(criteria.text.as_deref()) {
            clauses.push(text);
        }
        if let Some(status) = criteria.status {
            clauses.push(FilterExpr::Atom(FilterAtom::StatusIn(vec![status])));
        }

        let contains = [
            (CaseField::CaseNumber, &criteria.case_number),
            (CaseField::CaseType, &criteria.case_type),
            (CaseField::County, &criteria.county),
            (CaseField::JudgeName, &criteria.judge_name),
        ];
        for (field, value) in contains {
            if let Some(value) = non_blank(value.as_deref()) {
                clauses.push(FilterExpr::Atom(FilterAtom::FieldContains {
                    field,
                    value: value.to_string(),
                }));
            }
        }

        let party = [
            (PartyField::Name, &criteria.party_name),
            (PartyField::Attorney, &criteria.attorney_name),
        ];
        for (field, value) in party {
            if let Some(value) = non_blank(value.as_deref()) {
                clauses.push(FilterExpr::Atom(FilterAtom::PartyContains {
                    field,
                    value: value.to_string(),
                }));
            }
        }

        clauses.extend(date_clauses(criteria.filed_from, criteria.filed_to));

        FilterExpr::all(clauses)
    }

    pub fn build_advanced(&self, criteria: &AdvancedCriteria) -> FilterExpr {
        let mut clauses = Vec::new();

        if let Some(text) = self.text_clause(criteria.text.as_deref()) {
            clauses.push(text);
        }

        let substring_lists = [
            (CaseField::CaseNumber, &criteria.case_numbers),
            (CaseField::JudgeName, &criteria.judges),
        ];
        for (field, values) in substring_lists {
            let alternatives: Vec<FilterExpr> = non_blank_values(values)
                .map(|value| {
                    FilterExpr::Atom(FilterAtom::FieldContains {
                        field,
                        value: value.to_string(),
                    })
                })
                .collect();
            if !alternatives.is_empty() {
                clauses.push(FilterExpr::any(alternatives));
            }
        }

        let equality_lists = [
            (CaseField::CaseType, &criteria.case_types),
            (CaseField::County, &criteria.counties),
        ];
        for (field, values) in equality_lists {
            let values: Vec<String> = non_blank_values(values).map(str::to_string).collect();
            if !values.is_empty() {
                clauses.push(FilterExpr::Atom(FilterAtom::FieldEqualsAny { field, values }));
            }
        }

        if !criteria.statuses.is_empty() {
            clauses.push(FilterExpr::Atom(FilterAtom::StatusIn(
                criteria.statuses.clone(),
            )));
        }

        let party_lists = [
            (PartyField::Name, &criteria.parties),
            (PartyField::Attorney, &criteria.attorneys),
        ];
        for (field, values) in party_lists {
            let alternatives: Vec<FilterExpr> = non_blank_values(values)
                .map(|value| {
                    FilterExpr::Atom(FilterAtom::PartyContains {
                        field,
                        value: value.to_string(),
                    })
                })
                .collect();
            if !alternatives.is_empty() {
                clauses.push(FilterExpr::any(alternatives));
            }
        }

        clauses.extend(date_clauses(criteria.filed_after, criteria.filed_before));

        FilterExpr::all(clauses)
    }

    fn text_clause(&self, raw: Option<&str>) -> Option<FilterExpr> {
        let sanitized = sanitize_text_query(raw?, self.max_query_length)?;
        let terms = tokenize(&sanitized);
        if terms.is_empty() {
            return None;
        }
        Some(FilterExpr::Atom(FilterAtom::Text { terms }))
    }
}

fn date_clauses(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<FilterExpr> {
    let mut out = Vec::new();
    if let Some(from) = from {
        out.push(FilterExpr::Atom(FilterAtom::FiledOnOrAfter(from)));
    }
    if let Some(to) = to {
        out.push(FilterExpr::Atom(FilterAtom::FiledOnOrBefore(to)));
    }
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn non_blank_values(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}
