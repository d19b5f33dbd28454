//! Query-string parsing for search endpoints.
//!
//! Raw parameters arrive as optional strings so malformed values can be reported
//! with the offending field name. Parsing produces validated requests; nothing
//! here touches the store.

use super::filter::{AdvancedCriteria, SearchCriteria};
use super::pagination::{PageRequest, PageSizePolicy};
use crate::{Error, Result};
use chrono::NaiveDate;
use docket_models::CaseStatus;
use serde::Deserialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw `page`/`page_size` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Raw query parameters of `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchParams {
    pub q: Option<String>,
    pub case_number: Option<String>,
    pub case_type: Option<String>,
    pub status: Option<String>,
    pub county: Option<String>,
    pub judge_name: Option<String>,
    pub party_name: Option<String>,
    pub attorney_name: Option<String>,
    pub filed_date_from: Option<String>,
    pub filed_date_to: Option<String>,
    #[serde(flatten)]
    pub paging: RawPageParams,
}

/// Raw query parameters of `GET /search/advanced`. List values are comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAdvancedParams {
    pub text_query: Option<String>,
    pub case_numbers: Option<String>,
    pub case_types: Option<String>,
    pub statuses: Option<String>,
    pub counties: Option<String>,
    pub judges: Option<String>,
    pub parties: Option<String>,
    pub attorneys: Option<String>,
    pub filed_after: Option<String>,
    pub filed_before: Option<String>,
    #[serde(flatten)]
    pub paging: RawPageParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub criteria: SearchCriteria,
    pub page: PageRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedSearchRequest {
    pub criteria: AdvancedCriteria,
    pub page: PageRequest,
}

impl RawPageParams {
    pub fn parse(&self, policy: &PageSizePolicy) -> Result<PageRequest> {
        let page = parse_integer("page", self.page.as_deref())?;
        let page_size = parse_integer("page_size", self.page_size.as_deref())?;
        PageRequest::new(page, page_size, policy)
    }
}

impl SearchRequest {
    pub fn parse(raw: &RawSearchParams, policy: &PageSizePolicy) -> Result<Self> {
        let criteria = SearchCriteria {
            text: non_blank(raw.q.as_deref()),
            case_number: non_blank(raw.case_number.as_deref()),
            case_type: non_blank(raw.case_type.as_deref()),
            status: parse_status("status", raw.status.as_deref())?,
            county: non_blank(raw.county.as_deref()),
            judge_name: non_blank(raw.judge_name.as_deref()),
            party_name: non_blank(raw.party_name.as_deref()),
            attorney_name: non_blank(raw.attorney_name.as_deref()),
            filed_from: parse_date("filed_date_from", raw.filed_date_from.as_deref())?,
            filed_to: parse_date("filed_date_to", raw.filed_date_to.as_deref())?,
        };
        let page = raw.paging.parse(policy)?;
        Ok(Self { criteria, page })
    }
}

impl AdvancedSearchRequest {
    pub fn parse(raw: &RawAdvancedParams, policy: &PageSizePolicy) -> Result<Self> {
        let statuses = split_list(raw.statuses.as_deref())
            .into_iter()
            .map(|s| {
                s.parse::<CaseStatus>()
                    .map_err(|e| Error::invalid_field("statuses", e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let criteria = AdvancedCriteria {
            text: non_blank(raw.text_query.as_deref()),
            case_numbers: split_list(raw.case_numbers.as_deref()),
            case_types: split_list(raw.case_types.as_deref()),
            statuses,
            counties: split_list(raw.counties.as_deref()),
            judges: split_list(raw.judges.as_deref()),
            parties: split_list(raw.parties.as_deref()),
            attorneys: split_list(raw.attorneys.as_deref()),
            filed_after: parse_date("filed_after", raw.filed_after.as_deref())?,
            filed_before: parse_date("filed_before", raw.filed_before.as_deref())?,
        };
        let page = raw.paging.parse(policy)?;
        Ok(Self { criteria, page })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_integer(field: &str, value: Option<&str>) -> Result<Option<i64>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::invalid_field(field, format!("{field} must be an integer"))),
    }
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT).map(Some).map_err(|_| {
            Error::invalid_field(field, format!("Invalid date format for {field}. Use YYYY-MM-DD"))
        }),
    }
}

fn parse_status(field: &str, value: Option<&str>) -> Result<Option<CaseStatus>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<CaseStatus>()
            .map(Some)
            .map_err(|e| Error::invalid_field(field, e.to_string())),
    }
}
