//! Create and update payloads.
//!
//! `NewCase` carries every required field of a case; `CasePatch` carries any
//! subset of them. Both are validated with `validator` before they reach a store.

use chrono::{NaiveDate, NaiveDateTime};
use docket_models::{CaseData, CaseStatus, Document, Party};
use serde::Deserialize;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Body of `POST /cases`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCase {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub case_number: String,

    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub ucn: String,

    #[validate(length(max = 2000), custom(function = "not_blank"))]
    pub description: String,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub case_type: String,

    pub status: CaseStatus,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub judge_name: String,

    pub filed_date: NaiveDate,

    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub county: String,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub location: String,

    #[serde(default)]
    pub parties: Vec<Party>,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(rename = "actor-id", alias = "actor_id", default)]
    pub actor_id: Option<String>,

    #[serde(rename = "court-id", alias = "court_id", default)]
    pub court_id: Option<String>,

    #[serde(default, with = "docket_models::serde_helpers::timestamp")]
    pub crawled_date: Option<NaiveDateTime>,
}

impl NewCase {
    pub fn into_data(self) -> CaseData {
        CaseData {
            case_number: self.case_number.trim().to_string(),
            ucn: self.ucn,
            description: self.description,
            case_type: self.case_type,
            status: self.status,
            judge_name: self.judge_name,
            filed_date: self.filed_date,
            county: self.county,
            location: self.location,
            parties: self.parties,
            documents: self.documents,
            actor_id: self.actor_id,
            court_id: self.court_id,
            crawled_date: self.crawled_date,
        }
    }
}

/// Body of `PUT /cases/{id}`: present fields replace stored ones.
///
/// `parties` and `documents` are replaced wholesale. A payload with no fields
/// at all is rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CasePatch {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub case_number: Option<String>,

    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub ucn: Option<String>,

    #[validate(length(max = 2000), custom(function = "not_blank"))]
    pub description: Option<String>,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub case_type: Option<String>,

    pub status: Option<CaseStatus>,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub judge_name: Option<String>,

    pub filed_date: Option<NaiveDate>,

    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub county: Option<String>,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub location: Option<String>,

    pub parties: Option<Vec<Party>>,

    pub documents: Option<Vec<Document>>,

    #[serde(rename = "actor-id", alias = "actor_id", default)]
    pub actor_id: Option<String>,

    #[serde(rename = "court-id", alias = "court_id", default)]
    pub court_id: Option<String>,

    #[serde(default, with = "docket_models::serde_helpers::timestamp")]
    pub crawled_date: Option<NaiveDateTime>,
}

impl CasePatch {
    pub fn is_empty(&self) -> bool {
        self.case_number.is_none()
            && self.ucn.is_none()
            && self.description.is_none()
            && self.case_type.is_none()
            && self.status.is_none()
            && self.judge_name.is_none()
            && self.filed_date.is_none()
            && self.county.is_none()
            && self.location.is_none()
            && self.parties.is_none()
            && self.documents.is_none()
            && self.actor_id.is_none()
            && self.court_id.is_none()
            && self.crawled_date.is_none()
    }

    /// Overwrite the fields present in this patch.
    pub fn apply_to(self, data: &mut CaseData) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(
            &mut data.case_number,
            self.case_number.map(|n| n.trim().to_string()),
        );
        set(&mut data.ucn, self.ucn);
        set(&mut data.description, self.description);
        set(&mut data.case_type, self.case_type);
        set(&mut data.status, self.status);
        set(&mut data.judge_name, self.judge_name);
        set(&mut data.filed_date, self.filed_date);
        set(&mut data.county, self.county);
        set(&mut data.location, self.location);
        set(&mut data.parties, self.parties);
        set(&mut data.documents, self.documents);

        if self.actor_id.is_some() {
            data.actor_id = self.actor_id;
        }
        if self.court_id.is_some() {
            data.court_id = self.court_id;
        }
        if self.crawled_date.is_some() {
            data.crawled_date = self.crawled_date;
        }
    }
}
