use crate::document::Document;
use crate::error::{Error, Result};
use crate::id::CaseId;
use crate::party::Party;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseStatus {
    Pending,
    Active,
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [Self::Pending, Self::Active, Self::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = Error;

    /// Case-insensitive: `active`, `Active` and `ACTIVE` are the same status.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidStatus(s.to_string()))
    }
}

impl Serialize for CaseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CaseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The content of a case record: everything except its identifier.
///
/// This is the shape stored in the document column and the shape clients send on
/// create. Provenance fields (`actor-id`, `court-id`, `crawled_date`) identify the
/// crawler run that produced the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseData {
    /// Unique business key
    pub case_number: String,

    /// Uniform case number
    pub ucn: String,

    pub description: String,

    pub case_type: String,

    pub status: CaseStatus,

    pub judge_name: String,

    pub filed_date: NaiveDate,

    pub county: String,

    /// Court location or division
    pub location: String,

    #[serde(default)]
    pub parties: Vec<Party>,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(
        rename = "actor-id",
        alias = "actor_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actor_id: Option<String>,

    #[serde(
        rename = "court-id",
        alias = "court_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub court_id: Option<String>,

    #[serde(
        default,
        with = "crate::serde_helpers::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub crawled_date: Option<NaiveDateTime>,
}

impl CaseData {
    /// Text fields covered by free-text search, in index order.
    ///
    /// Includes party names and attorneys and document descriptions.
    pub fn searchable_text(&self) -> Vec<&str> {
        let mut out = vec![
            self.case_number.as_str(),
            self.description.as_str(),
            self.ucn.as_str(),
            self.case_type.as_str(),
            self.status.as_str(),
            self.judge_name.as_str(),
            self.county.as_str(),
            self.location.as_str(),
        ];
        for party in &self.parties {
            out.push(party.name.as_str());
            if let Some(attorney) = &party.attorney {
                out.push(attorney.as_str());
            }
        }
        for doc in &self.documents {
            out.push(doc.description.as_str());
        }
        out
    }
}

/// A stored case record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalCase {
    pub id: CaseId,

    #[serde(flatten)]
    pub data: CaseData,
}

impl LegalCase {
    pub fn new(id: CaseId, data: CaseData) -> Self {
        Self { id, data }
    }
}
