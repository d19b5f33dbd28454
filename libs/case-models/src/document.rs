use crate::serde_helpers::parse_lenient_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A filed document attached to a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentInput")]
pub struct Document {
    pub description: String,

    /// Page count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_link: Option<String>,

    /// Storage path of the retrieved document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Document {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            pages: None,
            date: None,
            doc_link: None,
            path: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PagesInput {
    Count(u32),
    Text(String),
}

#[derive(Deserialize)]
struct DocumentInput {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    pages: Option<PagesInput>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    doc_link: Option<String>,
    #[serde(default)]
    path: Option<String>,
}

impl From<DocumentInput> for Document {
    fn from(input: DocumentInput) -> Self {
        let description = input
            .description
            .filter(|s| !s.trim().is_empty())
            .or(input.filename)
            .unwrap_or_default();

        let pages = match input.pages {
            Some(PagesInput::Count(n)) => Some(n),
            Some(PagesInput::Text(s)) => s.trim().parse().ok(),
            None => None,
        };

        // "#" is the placeholder link used by the crawler for missing documents.
        let doc_link = input
            .doc_link
            .filter(|s| !s.trim().is_empty() && s.trim() != "#");

        Self {
            description,
            pages,
            date: input.date.as_deref().and_then(parse_lenient_date),
            doc_link,
            path: input.path.filter(|s| !s.trim().is_empty()),
        }
    }
}
