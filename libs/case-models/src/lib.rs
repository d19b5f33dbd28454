//! Legal case record models
//!
//! Strongly-typed structures for court case records as they are stored and served:
//!
//! - [`LegalCase`]: a stored record, an identifier plus its [`CaseData`]
//! - [`Party`] and [`Document`]: fixed-shape values embedded in a case
//! - [`CaseStatus`]: the closed set of case statuses
//! - [`CaseId`]: the opaque, store-assigned identifier
//!
//! Input handling is lenient where crawled court data is known to vary (party names
//! split into first/middle/last, page counts as strings, `MM/DD/YYYY` document dates),
//! while output is always normalized.
//!
//! # Example
//!
//! ```rust
//! use docket_models::{CaseData, CaseStatus};
//! use serde_json::json;
//!
//! let data: CaseData = serde_json::from_value(json!({
//!     "case_number": "2025-CA-006779-O",
//!     "ucn": "482025CA006779A001OX",
//!     "description": "AUGUSTE, LUCIE vs. SIMONET, CHARLENE M.",
//!     "case_type": "CA - Auto Negligence",
//!     "status": "pending",
//!     "judge_name": "Brian Sandor",
//!     "filed_date": "2025-07-17",
//!     "county": "Orange",
//!     "location": "Div 48",
//!     "actor-id": "202502"
//! }))
//! .unwrap();
//!
//! assert_eq!(data.status, CaseStatus::Pending);
//! assert_eq!(data.actor_id.as_deref(), Some("202502"));
//! ```

mod case;
mod document;
mod error;
mod id;
mod party;
pub mod serde_helpers;

pub use case::{CaseData, CaseStatus, LegalCase};
pub use document::Document;
pub use error::{Error, Result};
pub use id::CaseId;
pub use party::Party;
