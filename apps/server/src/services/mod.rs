//! Business logic layer
//!
//! Services sit between the HTTP handlers and the case store:
//! - `CaseService`: create/read/update/delete with case-number uniqueness
//! - `SearchService`: filtered, paginated search and value suggestions
//! - `MetricsService`: runtime gauges sampled at scrape time

pub mod cases;
pub mod metrics;
pub mod search;

pub use cases::CaseService;
pub use metrics::MetricsService;
pub use search::SearchService;
