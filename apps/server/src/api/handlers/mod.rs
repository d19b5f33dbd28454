//! Request handlers for API endpoints
//!
//! Handlers extract and parse the request, call one service method and shape
//! the response. Errors are returned as `crate::Error`, which renders itself.

pub mod cases;
pub mod metrics;
pub mod search;

pub use cases::*;
pub use metrics::*;
pub use search::*;
