//! Docket - legal case records service
//!
//! A CRUD and search backend for court case records:
//! - Case repository with case-number uniqueness
//! - Filtered, paginated search over a PostgreSQL JSONB document store
//! - Full-text matching through the store's native text index
//! - In-memory store for tests and offline operation

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
