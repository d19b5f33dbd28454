//! Error types for case models

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid case ID format: {0}")]
    InvalidId(String),

    #[error("Invalid case status: {0} (expected Pending, Active or Closed)")]
    InvalidStatus(String),
}

pub type Result<T> = std::result::Result<T, Error>;
