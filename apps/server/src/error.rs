//! Error types for the case service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::StoreUnavailable(_) | Error::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) | Error::InvalidField { .. } => "validation_error",
            Error::Conflict(_) => "conflict",
            Error::NotFound(_) => "not_found",
            Error::StoreUnavailable(_) | Error::Database(_) => "store_unavailable",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl From<docket_models::Error> for Error {
    fn from(err: docket_models::Error) -> Self {
        match err {
            docket_models::Error::InvalidId(_) => Error::invalid_field("id", err.to_string()),
            docket_models::Error::InvalidStatus(_) => {
                Error::invalid_field("status", err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<String> = field_errors.keys().map(|f| f.to_string()).collect();
        fields.sort();

        let Some(field) = fields.into_iter().next() else {
            return Error::Validation(errors.to_string());
        };
        let message = field_errors
            .iter()
            .find(|(name, _)| name.to_string() == field)
            .and_then(|(_, errs)| errs.first())
            .map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid ({})", e.code),
            })
            .unwrap_or_else(|| format!("{field} is invalid"));

        Error::InvalidField { field, message }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (detail, field) = match &self {
            Error::InvalidField { field, message } => (message.clone(), Some(field.clone())),
            Error::Validation(msg)
            | Error::Conflict(msg)
            | Error::NotFound(msg)
            | Error::StoreUnavailable(msg) => (msg.clone(), None),
            Error::Database(_) => {
                tracing::error!(error = %self, "Database error");
                ("Document store is unavailable".to_string(), None)
            }
            Error::Internal(_) => {
                tracing::error!(error = %self, "Internal error");
                ("Internal server error".to_string(), None)
            }
        };

        let mut body = json!({
            "detail": detail,
            "error_code": self.error_code(),
            "status_code": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}
