//! Custom Axum extractors that report failures in the service error format.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::Error;

/// JSON request body.
///
/// Accepts `application/json` (any `+json` suffix) or a missing content type.
/// Parse failures become `400` responses with the standard error body, naming
/// the field when serde reports one as missing.
pub struct CaseBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for CaseBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let media_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase());

        if let Some(media_type) = media_type {
            let is_json = media_type == "application/json" || media_type.ends_with("+json");
            if !is_json {
                return Err(Error::Validation(format!(
                    "Unsupported content type '{media_type}', expected application/json"
                )));
            }
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| Error::Validation(format!("Failed to read request body: {e}")))?;

        serde_json::from_slice(&bytes)
            .map(CaseBody)
            .map_err(|e| body_error(&e))
    }
}

fn body_error(err: &serde_json::Error) -> Error {
    let message = err.to_string();
    match missing_field(&message) {
        Some(field) => Error::invalid_field(field, format!("{field} is required")),
        None => Error::Validation(format!("Invalid request body: {message}")),
    }
}

/// Field name from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

/// Query-string extractor with the standard error body on failure.
pub struct SearchQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SearchQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| SearchQuery(value))
            .map_err(|e| Error::Validation(format!("Invalid query string: {}", e.body_text())))
    }
}
