//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{Form, FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde_json::Value;

use warehouse_core::validation::parse_record_id;
use warehouse_core::{Record, RecordId, ValidationError};

use crate::error::ApiError;

/// Extract and validate a record id from the path.
///
/// Anything that is not a plain non-negative integer answers `400 Invalid id`.
pub struct ValidId(pub RecordId);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationError::InvalidId { raw: String::new() })?;

        Ok(Self(parse_record_id(&raw)?))
    }
}

/// Request body as a record.
///
/// ```text
/// Content-Type                          decoded as
/// ────────────                          ──────────
/// application/x-www-form-urlencoded     flat record of strings
/// anything else (or none)               JSON object; empty body = {}
/// ```
pub struct BodyRecord(pub Record);

impl<S> FromRequest<S> for BodyRecord
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| invalid_body(e.body_text()))?;

            return Ok(Self(form_record(pairs)));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| invalid_body(e.body_text()))?;

        parse_record(&bytes).map(Self)
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
}

/// Repeated keys keep the last value.
fn form_record(pairs: Vec<(String, String)>) -> Record {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

fn parse_record(bytes: &[u8]) -> Result<Record, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(invalid_body("expected a JSON object")),
        Err(e) => Err(invalid_body(e.to_string())),
    }
}

fn invalid_body(reason: impl Into<String>) -> ApiError {
    ValidationError::InvalidBody {
        reason: reason.into(),
    }
    .into()
}
