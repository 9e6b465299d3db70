//! Request extractors for authentication and payload validation
//!
//! Handlers list [`Authenticated`] before [`MathPayload`], so a request with
//! bad credentials is rejected before its body is looked at.

use crate::api::{MathInput, ValidationIssue};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde_json::{value::RawValue, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Marker proving the request passed the token gate
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        state.gate.authenticate(header).map_err(|err| {
            debug!("Rejected request to {}: {}", parts.uri.path(), err);
            ApiError::from(err)
        })?;

        Ok(Authenticated)
    }
}

/// Validated `{a, b}` request body
#[derive(Debug, Clone, Copy)]
pub struct MathPayload(pub MathInput);

#[async_trait]
impl<S> FromRequest<S> for MathPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            ApiError::PayloadRejected(rejection.status(), rejection.body_text())
        })?;

        decode_math_input(&body).map(MathPayload)
    }
}

/// Top-level object with field values left unparsed
type RawObject<'a> = BTreeMap<String, &'a RawValue>;

/// Decode and validate a math payload.
///
/// Every field is checked so the caller sees all problems at once. Numbers
/// are taken as-is, overflowing literals becoming infinite. Numeric strings
/// and booleans are coerced to floats.
pub fn decode_math_input(body: &[u8]) -> Result<MathInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Validation(vec![ValidationIssue::missing_body()]));
    }

    // Raw values only check syntax, so `1e400` survives to the float parse
    let raw: &RawValue = serde_json::from_slice(body).map_err(|err| {
        let offset = byte_offset(body, err.line(), err.column());
        ApiError::Validation(vec![ValidationIssue::json_invalid(offset)])
    })?;

    let fields: RawObject<'_> = serde_json::from_str(raw.get()).map_err(|_| {
        ApiError::Validation(vec![ValidationIssue::model_attributes_type(
            raw_to_value(raw),
        )])
    })?;

    let mut issues = Vec::new();
    let a = read_float(&fields, "a", &mut issues);
    let b = read_float(&fields, "b", &mut issues);

    match (a, b) {
        (Some(a), Some(b)) if issues.is_empty() => Ok(MathInput { a, b }),
        _ => Err(ApiError::Validation(issues)),
    }
}

fn read_float(
    fields: &RawObject<'_>,
    name: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<f64> {
    let parsed = match fields.get(name) {
        None => Err(ValidationIssue::missing(name, object_to_value(fields))),
        Some(raw) => parse_float(name, raw),
    };

    match parsed {
        Ok(number) => Some(number),
        Err(issue) => {
            issues.push(issue);
            None
        }
    }
}

fn parse_float(name: &str, raw: &RawValue) -> Result<f64, ValidationIssue> {
    let text = raw.get();
    if text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return text
            .parse::<f64>()
            .map_err(|_| ValidationIssue::float_parsing(name, raw_to_value(raw)));
    }

    match raw_to_value(raw) {
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationIssue::float_parsing(name, Value::String(text.clone()))),
        Value::Bool(flag) => Ok(if flag { 1.0 } else { 0.0 }),
        other => Err(ValidationIssue::float_type(name, other)),
    }
}

/// Raw JSON to a value; only nested out-of-range numbers fall back to null
fn raw_to_value(raw: &RawValue) -> Value {
    serde_json::from_str(raw.get()).unwrap_or(Value::Null)
}

fn object_to_value(fields: &RawObject<'_>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, raw)| (key.clone(), raw_to_value(raw)))
            .collect(),
    )
}

/// Convert serde_json's 1-based line/column into a byte offset
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = body
        .split(|&byte| byte == b'\n')
        .take(line.saturating_sub(1))
        .map(|segment| segment.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(body.len())
}
