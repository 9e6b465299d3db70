//! API request and response types

use math_core::Operation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operands accepted by every math route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MathInput {
    /// First operand
    pub a: f64,

    /// Second operand
    pub b: f64,
}

/// Successful operation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Operation that was executed (`add`, `subtract`, `multiply`, `divide`)
    pub operation: Operation,

    /// First operand, echoed unchanged
    pub a: f64,

    /// Second operand, echoed unchanged
    pub b: f64,

    /// Computed result
    pub result: f64,
}

/// Error body with a single human-readable detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error description
    pub detail: String,
}

/// Error body for payload validation failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    /// One entry per offending field
    pub detail: Vec<ValidationIssue>,
}

/// A single payload validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Machine-readable failure kind, e.g. `missing` or `float_parsing`
    #[serde(rename = "type")]
    pub kind: String,

    /// Path to the offending value, starting with `"body"`
    pub loc: Vec<Value>,

    /// Human-readable message
    pub msg: String,

    /// The rejected input, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl ValidationIssue {
    fn new(kind: &str, loc: Vec<Value>, msg: &str, input: Option<Value>) -> Self {
        Self {
            kind: kind.to_string(),
            loc,
            msg: msg.to_string(),
            input,
        }
    }

    /// A required field is absent; `input` is the enclosing object
    pub fn missing(field: &str, input: Value) -> Self {
        Self::new(
            "missing",
            vec!["body".into(), field.into()],
            "Field required",
            Some(input),
        )
    }

    /// The request carried no body at all
    pub fn missing_body() -> Self {
        Self::new("missing", vec!["body".into()], "Field required", Some(Value::Null))
    }

    /// A string that does not parse as a number
    pub fn float_parsing(field: &str, input: Value) -> Self {
        Self::new(
            "float_parsing",
            vec!["body".into(), field.into()],
            "Input should be a valid number, unable to parse string as a number",
            Some(input),
        )
    }

    /// A value of a type that can never be a number
    pub fn float_type(field: &str, input: Value) -> Self {
        Self::new(
            "float_type",
            vec!["body".into(), field.into()],
            "Input should be a valid number",
            Some(input),
        )
    }

    /// Body is valid JSON but not an object
    pub fn model_attributes_type(input: Value) -> Self {
        Self::new(
            "model_attributes_type",
            vec!["body".into()],
            "Input should be a valid dictionary or object to extract fields from",
            Some(input),
        )
    }

    /// Body is not valid JSON; `offset` is the byte position of the error
    pub fn json_invalid(offset: usize) -> Self {
        Self::new(
            "json_invalid",
            vec!["body".into(), offset.into()],
            "JSON decode error",
            None,
        )
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
    /// Service cannot serve requests
    Unhealthy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_result_wire_shape() {
        let result = OperationResult {
            operation: Operation::Add,
            a: 10.0,
            b: 5.0,
            result: 15.0,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"operation": "add", "a": 10.0, "b": 5.0, "result": 15.0})
        );
    }

    #[test]
    fn test_missing_issue_shape() {
        let issue = ValidationIssue::missing("b", json!({"a": 5}));
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["type"], "missing");
        assert_eq!(value["loc"], json!(["body", "b"]));
        assert_eq!(value["msg"], "Field required");
        assert_eq!(value["input"], json!({"a": 5}));
    }

    #[test]
    fn test_json_invalid_has_no_input() {
        let value = serde_json::to_value(ValidationIssue::json_invalid(7)).unwrap();
        assert_eq!(value["loc"], json!(["body", 7]));
        assert!(value.get("input").is_none());
    }

    #[test]
    fn test_health_response_camel_case() {
        let health = HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0".to_string(),
            uptime_seconds: 3,
        };
        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["uptimeSeconds"], 3);
    }
}
