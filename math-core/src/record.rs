//! Persisted operation records

use crate::operation::Operation;
use serde::{Deserialize, Serialize};

/// Timestamp layout used for persisted records (local clock, microseconds)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One row of the append-only `operations` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Auto-incremented row id
    pub id: i64,

    /// Which operation was executed
    pub operation: Operation,

    /// First operand
    pub a: f64,

    /// Second operand
    pub b: f64,

    /// Computed result
    pub result: f64,

    /// Local write time, formatted with [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
}

/// Current local time rendered for a new record
pub fn local_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_timestamp_parses_back() {
        let ts = local_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
        // date, space, time with six fractional digits
        assert_eq!(ts.len(), "2024-01-01 00:00:00.000000".len());
    }
}
