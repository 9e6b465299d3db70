//! Arithmetic operations exposed by the service

use crate::error::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Add two operands
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Subtract `b` from `a`
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

/// Multiply two operands
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Divide `a` by `b`.
///
/// No zero check here; callers run [`Operation::check_operands`] first.
pub fn divide(a: f64, b: f64) -> f64 {
    a / b
}

/// One of the four supported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`, rejected when `b == 0`
    Divide,
}

impl Operation {
    /// Every operation, in route order
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Wire name, also used as the route path and the persisted value
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Uppercase name used in log lines
    pub fn label(self) -> &'static str {
        match self {
            Operation::Add => "ADD",
            Operation::Subtract => "SUBTRACT",
            Operation::Multiply => "MULTIPLY",
            Operation::Divide => "DIVIDE",
        }
    }

    /// Check the operation's precondition.
    ///
    /// Only divide has one: a zero divisor (either sign) is rejected.
    pub fn check_operands(self, _a: f64, b: f64) -> Result<()> {
        match self {
            Operation::Divide if b == 0.0 => Err(MathError::DivisionByZero),
            _ => Ok(()),
        }
    }

    /// Apply the operation with native floating-point semantics
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Add => add(a, b),
            Operation::Subtract => subtract(a, b),
            Operation::Multiply => multiply(a, b),
            Operation::Divide => divide(a, b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| MathError::UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(Operation::Add.apply(10.0, 5.0), 15.0);
        assert_eq!(Operation::Subtract.apply(10.0, 5.0), 5.0);
        assert_eq!(Operation::Multiply.apply(10.0, 5.0), 50.0);
        assert_eq!(Operation::Divide.apply(10.0, 5.0), 2.0);
    }

    #[test]
    fn test_divide_rejects_zero() {
        assert_eq!(
            Operation::Divide.check_operands(10.0, 0.0),
            Err(MathError::DivisionByZero)
        );
        assert_eq!(
            Operation::Divide.check_operands(-3.5, -0.0),
            Err(MathError::DivisionByZero)
        );
        assert!(Operation::Divide.check_operands(0.0, 2.0).is_ok());
    }

    #[test]
    fn test_other_operations_accept_zero() {
        for op in [Operation::Add, Operation::Subtract, Operation::Multiply] {
            assert!(op.check_operands(1.0, 0.0).is_ok());
        }
    }

    #[test]
    fn test_native_float_semantics() {
        // No overflow or NaN handling
        assert!(Operation::Multiply.apply(f64::MAX, 2.0).is_infinite());
        assert!(Operation::Subtract.apply(f64::INFINITY, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_names_and_labels() {
        for op in Operation::ALL {
            assert_eq!(op.label(), op.name().to_uppercase());
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
            assert_eq!(op.to_string(), op.name());
        }
        assert!(matches!(
            "modulo".parse::<Operation>(),
            Err(MathError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Operation::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");
        let op: Operation = serde_json::from_str("\"divide\"").unwrap();
        assert_eq!(op, Operation::Divide);
    }

    proptest! {
        #[test]
        fn prop_apply_matches_native(a in -1e12f64..1e12, b in -1e12f64..1e12) {
            prop_assert_eq!(Operation::Add.apply(a, b), a + b);
            prop_assert_eq!(Operation::Subtract.apply(a, b), a - b);
            prop_assert_eq!(Operation::Multiply.apply(a, b), a * b);
            if b != 0.0 {
                prop_assert!(Operation::Divide.check_operands(a, b).is_ok());
                prop_assert_eq!(Operation::Divide.apply(a, b), a / b);
            }
        }

        #[test]
        fn prop_divide_by_zero_always_rejected(a in proptest::num::f64::ANY) {
            prop_assert_eq!(
                Operation::Divide.check_operands(a, 0.0),
                Err(MathError::DivisionByZero)
            );
        }
    }
}
