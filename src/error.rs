//! Error types for the shape registry

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for shape operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Shape registry errors
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("unknown record shape: {name}")]
    UnknownRecordShape {
        name: String,
        /// Closest declared name, when one matches
        suggestion: Option<String>,
    },

    #[error("document rejected by shape {shape}: {} field failure(s)", .failures.len())]
    Rejected {
        shape: String,
        failures: Vec<FieldFailure>,
    },

    #[error("duplicate field `{field}` in shape {shape}")]
    DuplicateField { shape: String, field: String },

    #[error("duplicate shape name: {name}")]
    DuplicateShape { name: String },

    #[error("numeric bounds on non-numeric field `{field}` of shape {shape}")]
    BoundsOnNonNumeric { shape: String, field: String },
}

impl SchemaError {
    /// Field failures of a rejected document, empty for other errors
    pub fn failures(&self) -> &[FieldFailure] {
        match self {
            SchemaError::Rejected { failures, .. } => failures,
            _ => &[],
        }
    }
}

/// A single failed constraint, with enough detail to correct the input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFailure {
    /// Dotted/indexed path to the offending field (e.g. `items[0].url`)
    pub field: String,
    #[serde(flatten)]
    pub kind: FailureKind,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.field, self.kind)
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Required field with no default was absent
    MissingRequiredField,
    /// Value was neither of the declared type nor coercible to it
    TypeMismatch { expected: String, actual: String },
    /// Numeric value outside the declared inclusive bounds
    OutOfRange {
        minimum: Option<f64>,
        maximum: Option<f64>,
        value: f64,
    },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingRequiredField => write!(f, "missing required field"),
            FailureKind::TypeMismatch { expected, actual } => {
                write!(f, "expected {expected}, got {actual}")
            }
            FailureKind::OutOfRange {
                minimum,
                maximum,
                value,
            } => match (minimum, maximum) {
                (Some(lo), Some(hi)) => write!(f, "value {value} outside bounds [{lo}, {hi}]"),
                (Some(lo), None) => write!(f, "value {value} below minimum {lo}"),
                (None, Some(hi)) => write!(f, "value {value} above maximum {hi}"),
                (None, None) => write!(f, "value {value} out of range"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display() {
        let failure = FieldFailure {
            field: "age".to_string(),
            kind: FailureKind::OutOfRange {
                minimum: Some(0.0),
                maximum: Some(120.0),
                value: 150.0,
            },
        };
        assert_eq!(
            failure.to_string(),
            "`age`: value 150 outside bounds [0, 120]"
        );
    }

    #[test]
    fn test_rejected_display_counts_failures() {
        let err = SchemaError::Rejected {
            shape: "User".to_string(),
            failures: vec![
                FieldFailure {
                    field: "name".to_string(),
                    kind: FailureKind::MissingRequiredField,
                },
                FieldFailure {
                    field: "age".to_string(),
                    kind: FailureKind::TypeMismatch {
                        expected: "integer".to_string(),
                        actual: "string".to_string(),
                    },
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "document rejected by shape User: 2 field failure(s)"
        );
        assert_eq!(err.failures().len(), 2);
    }

    #[test]
    fn test_failure_serialization_is_flat() {
        let failure = FieldFailure {
            field: "name".to_string(),
            kind: FailureKind::MissingRequiredField,
        };
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["field"], "name");
        assert_eq!(value["kind"], "missing_required_field");
    }
}
