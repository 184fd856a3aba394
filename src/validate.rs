//! Document validation against record shapes
//!
//! Validation is a pure, synchronous computation over a candidate JSON
//! document. It accumulates every field failure instead of bailing at the
//! first, and on success returns the normalized instance: defaults filled,
//! coercions applied, undeclared fields stripped (unless configured
//! otherwise).

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::{FailureKind, FieldFailure, Result, SchemaError};
use crate::schema::{FieldSpec, FieldType, RecordShape};

/// Validate a candidate document against a shape.
///
/// Returns the normalized instance, or [`SchemaError::Rejected`] carrying
/// one [`FieldFailure`] per violated constraint.
pub fn validate_record(
    shape: &RecordShape,
    document: &Value,
    config: &ValidationConfig,
) -> Result<Value> {
    let mut failures = Vec::new();
    let instance = match document.as_object() {
        Some(object) => validate_fields(shape, object, "", config, &mut failures),
        None => {
            failures.push(FieldFailure {
                field: "$root".to_string(),
                kind: FailureKind::TypeMismatch {
                    expected: "record".to_string(),
                    actual: json_type_name(document).to_string(),
                },
            });
            Value::Null
        }
    };

    if failures.is_empty() {
        Ok(instance)
    } else {
        debug!(
            shape = %shape.name,
            failures = failures.len(),
            "document rejected"
        );
        Err(SchemaError::Rejected {
            shape: shape.name.clone(),
            failures,
        })
    }
}

/// Walk a shape's fields over an object, filling defaults and collecting
/// failures. Always returns an object; the caller discards it when any
/// failure was recorded.
fn validate_fields(
    shape: &RecordShape,
    object: &Map<String, Value>,
    prefix: &str,
    config: &ValidationConfig,
    failures: &mut Vec<FieldFailure>,
) -> Value {
    let mut out = Map::new();
    for field in &shape.fields {
        let path = join_path(prefix, &field.name);
        match object.get(&field.name) {
            None => {
                if field.required {
                    failures.push(FieldFailure {
                        field: path,
                        kind: FailureKind::MissingRequiredField,
                    });
                } else if let Some(default) = &field.default {
                    out.insert(field.name.clone(), default.clone());
                }
            }
            Some(Value::Null) => {
                if field.is_nullable() {
                    out.insert(field.name.clone(), Value::Null);
                } else {
                    failures.push(FieldFailure {
                        field: path,
                        kind: FailureKind::TypeMismatch {
                            expected: field.field_type.type_name().to_string(),
                            actual: "null".to_string(),
                        },
                    });
                }
            }
            Some(value) => {
                if let Some(normalized) = validate_field(field, value, &path, config, failures) {
                    out.insert(field.name.clone(), normalized);
                }
            }
        }
    }

    if config.keep_unknown_fields {
        for (name, value) in object {
            if shape.field(name).is_none() {
                out.insert(name.clone(), value.clone());
            }
        }
    }

    Value::Object(out)
}

/// Type-check one field value, then apply its numeric bounds.
fn validate_field(
    field: &FieldSpec,
    value: &Value,
    path: &str,
    config: &ValidationConfig,
    failures: &mut Vec<FieldFailure>,
) -> Option<Value> {
    let normalized = validate_type(&field.field_type, value, path, config, failures)?;

    if field.field_type.is_numeric() {
        if let Some(observed) = normalized.as_f64() {
            let below = field.minimum.map_or(false, |lo| observed < lo);
            let above = field.maximum.map_or(false, |hi| observed > hi);
            if below || above {
                failures.push(FieldFailure {
                    field: path.to_string(),
                    kind: FailureKind::OutOfRange {
                        minimum: field.minimum,
                        maximum: field.maximum,
                        value: observed,
                    },
                });
                return None;
            }
        }
    }

    Some(normalized)
}

/// Check a value against a field type, recursing into lists and nested
/// records. Failure paths use dotted/indexed notation (`items[0].url`).
fn validate_type(
    field_type: &FieldType,
    value: &Value,
    path: &str,
    config: &ValidationConfig,
    failures: &mut Vec<FieldFailure>,
) -> Option<Value> {
    match field_type {
        FieldType::List { element } => {
            let Some(items) = value.as_array() else {
                failures.push(type_mismatch(path, field_type, value));
                return None;
            };
            let mut out = Vec::with_capacity(items.len());
            let mut ok = true;
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                match validate_type(element, item, &item_path, config, failures) {
                    Some(normalized) => out.push(normalized),
                    None => ok = false,
                }
            }
            ok.then(|| Value::Array(out))
        }
        FieldType::Record { shape } => {
            let Some(object) = value.as_object() else {
                failures.push(type_mismatch(path, field_type, value));
                return None;
            };
            let before = failures.len();
            let instance = validate_fields(shape, object, path, config, failures);
            (failures.len() == before).then_some(instance)
        }
        _ => match coerce_scalar(value, field_type, config.coerce) {
            Some(normalized) => Some(normalized),
            None => {
                failures.push(type_mismatch(path, field_type, value));
                None
            }
        },
    }
}

/// Accept or coerce a scalar value. Coercion covers numeric strings,
/// integral floats, and the literal boolean strings.
fn coerce_scalar(value: &Value, field_type: &FieldType, coerce: bool) -> Option<Value> {
    match field_type {
        FieldType::Text => value.as_str().map(|s| Value::String(s.to_string())),
        FieldType::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
            Value::Number(n) if coerce => n
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| (i64::MIN as f64..=i64::MAX as f64).contains(f))
                .map(|f| Value::from(f as i64)),
            Value::String(s) if coerce => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        FieldType::Float => match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(s) if coerce => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            _ => None,
        },
        FieldType::Bool => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(s) if coerce => match s.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        FieldType::List { .. } | FieldType::Record { .. } => None,
    }
}

fn type_mismatch(path: &str, expected: &FieldType, actual: &Value) -> FieldFailure {
    FieldFailure {
        field: path.to_string(),
        kind: FailureKind::TypeMismatch {
            expected: expected.type_name().to_string(),
            actual: json_type_name(actual).to_string(),
        },
    }
}

/// JSON type name for failure reports
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "text",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}
