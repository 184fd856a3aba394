//! Record shape types and field constraint primitives

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;

use crate::error::{Result, SchemaError};

/// Collection names are the case-folded shape name, except for the
/// irregular mappings listed here. No pluralization rule is inferred.
const COLLECTION_OVERRIDES: &[(&str, &str)] = &[("BlogPost", "blogs")];

/// Resolve the collection a shape name maps to
pub fn collection_for(shape_name: &str) -> String {
    COLLECTION_OVERRIDES
        .iter()
        .find(|(name, _)| *name == shape_name)
        .map(|(_, collection)| (*collection).to_string())
        .unwrap_or_else(|| shape_name.to_lowercase())
}

/// Semantic type of a field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Ordered homogeneous sequence
    List { element: Box<FieldType> },
    /// Nested record, validated recursively
    Record { shape: Box<RecordShape> },
}

impl FieldType {
    /// Type name used in failure reports
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::List { .. } => "list",
            FieldType::Record { .. } => "record",
        }
    }

    /// Whether numeric bounds apply to this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }

    pub fn list(element: FieldType) -> Self {
        FieldType::List {
            element: Box::new(element),
        }
    }

    pub fn text_list() -> Self {
        Self::list(FieldType::Text)
    }

    pub fn record(shape: RecordShape) -> Self {
        FieldType::Record {
            shape: Box::new(shape),
        }
    }

    fn json_schema(&self) -> Value {
        match self {
            FieldType::Text => json!({ "type": "string" }),
            FieldType::Integer => json!({ "type": "integer" }),
            FieldType::Float => json!({ "type": "number" }),
            FieldType::Bool => json!({ "type": "boolean" }),
            FieldType::List { element } => json!({
                "type": "array",
                "items": element.json_schema(),
            }),
            FieldType::Record { shape } => shape.object_schema(),
        }
    }
}

/// A single named, typed, optionally-constrained field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether the field must be supplied by the caller
    pub required: bool,
    /// Default for absent optional fields; a `null` default marks the
    /// field as nullable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Inclusive lower bound for numeric fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numeric fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Documentation/UI hint, never enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    /// A field with no default that every caller must supply
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
            minimum: None,
            maximum: None,
            description: None,
        }
    }

    /// A field filled with `default` when absent
    pub fn optional(name: impl Into<String>, field_type: FieldType, default: Value) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default: Some(default),
            minimum: None,
            maximum: None,
            description: None,
        }
    }

    /// An optional field that defaults to `null` and accepts explicit nulls
    pub fn nullable(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::optional(name, field_type, Value::Null)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Nullable fields are exactly those whose declared default is `null`
    pub fn is_nullable(&self) -> bool {
        matches!(self.default, Some(Value::Null))
    }

    /// Render this field as a JSON Schema property
    pub fn json_schema(&self) -> Value {
        let mut schema = self.field_type.json_schema();
        if let Some(minimum) = self.minimum {
            schema["minimum"] = json!(minimum);
        }
        if let Some(maximum) = self.maximum {
            schema["maximum"] = json!(maximum);
        }
        let mut schema = if self.is_nullable() {
            json!({ "anyOf": [schema, { "type": "null" }] })
        } else {
            schema
        };
        if let Some(description) = &self.description {
            schema["description"] = json!(description);
        }
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

/// A named, ordered set of fields describing valid documents in one
/// collection of the document store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordShape {
    pub name: String,
    /// Target collection, derived from the name via [`collection_for`]
    pub collection: String,
    pub fields: Vec<FieldSpec>,
}

impl RecordShape {
    /// Create a shape, rejecting duplicate field names and bounds on
    /// non-numeric fields
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    shape: name,
                    field: field.name.clone(),
                });
            }
            if (field.minimum.is_some() || field.maximum.is_some())
                && !field.field_type.is_numeric()
            {
                return Err(SchemaError::BoundsOnNonNumeric {
                    shape: name,
                    field: field.name.clone(),
                });
            }
        }
        let collection = collection_for(&name);
        Ok(Self {
            name,
            collection,
            fields,
        })
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn object_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), field.json_schema());
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }
        let mut schema = json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    }

    /// Render the shape as a standalone draft-07 JSON Schema, the form the
    /// database browser consumes
    pub fn json_schema(&self) -> Value {
        let mut schema = self.object_schema();
        schema["$schema"] = json!("http://json-schema.org/draft-07/schema#");
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_is_case_folded() {
        assert_eq!(collection_for("User"), "user");
        assert_eq!(collection_for("GalleryItem"), "galleryitem");
    }

    #[test]
    fn test_collection_override_table() {
        assert_eq!(collection_for("BlogPost"), "blogs");
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = RecordShape::new(
            "Sample",
            vec![
                FieldSpec::required("name", FieldType::Text),
                FieldSpec::required("name", FieldType::Integer),
            ],
        );
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateField { ref field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_bounds_on_text_rejected() {
        let result = RecordShape::new(
            "Sample",
            vec![FieldSpec::required("name", FieldType::Text).with_minimum(1.0)],
        );
        assert!(matches!(result, Err(SchemaError::BoundsOnNonNumeric { .. })));
    }

    #[test]
    fn test_field_type_serialization_tag() {
        let value = serde_json::to_value(&FieldType::Text).unwrap();
        assert_eq!(value, json!({ "type": "text" }));

        let value = serde_json::to_value(&FieldType::text_list()).unwrap();
        assert_eq!(
            value,
            json!({ "type": "list", "element": { "type": "text" } })
        );
    }

    #[test]
    fn test_field_spec_serialization_is_flat() {
        let field = FieldSpec::nullable("age", FieldType::Integer)
            .with_minimum(0.0)
            .with_maximum(120.0);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["name"], "age");
        assert_eq!(value["type"], "integer");
        assert_eq!(value["required"], false);
        assert_eq!(value["default"], Value::Null);
        assert_eq!(value["minimum"], 0.0);
    }

    #[test]
    fn test_json_schema_rendering() {
        let shape = RecordShape::new(
            "Sample",
            vec![
                FieldSpec::required("name", FieldType::Text).with_description("Full name"),
                FieldSpec::nullable("age", FieldType::Integer)
                    .with_minimum(0.0)
                    .with_maximum(120.0),
                FieldSpec::optional("active", FieldType::Bool, json!(true)),
            ],
        )
        .unwrap();

        let schema = shape.json_schema();
        assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");
        assert_eq!(schema["title"], "Sample");
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(schema["properties"]["name"]["description"], "Full name");
        assert_eq!(schema["properties"]["active"]["default"], json!(true));

        // nullable integer renders as anyOf with a null branch
        let age = &schema["properties"]["age"];
        assert_eq!(age["anyOf"][0]["type"], "integer");
        assert_eq!(age["anyOf"][0]["minimum"], 0.0);
        assert_eq!(age["anyOf"][1]["type"], "null");
    }
}
