//! End-to-end checks over the builtin shape registry

use jsonschema::JSONSchema;
use pictiv_schemas::{registry, FailureKind, FieldSpec, FieldType, SchemaError};
use serde_json::{json, Value};

/// A minimal valid value for a required field
fn sample_value(field: &FieldSpec) -> Value {
    match &field.field_type {
        FieldType::Text => json!("sample"),
        FieldType::Integer => json!(field.minimum.unwrap_or(0.0) as i64),
        FieldType::Float => json!(field.minimum.unwrap_or(0.0)),
        FieldType::Bool => json!(true),
        FieldType::List { .. } => json!([]),
        FieldType::Record { .. } => json!({}),
    }
}

/// A document supplying every required field of a shape except `skip`
fn required_only(shape_name: &str, skip: Option<&str>) -> Value {
    let shape = registry().get(shape_name).unwrap();
    let mut doc = serde_json::Map::new();
    for field in shape.fields.iter().filter(|f| f.required) {
        if Some(field.name.as_str()) != skip {
            doc.insert(field.name.clone(), sample_value(field));
        }
    }
    Value::Object(doc)
}

#[test]
fn enumeration_returns_exactly_the_declared_set() {
    let shapes = registry().shapes();
    let names: Vec<&str> = shapes.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["User", "Product", "Service", "Booking", "GalleryItem", "Gallery"]
    );

    let counts: Vec<usize> = shapes.iter().map(|s| s.fields.len()).collect();
    assert_eq!(counts, [5, 5, 8, 9, 3, 5]);

    let user = registry().get("User").unwrap();
    assert_eq!(user.field("name").unwrap().field_type, FieldType::Text);
    assert_eq!(user.field("age").unwrap().field_type, FieldType::Integer);
    assert_eq!(user.field("is_active").unwrap().field_type, FieldType::Bool);

    let product = registry().get("Product").unwrap();
    assert_eq!(product.field("price").unwrap().field_type, FieldType::Float);
    assert_eq!(
        product.field("price").unwrap().minimum,
        Some(0.0),
        "price is non-negative"
    );
}

#[test]
fn omitting_any_required_field_is_rejected() {
    for shape in registry().shapes() {
        for field in shape.fields.iter().filter(|f| f.required) {
            let doc = required_only(&shape.name, Some(&field.name));
            let err = registry().validate(&shape.name, &doc).unwrap_err();
            let failures = err.failures();
            assert_eq!(failures.len(), 1, "{}.{}", shape.name, field.name);
            assert_eq!(failures[0].field, field.name);
            assert_eq!(failures[0].kind, FailureKind::MissingRequiredField);
        }
    }
}

#[test]
fn required_only_documents_get_declared_defaults() {
    for shape in registry().shapes() {
        let instance = registry()
            .validate(&shape.name, &required_only(&shape.name, None))
            .unwrap();
        for field in shape.fields.iter().filter(|f| !f.required) {
            assert_eq!(
                instance.get(&field.name),
                field.default.as_ref(),
                "{}.{}",
                shape.name,
                field.name
            );
        }
    }
}

#[test]
fn booking_with_name_and_date_defaults_to_pending() {
    let instance = registry()
        .validate(
            "Booking",
            &json!({ "name": "Alex", "preferred_date": "2024-05-01" }),
        )
        .unwrap();
    assert_eq!(instance["name"], "Alex");
    assert_eq!(instance["preferred_date"], "2024-05-01");
    assert_eq!(instance["status"], "pending");
    assert_eq!(instance["email"], Value::Null);
}

#[test]
fn user_age_150_is_out_of_range() {
    let err = registry()
        .validate(
            "User",
            &json!({ "name": "A", "email": "a@b.c", "address": "Street", "age": 150 }),
        )
        .unwrap_err();
    assert_eq!(
        err.failures()[0].kind,
        FailureKind::OutOfRange {
            minimum: Some(0.0),
            maximum: Some(120.0),
            value: 150.0,
        }
    );
}

#[test]
fn numeric_bounds_are_inclusive() {
    for (age, ok) in [(-1, false), (0, true), (120, true), (121, false)] {
        let mut doc = required_only("User", None);
        doc["age"] = json!(age);
        let result = registry().validate("User", &doc);
        assert_eq!(result.is_ok(), ok, "age {age}");
        if !ok {
            assert!(matches!(
                result.unwrap_err().failures()[0].kind,
                FailureKind::OutOfRange { .. }
            ));
        }
    }

    for (minutes, ok) in [(14, false), (15, true)] {
        let mut doc = required_only("Service", None);
        doc["duration_minutes"] = json!(minutes);
        assert_eq!(
            registry().validate("Service", &doc).is_ok(),
            ok,
            "duration {minutes}"
        );
    }
}

#[test]
fn validated_instances_round_trip() {
    let documents = [
        ("Booking", json!({ "name": "Alex", "preferred_date": "2024-05-01" })),
        (
            "Gallery",
            json!({
                "code": "G-42",
                "client_name": "Priya",
                "items": [{ "url": "one.jpg" }, { "url": "two.jpg", "watermark": false }]
            }),
        ),
        (
            "Service",
            json!({
                "name": "Wedding Classic",
                "category": "wedding",
                "description": "Full-day coverage",
                "duration_minutes": "480"
            }),
        ),
    ];

    for (shape, document) in documents {
        let instance = registry().validate(shape, &document).unwrap();
        let serialized: Value = serde_json::from_str(&serde_json::to_string(&instance).unwrap()).unwrap();
        let revalidated = registry().validate(shape, &serialized).unwrap();
        assert_eq!(instance, revalidated, "{shape}");
    }
}

#[test]
fn gallery_items_are_validated_recursively() {
    let err = registry()
        .validate(
            "Gallery",
            &json!({
                "code": "G-1",
                "client_name": "Priya",
                "items": [{ "url": "ok.jpg" }, { "title": "missing url" }]
            }),
        )
        .unwrap_err();
    assert_eq!(err.failures()[0].field, "items[1].url");
    assert_eq!(err.failures()[0].kind, FailureKind::MissingRequiredField);
}

#[test]
fn unknown_shape_suggests_closest_name() {
    let err = registry().validate("Galery", &json!({})).unwrap_err();
    match err {
        SchemaError::UnknownRecordShape { suggestion, .. } => {
            assert_eq!(suggestion.as_deref(), Some("Gallery"));
        }
        other => panic!("expected UnknownRecordShape, got {other:?}"),
    }
}

#[test]
fn listing_checksum_is_stable() {
    let first = registry().listing();
    let second = registry().listing();
    assert_eq!(first.checksum, second.checksum);
    assert_eq!(first.stats.total_shapes, 6);
}

#[test]
fn rendered_json_schemas_agree_with_the_validator() {
    let user = registry().get("User").unwrap();
    let schema = user.json_schema();
    let compiled = JSONSchema::compile(&schema).expect("User schema compiles");

    let instance = registry()
        .validate("User", &required_only("User", None))
        .unwrap();
    assert!(compiled.is_valid(&instance));

    let mut over_age = instance.clone();
    over_age["age"] = json!(150);
    assert!(!compiled.is_valid(&over_age));
    assert!(registry().validate("User", &over_age).is_err());

    let gallery = registry().get("Gallery").unwrap();
    let schema = gallery.json_schema();
    let compiled = JSONSchema::compile(&schema).expect("Gallery schema compiles");
    let instance = registry()
        .validate(
            "Gallery",
            &json!({ "code": "G-1", "client_name": "Priya", "items": [{ "url": "a.jpg" }] }),
        )
        .unwrap();
    assert!(compiled.is_valid(&instance));
}
