//! Builtin record shape declarations
//!
//! One declaration per collection of the studio's document store. The
//! database browser reads these to render CRUD forms and to validate
//! documents on create/edit; nothing here talks to the store itself.

use serde_json::json;

use crate::error::Result;
use crate::schema::{FieldSpec, FieldType, RecordShape};

/// All declared shapes, in enumeration order
pub fn builtin_shapes() -> Result<Vec<RecordShape>> {
    Ok(vec![
        user()?,
        product()?,
        service()?,
        booking()?,
        gallery_item()?,
        gallery()?,
    ])
}

/// Site users (`user` collection)
fn user() -> Result<RecordShape> {
    RecordShape::new(
        "User",
        vec![
            FieldSpec::required("name", FieldType::Text).with_description("Full name"),
            FieldSpec::required("email", FieldType::Text).with_description("Email address"),
            FieldSpec::required("address", FieldType::Text).with_description("Address"),
            FieldSpec::nullable("age", FieldType::Integer)
                .with_minimum(0.0)
                .with_maximum(120.0)
                .with_description("Age in years"),
            FieldSpec::optional("is_active", FieldType::Bool, json!(true))
                .with_description("Whether user is active"),
        ],
    )
}

/// Store products (`product` collection)
fn product() -> Result<RecordShape> {
    RecordShape::new(
        "Product",
        vec![
            FieldSpec::required("title", FieldType::Text).with_description("Product title"),
            FieldSpec::nullable("description", FieldType::Text)
                .with_description("Product description"),
            FieldSpec::required("price", FieldType::Float)
                .with_minimum(0.0)
                .with_description("Price in dollars"),
            FieldSpec::required("category", FieldType::Text).with_description("Product category"),
            FieldSpec::optional("in_stock", FieldType::Bool, json!(true))
                .with_description("Whether product is in stock"),
        ],
    )
}

/// Services offered by the studio (`service` collection)
fn service() -> Result<RecordShape> {
    RecordShape::new(
        "Service",
        vec![
            FieldSpec::required("name", FieldType::Text),
            FieldSpec::required("category", FieldType::Text)
                .with_description("wedding | pre-wedding | maternity | portrait | event | custom"),
            FieldSpec::required("description", FieldType::Text),
            FieldSpec::optional("deliverables", FieldType::text_list(), json!([])),
            FieldSpec::nullable("duration_minutes", FieldType::Integer)
                .with_minimum(15.0)
                .with_description("Expected duration in minutes"),
            FieldSpec::nullable("price", FieldType::Float)
                .with_minimum(0.0)
                .with_description("Base price if applicable"),
            FieldSpec::optional("addons", FieldType::text_list(), json!([])),
            FieldSpec::optional("is_active", FieldType::Bool, json!(true)),
        ],
    )
}

/// Client booking requests (`booking` collection)
fn booking() -> Result<RecordShape> {
    RecordShape::new(
        "Booking",
        vec![
            FieldSpec::required("name", FieldType::Text),
            FieldSpec::nullable("email", FieldType::Text),
            FieldSpec::nullable("phone", FieldType::Text),
            FieldSpec::nullable("service_name", FieldType::Text)
                .with_description("Selected service name"),
            FieldSpec::required("preferred_date", FieldType::Text).with_description("YYYY-MM-DD"),
            FieldSpec::nullable("preferred_time", FieldType::Text).with_description("HH:MM"),
            FieldSpec::nullable("location", FieldType::Text),
            FieldSpec::nullable("notes", FieldType::Text),
            FieldSpec::optional("status", FieldType::Text, json!("pending"))
                .with_description("pending | confirmed | cancelled"),
        ],
    )
}

/// A single image inside a gallery, also embedded in [`gallery`]
fn gallery_item() -> Result<RecordShape> {
    RecordShape::new(
        "GalleryItem",
        vec![
            FieldSpec::required("url", FieldType::Text),
            FieldSpec::nullable("title", FieldType::Text),
            FieldSpec::optional("watermark", FieldType::Bool, json!(true)),
        ],
    )
}

/// Private client galleries (`gallery` collection)
fn gallery() -> Result<RecordShape> {
    let item = gallery_item()?;
    RecordShape::new(
        "Gallery",
        vec![
            FieldSpec::required("code", FieldType::Text)
                .with_description("Shareable access code"),
            FieldSpec::required("client_name", FieldType::Text),
            FieldSpec::nullable("package", FieldType::Text),
            FieldSpec::optional("allow_download", FieldType::Bool, json!(false)),
            FieldSpec::optional("items", FieldType::list(FieldType::record(item)), json!([])),
        ],
    )
}
