//! Pictiv Schema Registry
//!
//! Declarative record shapes for the collections of the Pictiv Studio
//! document store. Each shape declares the field names, types, constraints,
//! and defaults of one collection; the studio's database browser reads the
//! enumeration payload from its schema endpoint to render CRUD forms and
//! drive document validation. All storage and network behavior lives in
//! that external tool; this crate only declares and checks.
//!
//! ## Features
//!
//! - **Builtin shapes**: User, Product, Service, Booking, GalleryItem,
//!   Gallery, declared once at load time and immutable thereafter
//! - **Pure validation**: required fields, defaults, nullability, numeric
//!   bounds, recursive nested records, with every failure reported at once
//! - **Enumeration payload**: format version, timestamp, and checksum over
//!   the full shape set
//! - **JSON Schema rendering**: draft-07 output for external tools
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//!
//! let registry = pictiv_schemas::registry();
//! let booking = registry
//!     .validate("Booking", &json!({ "name": "Alex", "preferred_date": "2024-05-01" }))
//!     .unwrap();
//! assert_eq!(booking["status"], "pending");
//! ```

pub mod checksum;
pub mod config;
pub mod error;
pub mod registry;
pub mod schema;
pub mod shapes;
pub mod validate;

pub use checksum::Checksum;
pub use config::{ExportConfig, OutputFormat, SchemaConfig, ValidationConfig};
pub use error::{FailureKind, FieldFailure, Result, SchemaError};
pub use registry::{format_version, registry, ListingStats, ShapeListing, ShapeRegistry};
pub use schema::{collection_for, FieldSpec, FieldType, RecordShape};
pub use shapes::builtin_shapes;
pub use validate::validate_record;
