//! Shape Registry
//!
//! The process-wide, load-once mapping from shape name to record shape.
//! Built at startup from the builtin declarations and immutable thereafter;
//! validation may run from any number of threads without coordination.

use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use once_cell::sync::Lazy;
use semver::Version;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::checksum::Checksum;
use crate::config::ValidationConfig;
use crate::error::{Result, SchemaError};
use crate::schema::RecordShape;
use crate::shapes::builtin_shapes;
use crate::validate::validate_record;

/// Version of the listing payload format, tracked by the crate version
pub fn format_version() -> Version {
    static VERSION: Lazy<Version> = Lazy::new(|| {
        Version::parse(env!("CARGO_PKG_VERSION")).expect("crate version is valid semver")
    });
    VERSION.clone()
}

/// The process-wide registry over the builtin shapes
pub fn registry() -> &'static ShapeRegistry {
    static REGISTRY: Lazy<ShapeRegistry> =
        Lazy::new(|| ShapeRegistry::builtin().expect("builtin shapes are well formed"));
    &REGISTRY
}

/// An immutable set of declared record shapes
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    shapes: Vec<RecordShape>,
    validation: ValidationConfig,
}

impl ShapeRegistry {
    /// Create a registry, rejecting duplicate shape names
    pub fn new(shapes: Vec<RecordShape>) -> Result<Self> {
        let mut seen = HashSet::new();
        for shape in &shapes {
            if !seen.insert(shape.name.as_str()) {
                return Err(SchemaError::DuplicateShape {
                    name: shape.name.clone(),
                });
            }
        }
        debug!(shapes = shapes.len(), "shape registry constructed");
        Ok(Self {
            shapes,
            validation: ValidationConfig::default(),
        })
    }

    /// Registry over the builtin shape declarations
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_shapes()?)
    }

    /// Replace the validation settings
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// All declared shapes, in declaration order
    pub fn shapes(&self) -> &[RecordShape] {
        &self.shapes
    }

    /// Look up a shape by name (case-sensitive)
    pub fn get(&self, name: &str) -> Option<&RecordShape> {
        self.shapes.iter().find(|s| s.name == name)
    }

    /// Validate a candidate document against a named shape.
    ///
    /// Returns the normalized instance, [`SchemaError::Rejected`] with the
    /// per-field failures, or [`SchemaError::UnknownRecordShape`] with the
    /// closest declared name when the shape does not exist.
    pub fn validate(&self, shape_name: &str, document: &Value) -> Result<Value> {
        let shape = self
            .get(shape_name)
            .ok_or_else(|| SchemaError::UnknownRecordShape {
                name: shape_name.to_string(),
                suggestion: self.closest_name(shape_name),
            })?;
        validate_record(shape, document, &self.validation)
    }

    /// Fingerprint of the declared shape set
    pub fn fingerprint(&self) -> Checksum {
        Checksum::from_serialize(&self.shapes)
    }

    /// Build the enumeration payload for external consumption.
    ///
    /// This never fails and has no side effects; the database browser
    /// serves it from its schema endpoint.
    pub fn listing(&self) -> ShapeListing {
        let stats = ListingStats {
            total_shapes: self.shapes.len(),
            total_fields: self.shapes.iter().map(|s| s.fields.len()).sum(),
        };
        ShapeListing {
            format_version: format_version(),
            generated_at: Utc::now(),
            checksum: self.fingerprint(),
            stats,
            shapes: self.shapes.clone(),
        }
    }

    fn closest_name(&self, query: &str) -> Option<String> {
        let matcher = SkimMatcherV2::default();
        self.shapes
            .iter()
            .filter_map(|shape| {
                matcher
                    .fuzzy_match(&shape.name, query)
                    .map(|score| (score, &shape.name))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, name)| name.clone())
    }
}

/// The enumeration payload: every declared shape plus integrity metadata
#[derive(Debug, Clone, Serialize)]
pub struct ShapeListing {
    /// Payload format version (the crate version)
    pub format_version: Version,
    /// When this listing was generated
    pub generated_at: DateTime<Utc>,
    /// Fingerprint of the shape set, stable across calls
    pub checksum: Checksum,
    /// Statistics
    pub stats: ListingStats,
    /// All declared shapes
    pub shapes: Vec<RecordShape>,
}

/// Statistics about a shape listing
#[derive(Debug, Clone, Serialize)]
pub struct ListingStats {
    pub total_shapes: usize,
    pub total_fields: usize,
}
