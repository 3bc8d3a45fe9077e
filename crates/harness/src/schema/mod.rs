//! JSON Schema validation.
//!
//! [`validate`] checks a JSON value against a schema document and returns a
//! [`ValidationResult`]. Failing validation is data, not an error: only a
//! malformed schema produces an `Err`.
//!
//! ```
//! use apicheck_harness::schema;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["email"],
//!     "properties": {"email": {"type": "string", "format": "email"}}
//! });
//!
//! let result = schema::validate(&schema, &json!({"email": "a@example.com"}))?;
//! assert!(result.valid);
//!
//! let result = schema::validate(&schema, &json!({}))?;
//! assert!(!result.valid);
//! assert_eq!(result.errors[0].field, "email");
//! # Ok::<(), apicheck_harness::SchemaError>(())
//! ```

pub mod cache;
pub mod documents;

pub use cache::{SchemaCache, canonical_key};

use jsonschema::error::ValidationErrorKind;
use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaError;

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path of the offending field, `/`-separated, empty for the document root.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` iff the data satisfies every constraint.
    pub valid: bool,
    /// Ordered violations; empty when `valid`.
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Returns `true` if any violation is reported for `field`.
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Renders the violations as a compact JSON string for assertion messages.
    pub fn describe(&self) -> String {
        serde_json::to_string(&self.errors).unwrap_or_default()
    }
}

/// Validates `data` against `schema` using the process-wide cache.
pub fn validate(schema: &Value, data: &Value) -> Result<ValidationResult, SchemaError> {
    validate_with(SchemaCache::global(), schema, data)
}

/// Validates `data` against `schema` using the given cache.
pub fn validate_with(
    cache: &SchemaCache,
    schema: &Value,
    data: &Value,
) -> Result<ValidationResult, SchemaError> {
    let validator = cache.get_or_compile(schema)?;

    let errors: Vec<FieldError> = validator
        .iter_errors(data)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let field = match &error.kind {
                ValidationErrorKind::Required { property } => {
                    let name = property
                        .as_str()
                        .map(String::from)
                        .unwrap_or_else(|| property.to_string());
                    join_field(&pointer, &name)
                }
                _ => pointer.trim_start_matches('/').to_string(),
            };
            FieldError {
                field,
                message: error.to_string(),
            }
        })
        .collect();

    Ok(ValidationResult {
        valid: errors.is_empty(),
        errors,
    })
}

fn join_field(pointer: &str, name: &str) -> String {
    let parent = pointer.trim_start_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
