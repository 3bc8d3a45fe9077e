//! Compiled-validator cache.
//!
//! Validators are keyed by the canonical serialization of their schema
//! document: object keys sorted recursively, no insignificant whitespace. Two
//! documents that differ only in key order share one compiled validator.
//!
//! The cache is read/insert-only and never invalidated. Concurrent misses for
//! the same schema may compile twice; the first inserted validator is kept.

use std::collections::HashMap;
use std::sync::Arc;

use jsonschema::Validator;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;

static GLOBAL: Lazy<SchemaCache> = Lazy::new(SchemaCache::new);

/// A memoization table from canonical schema text to compiled validator.
#[derive(Default)]
pub struct SchemaCache {
    validators: RwLock<HashMap<String, Arc<Validator>>>,
}

impl SchemaCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache.
    pub fn global() -> &'static SchemaCache {
        &GLOBAL
    }

    /// Returns the compiled validator for `schema`, compiling it on a miss.
    ///
    /// Malformed schemas fail with [`SchemaError::Compilation`] and are not cached.
    pub fn get_or_compile(&self, schema: &Value) -> Result<Arc<Validator>, SchemaError> {
        let key = canonical_key(schema);

        if let Some(validator) = self.validators.read().get(&key) {
            return Ok(Arc::clone(validator));
        }

        debug!(schema_bytes = key.len(), "Compiling JSON schema");
        let compiled = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| SchemaError::Compilation {
                message: e.to_string(),
            })?;

        let mut validators = self.validators.write();
        let entry = validators
            .entry(key)
            .or_insert_with(|| Arc::new(compiled));
        Ok(Arc::clone(entry))
    }

    /// Returns `true` if a validator for `schema` is cached.
    pub fn contains(&self, schema: &Value) -> bool {
        self.validators.read().contains_key(&canonical_key(schema))
    }

    /// Returns the number of cached validators.
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    /// Returns `true` if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }
}

impl std::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("len", &self.len())
            .finish()
    }
}

/// Serializes a JSON value with object keys sorted at every level.
pub fn canonical_key(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
