//! HTTP request handlers.
//!
//! - [`create`] - Create a record, top-level or under its parent
//! - [`read`] - Read a record by id
//! - [`update`] - Update a record (PUT and PATCH)
//! - [`delete`] - Delete a record and its dependents
//! - [`list`] - List a collection, top-level or under a parent
//! - [`health`] - Health check endpoint

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod read;
pub mod update;

pub use create::{create_handler, create_nested_handler};
pub use delete::delete_handler;
pub use health::health_handler;
pub use list::{list_handler, list_nested_handler};
pub use read::read_handler;
pub use update::update_handler;

use axum::body::Bytes;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::model::Collection;

/// Parses a request body into a field map. An empty body is an empty map.
pub(crate) fn parse_fields(body: &Bytes) -> ApiResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(ApiError::BadRequest {
            message: "Request body must be a JSON object".to_string(),
        }),
        Err(e) => Err(ApiError::BadRequest {
            message: format!("Invalid JSON body: {}", e),
        }),
    }
}

/// Resolves `/{parent}/{id}/{child}` and checks the child really nests there.
pub(crate) fn nested(parent: &str, child: &str) -> ApiResult<(Collection, Collection)> {
    let parent = Collection::from_segment(parent)?;
    let child = Collection::from_segment(child)?;
    if parent.child() == Some(child) {
        Ok((parent, child))
    } else {
        Err(ApiError::NotFound)
    }
}
