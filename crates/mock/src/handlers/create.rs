//! Create handlers.
//!
//! `POST [prefix]/{collection}` and `POST [prefix]/{parent}/{id}/{child}`

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

use super::{nested, parse_fields};
use crate::error::ApiResult;
use crate::extractors::Caller;
use crate::model::{Collection, parse_id};
use crate::state::AppState;
use crate::store::ResourceStore;

/// Handler for top-level creates.
///
/// # Response
///
/// - `201 Created` - Returns the stored record with its id
/// - `401 Unauthorized` - No token, or an unknown token
/// - `404 Not Found` - Unknown collection
/// - `422 Unprocessable Entity` - Field validation failed
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    caller: Caller,
    Path(collection): Path<String>,
    body: Bytes,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    caller.require_authenticated()?;
    let collection = Collection::from_segment(&collection)?;
    let fields = parse_fields(&body)?;

    debug!(%collection, "Processing create request");
    store_new(&state, collection, fields).await
}

/// Handler for creates under a parent, e.g. `POST /posts/{id}/comments`.
///
/// The parent id from the path overrides any reference field in the body.
pub async fn create_nested_handler<S>(
    State(state): State<AppState<S>>,
    caller: Caller,
    Path((parent, id, child)): Path<(String, String, String)>,
    body: Bytes,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    caller.require_authenticated()?;
    let (_, child) = nested(&parent, &child)?;
    let mut fields = parse_fields(&body)?;

    // An invalid parent id is left to validation ("must exist") rather than 404
    if let Some((_, field)) = child.parent() {
        let reference = parse_id(&id).map(Value::from).unwrap_or(Value::Null);
        fields.insert(field.to_string(), reference);
    }

    debug!(collection = %child, parent_id = %id, "Processing nested create request");
    store_new(&state, child, fields).await
}

async fn store_new<S>(
    state: &AppState<S>,
    collection: Collection,
    fields: serde_json::Map<String, Value>,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    let record = state.store().create(collection, fields).await?;

    let mut response = (StatusCode::CREATED, Json(&record)).into_response();
    if let Some(id) = record.get("id").and_then(Value::as_u64) {
        let location = format!("{}/{}/{}", state.prefix(), collection, id);
        if let Ok(value) = HeaderValue::from_str(&location) {
            response.headers_mut().insert(header::LOCATION, value);
        }
        debug!(%collection, id, "Created record");
    }

    Ok(response)
}
