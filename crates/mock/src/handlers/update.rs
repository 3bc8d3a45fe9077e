//! Update handler.
//!
//! `PUT [prefix]/{collection}/{id}` and `PATCH [prefix]/{collection}/{id}`
//! share one handler: both merge the provided fields into the record.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::parse_fields;
use crate::error::ApiResult;
use crate::extractors::Caller;
use crate::model::{Collection, parse_id};
use crate::state::AppState;
use crate::store::ResourceStore;

/// Handler for the update interaction.
///
/// # Response
///
/// - `200 OK` - Returns the updated record
/// - `401 Unauthorized` - No token, or an unknown token
/// - `404 Not Found` - No such record
/// - `422 Unprocessable Entity` - A provided field is invalid
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    caller: Caller,
    Path((collection, id)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    caller.require_authenticated()?;
    let collection = Collection::from_segment(&collection)?;
    let id = parse_id(&id)?;
    let fields = parse_fields(&body)?;

    debug!(%collection, id, fields = fields.len(), "Processing update request");

    let record = state.store().update(collection, id, fields).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}
