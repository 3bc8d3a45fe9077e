//! Read handler.
//!
//! `GET [prefix]/{collection}/{id}`

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extractors::Caller;
use crate::model::{Collection, parse_id};
use crate::state::AppState;
use crate::store::ResourceStore;

/// Handler for the read interaction. Reads are allowed without a token.
///
/// # Response
///
/// - `200 OK` - Returns the record
/// - `401 Unauthorized` - Unknown token
/// - `404 Not Found` - No such record
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    _caller: Caller,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    let collection = Collection::from_segment(&collection)?;
    let id = parse_id(&id)?;

    debug!(%collection, id, "Processing read request");

    match state.store().read(collection, id).await? {
        Some(record) => Ok((StatusCode::OK, Json(record)).into_response()),
        None => {
            debug!(%collection, id, "Record not found");
            Err(ApiError::NotFound)
        }
    }
}
