//! Delete handler.
//!
//! `DELETE [prefix]/{collection}/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::ApiResult;
use crate::extractors::Caller;
use crate::model::{Collection, parse_id};
use crate::state::AppState;
use crate::store::ResourceStore;

/// Handler for the delete interaction.
///
/// Deleting a user also deletes its posts and their comments; deleting a
/// post also deletes its comments.
///
/// # Response
///
/// - `204 No Content` - Record deleted, empty body
/// - `401 Unauthorized` - No token, or an unknown token
/// - `404 Not Found` - No such record (including one already deleted)
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    caller: Caller,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    caller.require_authenticated()?;
    let collection = Collection::from_segment(&collection)?;
    let id = parse_id(&id)?;

    let removed = state.store().delete(collection, id).await?;
    debug!(%collection, id, removed, "Processed delete request");

    Ok(StatusCode::NO_CONTENT.into_response())
}
