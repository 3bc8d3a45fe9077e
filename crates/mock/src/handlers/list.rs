//! List handlers.
//!
//! `GET [prefix]/{collection}` and `GET [prefix]/{parent}/{id}/{child}`

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::nested;
use crate::error::ApiResult;
use crate::extractors::{Caller, Pagination};
use crate::model::{Collection, parse_id};
use crate::state::AppState;
use crate::store::ResourceStore;

/// Handler for collection listings.
///
/// Returns a JSON array, newest first, with `x-pagination-*` and `link`
/// headers.
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    _caller: Caller,
    Path(collection): Path<String>,
    OriginalUri(uri): OriginalUri,
    pagination: Pagination,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    let collection = Collection::from_segment(&collection)?;
    list_page(&state, collection, None, uri.path(), pagination).await
}

/// Handler for listings under a parent, e.g. `GET /users/{id}/posts`.
///
/// An unknown parent yields an empty page.
pub async fn list_nested_handler<S>(
    State(state): State<AppState<S>>,
    _caller: Caller,
    Path((parent, id, child)): Path<(String, String, String)>,
    OriginalUri(uri): OriginalUri,
    pagination: Pagination,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    let (_, child) = nested(&parent, &child)?;
    let parent_id = parse_id(&id)?;
    list_page(&state, child, Some(parent_id), uri.path(), pagination).await
}

async fn list_page<S>(
    state: &AppState<S>,
    collection: Collection,
    parent: Option<u64>,
    path: &str,
    pagination: Pagination,
) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    debug!(
        %collection,
        ?parent,
        page = pagination.page(),
        per_page = pagination.per_page(),
        "Processing list request"
    );

    let page = state
        .store()
        .list(collection, parent, pagination.offset(), pagination.per_page())
        .await?;

    Ok((
        StatusCode::OK,
        pagination.headers(page.total, path),
        Json(page.items),
    )
        .into_response())
}
