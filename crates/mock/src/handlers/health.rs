//! Health check endpoint handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiResult;
use crate::model::Collection;
use crate::state::AppState;
use crate::store::ResourceStore;

/// Handler for the health check endpoint.
///
/// `GET /health` returns the store name and per-collection record counts.
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> ApiResult<Response>
where
    S: ResourceStore + Send + Sync,
{
    debug!("Processing health check request");

    let mut counts = Map::new();
    for collection in Collection::ALL {
        let count = state.store().count(collection).await?;
        counts.insert(collection.segment().to_string(), Value::from(count));
    }

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.store().backend_name(),
        "records": counts,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}
