//! Route configuration.

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;
use crate::store::ResourceStore;

/// Creates the collection routes, relative to the API prefix.
///
/// # Routes
///
/// ## Collection-level
/// - `GET /{collection}` - List
/// - `POST /{collection}` - Create
///
/// ## Record-level
/// - `GET /{collection}/{id}` - Read
/// - `PUT /{collection}/{id}` - Update
/// - `PATCH /{collection}/{id}` - Update
/// - `DELETE /{collection}/{id}` - Delete
///
/// ## Nested
/// - `GET /{collection}/{id}/{child}` - List under parent
/// - `POST /{collection}/{id}/{child}` - Create under parent
pub fn create_api_routes<S>(state: AppState<S>) -> Router
where
    S: ResourceStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/{collection}",
            get(handlers::list_handler::<S>).post(handlers::create_handler::<S>),
        )
        .route(
            "/{collection}/{id}",
            get(handlers::read_handler::<S>)
                .put(handlers::update_handler::<S>)
                .patch(handlers::update_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        )
        .route(
            "/{collection}/{id}/{child}",
            get(handlers::list_nested_handler::<S>).post(handlers::create_nested_handler::<S>),
        )
        .with_state(state)
}

/// Creates the full route tree: `/health` plus the API under its prefix.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ResourceStore + Send + Sync + 'static,
{
    let prefix = state.prefix();
    let health = Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .with_state(state.clone());
    let api = create_api_routes(state);

    if prefix.is_empty() {
        health.merge(api)
    } else {
        health.nest(&prefix, api)
    }
}
