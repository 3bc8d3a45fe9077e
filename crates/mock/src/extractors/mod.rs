//! Axum extractors for the reference service double.
//!
//! - [`Caller`] - Bearer token authentication
//! - [`Pagination`] - `page` and `per_page` query parameters

pub mod auth;
pub mod pagination;

pub use auth::Caller;
pub use pagination::Pagination;
