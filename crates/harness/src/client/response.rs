//! Raw HTTP responses returned by the resource client.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::resources::ResourceId;

/// Header carrying the total number of matching records.
pub const X_PAGINATION_TOTAL: &str = "x-pagination-total";
/// Header carrying the number of pages.
pub const X_PAGINATION_PAGES: &str = "x-pagination-pages";
/// Header carrying the current page number.
pub const X_PAGINATION_PAGE: &str = "x-pagination-page";
/// Header carrying the page size.
pub const X_PAGINATION_LIMIT: &str = "x-pagination-limit";

/// A single entry of an error response body.
///
/// Validation failures carry the offending `field`; authentication and
/// not-found errors only carry a `message`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorEntry {
    /// The offending field, if the error is tied to one.
    #[serde(default)]
    pub field: Option<String>,
    /// Human-readable description.
    pub message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Many(Vec<ErrorEntry>),
    One(ErrorEntry),
}

/// Pagination metadata read from `x-pagination-*` response headers.
///
/// Fields are `None` when the header is absent or not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Total number of records across all pages.
    pub total: Option<u64>,
    /// Number of pages.
    pub pages: Option<u64>,
    /// Current page (1-based).
    pub page: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

/// An HTTP response: status, headers, and the raw body.
///
/// The client never interprets the status; assertions belong to the caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the HTTP status as a number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns all response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns true if the body is empty (e.g. `204 No Content`).
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the body's `id` field when it is a positive integer.
    pub fn resource_id(&self) -> Option<ResourceId> {
        let body: Value = self.json().ok()?;
        body.get("id").and_then(ResourceId::from_json)
    }

    /// Decodes an error body, accepting both a single object and an array.
    pub fn error_entries(&self) -> Result<Vec<ErrorEntry>, serde_json::Error> {
        Ok(match self.json::<ErrorBody>()? {
            ErrorBody::Many(entries) => entries,
            ErrorBody::One(entry) => vec![entry],
        })
    }

    /// Returns true if an error entry names `field`.
    pub fn has_field_error(&self, field: &str) -> bool {
        self.error_entries()
            .map(|entries| entries.iter().any(|e| e.field.as_deref() == Some(field)))
            .unwrap_or(false)
    }

    /// Reads the pagination headers.
    pub fn pagination(&self) -> Pagination {
        let number = |name: &str| self.header(name).and_then(|v| v.trim().parse().ok());
        Pagination {
            total: number(X_PAGINATION_TOTAL),
            pages: number(X_PAGINATION_PAGES),
            page: number(X_PAGINATION_PAGE),
            limit: number(X_PAGINATION_LIMIT),
        }
    }
}
