//! Pagination extractor.
//!
//! Reads `page` and `per_page` from the query string and produces the
//! `x-pagination-*` and `link` response headers.

use axum::{
    extract::{FromRequestParts, Query},
    http::{HeaderMap, HeaderName, HeaderValue, request::Parts},
};
use serde::Deserialize;

/// Page size when `per_page` is absent or invalid.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Largest accepted page size.
pub const MAX_PER_PAGE: usize = 100;

/// `x-pagination-total`
pub const X_PAGINATION_TOTAL: HeaderName = HeaderName::from_static("x-pagination-total");
/// `x-pagination-pages`
pub const X_PAGINATION_PAGES: HeaderName = HeaderName::from_static("x-pagination-pages");
/// `x-pagination-page`
pub const X_PAGINATION_PAGE: HeaderName = HeaderName::from_static("x-pagination-page");
/// `x-pagination-limit`
pub const X_PAGINATION_LIMIT: HeaderName = HeaderName::from_static("x-pagination-limit");

/// Axum extractor for pagination parameters.
///
/// `page` is 1-based and at least 1. `per_page` defaults to
/// [`DEFAULT_PER_PAGE`] and is clamped to `1..=MAX_PER_PAGE`. Values that are
/// not numbers fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
}

/// Query parameters for pagination, kept as text for lenient parsing.
#[derive(Debug, Deserialize)]
struct PaginationQuery {
    page: Option<String>,
    per_page: Option<String>,
}

impl Pagination {
    /// Creates a Pagination, clamping both values into range.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Returns the current page (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns the number of records to skip.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Returns the number of pages needed for `total` records.
    pub fn pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    /// Builds the pagination response headers for a listing at `path`.
    pub fn headers(&self, total: usize, path: &str) -> HeaderMap {
        let pages = self.pages(total);
        let mut headers = HeaderMap::new();
        headers.insert(X_PAGINATION_TOTAL, HeaderValue::from(total));
        headers.insert(X_PAGINATION_PAGES, HeaderValue::from(pages));
        headers.insert(X_PAGINATION_PAGE, HeaderValue::from(self.page));
        headers.insert(X_PAGINATION_LIMIT, HeaderValue::from(self.per_page));

        let link = |page: usize, rel: &str| {
            format!("<{}?page={}&per_page={}>; rel=\"{}\"", path, page, self.per_page, rel)
        };
        let mut links = Vec::new();
        if self.page < pages {
            links.push(link(self.page + 1, "next"));
        }
        if self.page > 1 {
            links.push(link(self.page - 1, "prev"));
        }
        links.push(link(1, "first"));
        links.push(link(pages.max(1), "last"));
        if let Ok(value) = HeaderValue::from_str(&links.join(", ")) {
            headers.insert(axum::http::header::LINK, value);
        }

        headers
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn parse_or(value: Option<&str>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map(|Query(q)| q)
            .unwrap_or(PaginationQuery {
                page: None,
                per_page: None,
            });

        Ok(Pagination::new(
            parse_or(query.page.as_deref(), 1),
            parse_or(query.per_page.as_deref(), DEFAULT_PER_PAGE),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 10);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        let pagination = Pagination::new(0, 500);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 100);

        let pagination = Pagination::new(3, 0);
        assert_eq!(pagination.per_page(), 1);
        assert_eq!(pagination.offset(), 2);
    }

    #[test]
    fn test_pages() {
        let pagination = Pagination::new(1, 10);
        assert_eq!(pagination.pages(0), 0);
        assert_eq!(pagination.pages(10), 1);
        assert_eq!(pagination.pages(11), 2);
    }

    #[test]
    fn test_parse_or() {
        assert_eq!(parse_or(Some("4"), 1), 4);
        assert_eq!(parse_or(Some("abc"), 1), 1);
        assert_eq!(parse_or(None, 10), 10);
    }

    #[test]
    fn test_headers() {
        let headers = Pagination::new(2, 10).headers(25, "/public/v2/users");
        assert_eq!(headers[&X_PAGINATION_TOTAL], "25");
        assert_eq!(headers[&X_PAGINATION_PAGES], "3");
        assert_eq!(headers[&X_PAGINATION_PAGE], "2");
        assert_eq!(headers[&X_PAGINATION_LIMIT], "10");

        let link = headers[axum::http::header::LINK].to_str().unwrap();
        assert!(link.contains("page=3&per_page=10>; rel=\"next\""));
        assert!(link.contains("page=1&per_page=10>; rel=\"prev\""));
        assert!(link.contains("rel=\"last\""));
    }

    #[test]
    fn test_headers_last_page_has_no_next() {
        let headers = Pagination::new(3, 10).headers(25, "/users");
        let link = headers[axum::http::header::LINK].to_str().unwrap();
        assert!(!link.contains("rel=\"next\""));
    }
}
