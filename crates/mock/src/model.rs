//! Collections served by the double and their record shapes.

use std::fmt;

use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// A top-level collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// `/users`
    Users,
    /// `/posts`
    Posts,
    /// `/comments`
    Comments,
}

impl Collection {
    /// Every collection, parents first.
    pub const ALL: [Collection; 3] = [Collection::Users, Collection::Posts, Collection::Comments];

    /// Resolves a URL path segment; unknown segments are `404`.
    pub fn from_segment(segment: &str) -> ApiResult<Self> {
        match segment {
            "users" => Ok(Collection::Users),
            "posts" => Ok(Collection::Posts),
            "comments" => Ok(Collection::Comments),
            _ => Err(ApiError::NotFound),
        }
    }

    /// Returns the URL path segment.
    pub fn segment(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Posts => "posts",
            Collection::Comments => "comments",
        }
    }

    /// Returns the parent collection and the field referencing it.
    pub fn parent(self) -> Option<(Collection, &'static str)> {
        match self {
            Collection::Users => None,
            Collection::Posts => Some((Collection::Users, "user_id")),
            Collection::Comments => Some((Collection::Posts, "post_id")),
        }
    }

    /// Returns the child collection nested under this one, if any.
    pub fn child(self) -> Option<Collection> {
        match self {
            Collection::Users => Some(Collection::Posts),
            Collection::Posts => Some(Collection::Comments),
            Collection::Comments => None,
        }
    }

    /// Fields stored for a record, excluding `id`. Other body fields are ignored.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Collection::Users => &["name", "email", "gender", "status"],
            Collection::Posts => &["user_id", "title", "body"],
            Collection::Comments => &["post_id", "name", "email", "body"],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// One entry of a `422` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Offending field.
    pub field: String,
    /// Description of the problem.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Parses a record id from a path segment. Non-numeric or zero ids are `404`.
pub fn parse_id(segment: &str) -> ApiResult<u64> {
    match segment.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::NotFound),
    }
}
