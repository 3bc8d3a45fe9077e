//! Bearer token extractor.
//!
//! Requests without an `Authorization` header are anonymous: reads are
//! allowed, writes fail with `401 Authentication failed`. A header carrying
//! an unknown token fails every route with `401 Invalid token`.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::ResourceStore;

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// No credentials were sent.
    Anonymous,
    /// A valid bearer token was sent.
    Authenticated,
}

impl Caller {
    /// Fails unless the caller presented a valid token.
    pub fn require_authenticated(self) -> ApiResult<()> {
        match self {
            Caller::Authenticated => Ok(()),
            Caller::Anonymous => Err(ApiError::AuthenticationFailed),
        }
    }
}

/// Returns the raw `Authorization` value, or `None` if the header is absent.
fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default())
}

/// Extracts the token from a `Bearer <token>` value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|t| !t.is_empty())
}

impl<S> FromRequestParts<AppState<S>> for Caller
where
    S: ResourceStore + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = authorization(&parts.headers) else {
            return Ok(Caller::Anonymous);
        };

        match bearer_token(value) {
            Some(token) if state.accepts(token) => Ok(Caller::Authenticated),
            _ => Err(ApiError::InvalidToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[test]
    fn test_authorization_absent() {
        assert_eq!(authorization(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer x"));
        assert_eq!(authorization(&headers), Some("Bearer x"));
    }

    #[test]
    fn test_require_authenticated() {
        assert!(Caller::Authenticated.require_authenticated().is_ok());
        assert!(matches!(
            Caller::Anonymous.require_authenticated(),
            Err(ApiError::AuthenticationFailed)
        ));
    }
}
