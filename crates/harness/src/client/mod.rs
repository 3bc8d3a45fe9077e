//! Resource client.
//!
//! A thin, typed wrapper over `reqwest` that issues one authenticated request
//! per call and hands back the raw [`ApiResponse`]. It never asserts on the
//! status and never retries.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | create user | POST | `/users` |
//! | create post | POST | `/posts` (`user_id` in the body) |
//! | create comment | POST | `/posts/{post_id}/comments` |
//! | read | GET | `/{collection}/{id}` |
//! | update | PUT | `/{collection}/{id}` |
//! | delete | DELETE | `/{collection}/{id}` |
//! | list | GET | `/{collection}`, `/users/{id}/posts`, `/posts/{id}/comments` |

pub mod response;

use std::sync::Arc;

use http::Method;
use serde::Serialize;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::{FactoryError, HarnessError, HarnessResult};
use crate::resources::{Payload, ResourceId, ResourceKind};

pub use response::{ApiResponse, ErrorEntry, Pagination};

/// Query parameters for list requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    /// Page number (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListQuery {
    /// Requests a specific page.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }

    /// Sets the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}

/// Authenticated client for the user, post, and comment collections.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    config: Arc<HarnessConfig>,
    base_url: String,
}

impl ResourceClient {
    /// Builds a client from a validated configuration.
    ///
    /// Fails with [`ConfigError`](crate::ConfigError) when the token is absent
    /// or unusable, before any network traffic.
    pub fn new(config: &HarnessConfig) -> HarnessResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .default_headers(config.headers()?)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config: Arc::new(config.clone()),
        })
    }

    /// Returns a client that authenticates with a different token.
    pub fn with_token(&self, token: impl Into<String>) -> HarnessResult<Self> {
        Self::new(&self.config.with_token(token))
    }

    /// Returns the configuration this client was built from.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Generic operations
    // ========================================================================

    /// Creates a resource of `kind`.
    ///
    /// Comments are posted to their parent post, whose id is read from the
    /// payload's `post_id` field.
    pub async fn create(&self, kind: ResourceKind, payload: &Payload) -> HarnessResult<ApiResponse> {
        let path = match kind {
            ResourceKind::Comment => {
                let post_id = payload
                    .get("post_id")
                    .and_then(ResourceId::from_json)
                    .ok_or(FactoryError::MissingDependency {
                        kind,
                        parent: ResourceKind::Post,
                    })?;
                nested_path(ResourceKind::Post, post_id, kind)
            }
            _ => kind.collection().to_string(),
        };
        self.send(Method::POST, &path, Some(payload), None).await
    }

    /// Replaces fields of an existing resource.
    pub async fn update(
        &self,
        kind: ResourceKind,
        id: ResourceId,
        payload: &Payload,
    ) -> HarnessResult<ApiResponse> {
        self.send(Method::PUT, &item_path(kind, id), Some(payload), None)
            .await
    }

    /// Deletes a resource.
    pub async fn delete(&self, kind: ResourceKind, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.send(Method::DELETE, &item_path(kind, id), None, None)
            .await
    }

    /// Reads a resource by id.
    pub async fn get_by_id(&self, kind: ResourceKind, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.send(Method::GET, &item_path(kind, id), None, None).await
    }

    /// Lists resources of `kind`, optionally scoped to a parent.
    ///
    /// The parent is ignored for users.
    pub async fn list(
        &self,
        kind: ResourceKind,
        parent: Option<ResourceId>,
        query: &ListQuery,
    ) -> HarnessResult<ApiResponse> {
        let path = match (kind.parent(), parent) {
            (Some(parent_kind), Some(parent_id)) => nested_path(parent_kind, parent_id, kind),
            _ => kind.collection().to_string(),
        };
        self.send(Method::GET, &path, None, Some(query)).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// `POST /users`
    pub async fn create_user(&self, payload: &Payload) -> HarnessResult<ApiResponse> {
        self.create(ResourceKind::User, payload).await
    }

    /// `PUT /users/{id}`
    pub async fn update_user(&self, id: ResourceId, payload: &Payload) -> HarnessResult<ApiResponse> {
        self.update(ResourceKind::User, id, payload).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete_user(&self, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.delete(ResourceKind::User, id).await
    }

    /// `GET /users/{id}`
    pub async fn get_user_by_id(&self, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.get_by_id(ResourceKind::User, id).await
    }

    /// `GET /users`
    pub async fn get_user_list(&self, query: &ListQuery) -> HarnessResult<ApiResponse> {
        self.list(ResourceKind::User, None, query).await
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// `POST /posts`
    pub async fn create_post(&self, payload: &Payload) -> HarnessResult<ApiResponse> {
        self.create(ResourceKind::Post, payload).await
    }

    /// `PUT /posts/{id}`
    pub async fn update_post(&self, id: ResourceId, payload: &Payload) -> HarnessResult<ApiResponse> {
        self.update(ResourceKind::Post, id, payload).await
    }

    /// `DELETE /posts/{id}`
    pub async fn delete_post(&self, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.delete(ResourceKind::Post, id).await
    }

    /// `GET /posts/{id}`
    pub async fn get_post_by_id(&self, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.get_by_id(ResourceKind::Post, id).await
    }

    /// `GET /posts`, or `GET /users/{id}/posts` when a user is given.
    pub async fn get_post_list(
        &self,
        user_id: Option<ResourceId>,
        query: &ListQuery,
    ) -> HarnessResult<ApiResponse> {
        self.list(ResourceKind::Post, user_id, query).await
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// `POST /posts/{post_id}/comments`
    ///
    /// `post_id` is written into the body unless the payload already has one.
    pub async fn create_comment(
        &self,
        post_id: ResourceId,
        payload: &Payload,
    ) -> HarnessResult<ApiResponse> {
        let body = Payload::new().with("post_id", post_id).merge(payload);
        self.send(
            Method::POST,
            &nested_path(ResourceKind::Post, post_id, ResourceKind::Comment),
            Some(&body),
            None,
        )
        .await
    }

    /// `PUT /comments/{id}`
    pub async fn update_comment(
        &self,
        id: ResourceId,
        payload: &Payload,
    ) -> HarnessResult<ApiResponse> {
        self.update(ResourceKind::Comment, id, payload).await
    }

    /// `DELETE /comments/{id}`
    pub async fn delete_comment(&self, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.delete(ResourceKind::Comment, id).await
    }

    /// `GET /comments/{id}`
    pub async fn get_comment_by_id(&self, id: ResourceId) -> HarnessResult<ApiResponse> {
        self.get_by_id(ResourceKind::Comment, id).await
    }

    /// `GET /comments`, or `GET /posts/{id}/comments` when a post is given.
    pub async fn get_comment_list(
        &self,
        post_id: Option<ResourceId>,
        query: &ListQuery,
    ) -> HarnessResult<ApiResponse> {
        self.list(ResourceKind::Comment, post_id, query).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Payload>,
        query: Option<&ListQuery>,
    ) -> HarnessResult<ApiResponse> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            debug!(%method, %url, error = %e, "Request failed");
            HarnessError::Transport(e)
        })?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        debug!(%method, %url, status = status.as_u16(), "Request completed");
        Ok(ApiResponse::new(status, headers, bytes))
    }
}

fn item_path(kind: ResourceKind, id: ResourceId) -> String {
    format!("{}/{}", kind.collection(), id)
}

fn nested_path(parent: ResourceKind, parent_id: ResourceId, kind: ResourceKind) -> String {
    format!("{}/{}/{}", parent.collection(), parent_id, kind.collection())
}
