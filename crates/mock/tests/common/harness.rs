//! Test server construction.

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::Value;

use apicheck_mock::{InMemoryStore, MockConfig, create_app};

use super::fixtures;

/// Token accepted by [`test_server`].
pub const TOKEN: &str = "test-token";

/// API prefix used by [`test_server`].
pub const PREFIX: &str = "/public/v2";

/// `Authorization` header name.
pub const AUTHORIZATION: HeaderName = header::AUTHORIZATION;

/// Returns the `Authorization` value for [`TOKEN`].
pub fn bearer() -> HeaderValue {
    HeaderValue::from_static("Bearer test-token")
}

/// Returns a prefixed API path.
pub fn path(rest: &str) -> String {
    format!("{}{}", PREFIX, rest)
}

/// Creates a test server over an empty store.
pub fn test_server() -> TestServer {
    let app = create_app(InMemoryStore::new(), MockConfig::for_testing());
    TestServer::new(app).expect("Failed to create test server")
}

/// Creates a user and returns its id.
pub async fn seed_user(server: &TestServer) -> u64 {
    seed(server, "/users", fixtures::user()).await
}

/// Creates a post for `user_id` and returns its id.
pub async fn seed_post(server: &TestServer, user_id: u64) -> u64 {
    seed(server, "/posts", fixtures::post(user_id)).await
}

/// Creates a comment under `post_id` and returns its id.
pub async fn seed_comment(server: &TestServer, post_id: u64) -> u64 {
    seed(server, &format!("/posts/{}/comments", post_id), fixtures::comment()).await
}

async fn seed(server: &TestServer, rest: &str, body: Value) -> u64 {
    let response = server
        .post(&path(rest))
        .add_header(AUTHORIZATION, bearer())
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_u64()
        .expect("created record has an id")
}
