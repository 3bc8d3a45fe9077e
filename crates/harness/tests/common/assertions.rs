//! Assertions shared by the end-to-end tests.

use apicheck_harness::schema::{self, documents};
use apicheck_harness::{ApiResponse, ResourceKind};
use http::StatusCode;
use serde_json::Value;

/// Asserts the response status, printing the body on mismatch.
pub fn assert_status(response: &ApiResponse, expected: StatusCode) {
    assert_eq!(
        response.status(),
        expected,
        "unexpected status; body: {}",
        response.text()
    );
}

/// Asserts the body is a valid record of `kind` and returns it.
pub fn assert_record(response: &ApiResponse, kind: ResourceKind) -> Value {
    let body: Value = response.json().expect("response body is JSON");
    let result = schema::validate(documents::record_schema(kind), &body)
        .expect("bundled schema compiles");
    assert!(result.valid, "{} record invalid: {}", kind, result.describe());
    body
}

/// Asserts the body is a valid error body and names `field`.
pub fn assert_field_error(response: &ApiResponse, field: &str) {
    let body: Value = response.json().expect("response body is JSON");
    let result =
        schema::validate(documents::error_schema(), &body).expect("bundled schema compiles");
    assert!(result.valid, "error body invalid: {}", result.describe());
    assert!(
        response.has_field_error(field),
        "no error for field '{}' in {}",
        field,
        body
    );
}
