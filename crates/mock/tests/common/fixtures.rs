//! Record bodies for seeding the double.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// Returns a unique email address for this test process.
pub fn unique_email(prefix: &str) -> String {
    let n = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}{}@example.com", prefix, n)
}

/// A valid user body.
pub fn user() -> Value {
    json!({
        "name": "Test User",
        "email": unique_email("user"),
        "gender": "female",
        "status": "active"
    })
}

/// A valid post body for `user_id`.
pub fn post(user_id: u64) -> Value {
    json!({
        "user_id": user_id,
        "title": "A title",
        "body": "Some body text."
    })
}

/// A valid comment body, without `post_id`.
pub fn comment() -> Value {
    json!({
        "name": "Commenter",
        "email": unique_email("commenter"),
        "body": "Nice post."
    })
}
