//! Field validation for incoming records.
//!
//! Creates check every field; updates check only the fields present in the
//! body. Violations are reported in field order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::model::{Collection, FieldViolation};

const BLANK: &str = "can't be blank";
const INVALID: &str = "is invalid";
const TAKEN: &str = "has already been taken";
const MUST_EXIST: &str = "must exist";
const GENDER: &str = "can't be blank, can be male of female";

// Constant pattern; compiled by `test_email_pattern_compiles`.
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Lookups validation needs from the store.
pub trait Relations {
    /// Returns true if `collection` holds a record with `id`.
    fn exists(&self, collection: Collection, id: u64) -> bool;

    /// Returns true if another record of `collection` already uses `email`.
    fn email_taken(&self, collection: Collection, email: &str, except: Option<u64>) -> bool;
}

/// Whether a body creates a record or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every field is required.
    Create,
    /// Only present fields are checked; `id` is the record being updated.
    Update {
        /// The record being updated.
        id: u64,
    },
}

/// Reads a record id from a number or a numeric string.
pub fn as_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn as_text(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Returns true if `email` looks like an address.
pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Checks `fields` for `collection` and returns every violation found.
pub fn check(
    collection: Collection,
    fields: &Map<String, Value>,
    mode: Mode,
    relations: &dyn Relations,
) -> Vec<FieldViolation> {
    let except = match mode {
        Mode::Create => None,
        Mode::Update { id } => Some(id),
    };
    let mut violations = Vec::new();

    for &field in collection.fields() {
        let value = fields.get(field);
        if value.is_none() && mode != Mode::Create {
            continue;
        }

        let violation = match (collection, field) {
            (_, "user_id" | "post_id") => {
                let Some((parent, _)) = collection.parent() else {
                    continue;
                };
                let reference = if field == "user_id" { "user" } else { "post" };
                match value.and_then(as_id) {
                    Some(id) if relations.exists(parent, id) => None,
                    _ => Some(FieldViolation::new(reference, MUST_EXIST)),
                }
            }
            (_, "email") => match as_text(value) {
                None => Some(FieldViolation::new(field, BLANK)),
                Some(email) if !is_email(email) => Some(FieldViolation::new(field, INVALID)),
                Some(email)
                    if collection == Collection::Users
                        && relations.email_taken(collection, email, except) =>
                {
                    Some(FieldViolation::new(field, TAKEN))
                }
                Some(_) => None,
            },
            (Collection::Users, "gender") => match as_text(value) {
                Some("male" | "female") => None,
                _ => Some(FieldViolation::new(field, GENDER)),
            },
            (Collection::Users, "status") => match as_text(value) {
                Some("active" | "inactive") => None,
                _ => Some(FieldViolation::new(field, BLANK)),
            },
            _ => match as_text(value) {
                Some(_) => None,
                None => Some(FieldViolation::new(field, BLANK)),
            },
        };

        violations.extend(violation);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed {
        users: Vec<u64>,
        posts: Vec<u64>,
        emails: Vec<(u64, &'static str)>,
    }

    impl Relations for Fixed {
        fn exists(&self, collection: Collection, id: u64) -> bool {
            match collection {
                Collection::Users => self.users.contains(&id),
                Collection::Posts => self.posts.contains(&id),
                Collection::Comments => false,
            }
        }

        fn email_taken(&self, _collection: Collection, email: &str, except: Option<u64>) -> bool {
            self.emails
                .iter()
                .any(|(id, e)| *e == email && Some(*id) != except)
        }
    }

    fn relations() -> Fixed {
        Fixed {
            users: vec![1],
            posts: vec![2],
            emails: vec![(1, "taken@example.com")],
        }
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn field_names(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_email_pattern_compiles() {
        Lazy::force(&EMAIL);
        assert!(is_email("ann@example.com"));
        assert!(!is_email("invalid-email"));
        assert!(!is_email("bad prefix_1@example.com"));
    }

    #[test]
    fn test_valid_user() {
        let body = fields(json!({
            "name": "Ann", "email": "ann@example.com", "gender": "female", "status": "active"
        }));
        assert!(check(Collection::Users, &body, Mode::Create, &relations()).is_empty());
    }

    #[test]
    fn test_missing_email() {
        let body = fields(json!({"name": "Ann", "gender": "female", "status": "active"}));
        let violations = check(Collection::Users, &body, Mode::Create, &relations());
        assert_eq!(violations, vec![FieldViolation::new("email", BLANK)]);
    }

    #[test]
    fn test_empty_user_reports_every_field() {
        let violations = check(Collection::Users, &Map::new(), Mode::Create, &relations());
        assert_eq!(
            field_names(&violations),
            vec!["name", "email", "gender", "status"]
        );
    }

    #[test]
    fn test_invalid_and_taken_email() {
        let invalid = fields(json!({"email": "not-an-email"}));
        let violations = check(Collection::Users, &invalid, Mode::Update { id: 5 }, &relations());
        assert_eq!(violations, vec![FieldViolation::new("email", INVALID)]);

        let taken = fields(json!({"email": "taken@example.com"}));
        let violations = check(Collection::Users, &taken, Mode::Update { id: 5 }, &relations());
        assert_eq!(violations, vec![FieldViolation::new("email", TAKEN)]);

        // The owner may keep its own email
        let violations = check(Collection::Users, &taken, Mode::Update { id: 1 }, &relations());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_update_checks_present_fields_only() {
        let body = fields(json!({"name": "New"}));
        assert!(check(Collection::Users, &body, Mode::Update { id: 1 }, &relations()).is_empty());

        let body = fields(json!({"name": "  "}));
        let violations = check(Collection::Users, &body, Mode::Update { id: 1 }, &relations());
        assert_eq!(field_names(&violations), vec!["name"]);
    }

    #[test]
    fn test_post_requires_existing_user() {
        let body = fields(json!({"user_id": 99, "title": "t", "body": "b"}));
        let violations = check(Collection::Posts, &body, Mode::Create, &relations());
        assert_eq!(violations, vec![FieldViolation::new("user", MUST_EXIST)]);

        let body = fields(json!({"user_id": "1", "title": "t", "body": "b"}));
        assert!(check(Collection::Posts, &body, Mode::Create, &relations()).is_empty());
    }

    #[test]
    fn test_comment_rules() {
        let body = fields(json!({"post_id": 2, "name": "n", "email": "bad", "body": ""}));
        let violations = check(Collection::Comments, &body, Mode::Create, &relations());
        assert_eq!(field_names(&violations), vec!["email", "body"]);

        // Comment emails need not be unique
        let body = fields(json!({
            "post_id": 2, "name": "n", "email": "taken@example.com", "body": "b"
        }));
        assert!(check(Collection::Comments, &body, Mode::Create, &relations()).is_empty());
    }

    #[test]
    fn test_gender_and_status_enums() {
        let body = fields(json!({"gender": "other", "status": "gone"}));
        let violations = check(Collection::Users, &body, Mode::Update { id: 1 }, &relations());
        assert_eq!(
            violations,
            vec![
                FieldViolation::new("gender", GENDER),
                FieldViolation::new("status", BLANK),
            ]
        );
    }

    #[test]
    fn test_as_id() {
        assert_eq!(as_id(&json!(3)), Some(3));
        assert_eq!(as_id(&json!("7")), Some(7));
        assert_eq!(as_id(&json!(0)), None);
        assert_eq!(as_id(&json!(-2)), None);
        assert_eq!(as_id(&json!(null)), None);
    }
}
