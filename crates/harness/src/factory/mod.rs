//! Test-data factories.
//!
//! Each factory produces randomized payloads that satisfy the corresponding
//! payload schema (see [`crate::schema::documents::payload_schema`]). Callers
//! pass field overrides that take precedence over generated values with a
//! shallow, field-by-field merge.
//!
//! Dependent factories ([`PostFactory`], [`CommentFactory`]) are bound to a
//! parent identifier and fail with
//! [`FactoryError::MissingDependency`](crate::error::FactoryError::MissingDependency)
//! when none was supplied.
//!
//! # Example
//!
//! ```
//! use apicheck_harness::factory::{CommentFactory, DataFactory, UserFactory};
//! use apicheck_harness::{Payload, ResourceId};
//!
//! let user = UserFactory::new().create(&Payload::new().with("name", "X"))?;
//! assert_eq!(user.get_str("name"), Some("X"));
//!
//! let comment = CommentFactory::for_post(ResourceId::new(42)).create(&Payload::new())?;
//! assert_eq!(comment.get("post_id"), Some(&serde_json::json!(42)));
//!
//! assert!(CommentFactory::for_post(None).create(&Payload::new()).is_err());
//! # Ok::<(), apicheck_harness::FactoryError>(())
//! ```

mod comment;
mod post;
pub mod text;
mod user;

pub use comment::CommentFactory;
pub use post::PostFactory;
pub use user::UserFactory;

use crate::error::FactoryError;
use crate::resources::{Payload, ResourceId, ResourceKind};

/// Result type alias for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Produces create payloads for one resource kind.
///
/// Every call is independent: implementations hold no mutable state.
pub trait DataFactory: Send + Sync {
    /// The resource kind this factory builds payloads for.
    fn kind(&self) -> ResourceKind;

    /// Builds one payload, applying `overrides` on top of generated values.
    fn create(&self, overrides: &Payload) -> FactoryResult<Payload>;

    /// Builds `count` payloads, each with the same overrides.
    fn create_many(&self, count: usize, overrides: &Payload) -> FactoryResult<Vec<Payload>> {
        (0..count).map(|_| self.create(overrides)).collect()
    }
}

/// Returns the factory for `kind`, bound to `parent` when the kind has one.
///
/// The parent is ignored for kinds without a dependency.
pub fn factory_for(kind: ResourceKind, parent: Option<ResourceId>) -> Box<dyn DataFactory> {
    match kind {
        ResourceKind::User => Box::new(UserFactory::new()),
        ResourceKind::Post => Box::new(PostFactory::for_user(parent)),
        ResourceKind::Comment => Box::new(CommentFactory::for_post(parent)),
    }
}

/// Resolves the parent id for a dependent kind or fails with `MissingDependency`.
pub(crate) fn require_parent(
    kind: ResourceKind,
    parent: Option<ResourceId>,
) -> FactoryResult<ResourceId> {
    let parent_kind = kind.parent().unwrap_or(kind);
    parent.ok_or(FactoryError::MissingDependency {
        kind,
        parent: parent_kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::documents::payload_schema;
    use crate::schema::validate;
    use serde_json::json;

    #[test]
    fn test_factory_for_kind() {
        let id = ResourceId::new(5);
        for kind in ResourceKind::ALL {
            assert_eq!(factory_for(kind, id).kind(), kind);
        }
    }

    #[test]
    fn test_every_factory_output_is_schema_valid() {
        let id = ResourceId::new(9);
        for kind in ResourceKind::ALL {
            let payload = factory_for(kind, id).create(&Payload::new()).unwrap();
            let result = validate(payload_schema(kind), &payload.to_value()).unwrap();
            assert!(result.valid, "{kind}: {}", result.describe());
        }
    }

    #[test]
    fn test_name_override_keeps_other_fields_valid() {
        let overrides = Payload::new().with("name", "X");
        for kind in [ResourceKind::User, ResourceKind::Comment] {
            let payload = factory_for(kind, ResourceId::new(1)).create(&overrides).unwrap();
            assert_eq!(payload.get("name"), Some(&json!("X")));
            let result = validate(payload_schema(kind), &payload.to_value()).unwrap();
            assert!(result.valid, "{kind}: {}", result.describe());
        }
    }

    #[test]
    fn test_create_many_produces_distinct_emails() {
        let users = UserFactory::new().create_many(5, &Payload::new()).unwrap();
        assert_eq!(users.len(), 5);
        let mut emails: Vec<&str> = users.iter().filter_map(|u| u.get_str("email")).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 5);
    }

    #[test]
    fn test_create_many_propagates_missing_dependency() {
        let result = PostFactory::for_user(None).create_many(3, &Payload::new());
        assert_eq!(
            result,
            Err(FactoryError::MissingDependency {
                kind: ResourceKind::Post,
                parent: ResourceKind::User,
            })
        );
    }

    #[test]
    fn test_create_many_zero() {
        let none = UserFactory::new().create_many(0, &Payload::new()).unwrap();
        assert!(none.is_empty());
    }
}
