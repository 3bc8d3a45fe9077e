use crate::error::FactoryError;
use crate::resources::{Payload, ResourceId, ResourceKind};

/// One resource to create as part of a fixture chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureLink {
    /// Resource kind to create.
    pub kind: ResourceKind,
    /// Field overrides applied on top of the factory payload.
    pub overrides: Payload,
}

/// Ordered declaration of the resources a test needs.
///
/// Each link's parent is the most recent earlier link of the parent kind, or
/// the anchor when no such link exists.
///
/// ```
/// use apicheck_harness::fixture::FixturePlan;
/// use apicheck_harness::{Payload, ResourceId, ResourceKind};
///
/// // Per-test comments under a post owned by the suite
/// let plan = FixturePlan::new()
///     .on(ResourceKind::Post, ResourceId::new(7).unwrap())
///     .link(ResourceKind::Comment)
///     .link_with(ResourceKind::Comment, Payload::new().with("name", "Second"));
/// assert!(plan.validate().is_ok());
///
/// // A post with no user to hang off
/// assert!(FixturePlan::new().link(ResourceKind::Post).validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixturePlan {
    anchor: Option<(ResourceKind, ResourceId)>,
    links: Vec<FixtureLink>,
}

impl FixturePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single user.
    pub fn user() -> Self {
        Self::new().link(ResourceKind::User)
    }

    /// A user and one of their posts.
    pub fn user_post() -> Self {
        Self::user().link(ResourceKind::Post)
    }

    /// A user, a post, and a comment on that post.
    pub fn user_post_comment() -> Self {
        Self::user_post().link(ResourceKind::Comment)
    }

    /// Anchors the chain on an existing resource owned elsewhere.
    ///
    /// The anchor is used as a parent but is never deleted by this chain.
    pub fn on(mut self, kind: ResourceKind, id: ResourceId) -> Self {
        self.anchor = Some((kind, id));
        self
    }

    /// Appends a link with generated fields only.
    pub fn link(self, kind: ResourceKind) -> Self {
        self.link_with(kind, Payload::new())
    }

    /// Appends a link with field overrides.
    pub fn link_with(mut self, kind: ResourceKind, overrides: Payload) -> Self {
        self.links.push(FixtureLink { kind, overrides });
        self
    }

    /// Returns the anchor, if any.
    pub fn anchor(&self) -> Option<(ResourceKind, ResourceId)> {
        self.anchor
    }

    /// Returns the links in creation order.
    pub fn links(&self) -> &[FixtureLink] {
        &self.links
    }

    /// Returns true if the plan creates nothing.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Checks that every link's parent is available when the link is created.
    pub fn validate(&self) -> Result<(), FactoryError> {
        let mut available: Vec<ResourceKind> = self.anchor.iter().map(|(k, _)| *k).collect();
        for link in &self.links {
            if let Some(parent) = link.kind.parent() {
                if !available.contains(&parent) {
                    return Err(FactoryError::MissingDependency {
                        kind: link.kind,
                        parent,
                    });
                }
            }
            available.push(link.kind);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for plan in [
            FixturePlan::user(),
            FixturePlan::user_post(),
            FixturePlan::user_post_comment(),
        ] {
            assert!(plan.validate().is_ok());
        }
        assert_eq!(FixturePlan::user_post_comment().links().len(), 3);
    }

    #[test]
    fn test_comment_without_post() {
        let plan = FixturePlan::user().link(ResourceKind::Comment);
        assert_eq!(
            plan.validate(),
            Err(FactoryError::MissingDependency {
                kind: ResourceKind::Comment,
                parent: ResourceKind::Post,
            })
        );
    }

    #[test]
    fn test_parent_must_come_first() {
        let plan = FixturePlan::new()
            .link(ResourceKind::Post)
            .link(ResourceKind::User);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_anchor_satisfies_dependency() {
        let plan = FixturePlan::new()
            .on(ResourceKind::User, ResourceId::new(3).unwrap())
            .link(ResourceKind::Post)
            .link(ResourceKind::Comment);
        assert!(plan.validate().is_ok());
        assert_eq!(plan.anchor(), Some((ResourceKind::User, ResourceId::new(3).unwrap())));
    }

    #[test]
    fn test_empty_plan() {
        let plan = FixturePlan::new();
        assert!(plan.is_empty());
        assert!(plan.validate().is_ok());
    }
}
