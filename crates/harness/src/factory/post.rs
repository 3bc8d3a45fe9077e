use super::{DataFactory, FactoryResult, require_parent, text};
use crate::resources::{Payload, ResourceId, ResourceKind};

/// Builds post payloads: `user_id`, `title`, `body`.
#[derive(Debug, Clone, Copy)]
pub struct PostFactory {
    user_id: Option<ResourceId>,
}

impl PostFactory {
    /// Binds the factory to the owning user. `None` makes every `create` fail.
    pub fn for_user(user_id: Option<ResourceId>) -> Self {
        Self { user_id }
    }
}

impl DataFactory for PostFactory {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Post
    }

    fn create(&self, overrides: &Payload) -> FactoryResult<Payload> {
        let user_id = require_parent(ResourceKind::Post, self.user_id)?;
        let mut rng = rand::rng();

        let generated = Payload::new()
            .with("user_id", user_id)
            .with("title", text::sentence(&mut rng))
            .with("body", text::paragraphs(&mut rng, 2));

        Ok(generated.merge(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FactoryError;
    use serde_json::json;

    #[test]
    fn test_embeds_user_id() {
        let post = PostFactory::for_user(ResourceId::new(7))
            .create(&Payload::new())
            .unwrap();
        assert_eq!(post.get("user_id"), Some(&json!(7)));
        assert!(post.get_str("title").is_some());
        assert!(post.get_str("body").unwrap().contains("\n\n"));
    }

    #[test]
    fn test_missing_user_id() {
        let err = PostFactory::for_user(None)
            .create(&Payload::new().with("title", "t"))
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::MissingDependency {
                kind: ResourceKind::Post,
                parent: ResourceKind::User,
            }
        );
    }
}
