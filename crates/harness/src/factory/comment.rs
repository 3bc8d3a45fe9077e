use super::{DataFactory, FactoryResult, require_parent, text};
use crate::resources::{Payload, ResourceId, ResourceKind};

/// Builds comment payloads: `post_id`, `name`, `email`, `body`.
#[derive(Debug, Clone, Copy)]
pub struct CommentFactory {
    post_id: Option<ResourceId>,
}

impl CommentFactory {
    /// Binds the factory to the commented post. `None` makes every `create` fail.
    pub fn for_post(post_id: Option<ResourceId>) -> Self {
        Self { post_id }
    }
}

impl DataFactory for CommentFactory {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Comment
    }

    fn create(&self, overrides: &Payload) -> FactoryResult<Payload> {
        let post_id = require_parent(ResourceKind::Comment, self.post_id)?;
        let mut rng = rand::rng();

        let generated = Payload::new()
            .with("post_id", post_id)
            .with("name", text::full_name(&mut rng))
            .with("email", text::unique_email("commenter"))
            .with("body", text::paragraph(&mut rng));

        Ok(generated.merge(overrides))
    }
}
