use rand::seq::IndexedRandom;

use super::{DataFactory, FactoryResult, text};
use crate::error::FactoryError;
use crate::resources::{Gender, Payload, ResourceKind, UserStatus};

/// Builds user payloads: `name`, `email`, `gender`, `status`.
#[derive(Debug, Clone)]
pub struct UserFactory {
    email_prefix: String,
}

impl UserFactory {
    /// Creates a factory using the `testuser` email prefix.
    pub fn new() -> Self {
        Self {
            email_prefix: "testuser".to_string(),
        }
    }

    /// Uses a different local-part prefix for generated emails.
    ///
    /// The prefix must be non-empty and free of whitespace and `@`; otherwise
    /// `create` fails with [`FactoryError::InvalidEmailPrefix`].
    pub fn with_email_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.email_prefix = prefix.into();
        self
    }
}

impl Default for UserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFactory for UserFactory {
    fn kind(&self) -> ResourceKind {
        ResourceKind::User
    }

    fn create(&self, overrides: &Payload) -> FactoryResult<Payload> {
        if !valid_prefix(&self.email_prefix) {
            return Err(FactoryError::InvalidEmailPrefix {
                prefix: self.email_prefix.clone(),
            });
        }
        let mut rng = rand::rng();
        let gender = Gender::ALL.choose(&mut rng).copied().unwrap_or(Gender::Male);
        let status = UserStatus::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(UserStatus::Active);

        let generated = Payload::new()
            .with("name", text::full_name(&mut rng))
            .with("email", text::unique_email(&self.email_prefix))
            .with("gender", gender.as_str())
            .with("status", status.as_str());

        Ok(generated.merge(overrides))
    }
}

fn valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && !prefix.chars().any(|c| c == '@' || c.is_whitespace())
}
