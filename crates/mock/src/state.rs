//! Application state for the reference service double.

use std::sync::Arc;

use crate::config::MockConfig;
use crate::store::ResourceStore;

/// Shared application state: the record store and configuration.
///
/// # Type Parameters
///
/// * `S` - The store type (must implement [`ResourceStore`])
pub struct AppState<S> {
    store: Arc<S>,
    config: Arc<MockConfig>,
}

// S is behind an Arc and need not be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: ResourceStore> AppState<S> {
    /// Creates a new AppState with the given store and configuration.
    pub fn new(store: Arc<S>, config: MockConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Returns true if `token` is an accepted bearer token.
    pub fn accepts(&self, token: &str) -> bool {
        self.config.accepts(token)
    }

    /// Returns the path prefix the API is mounted under.
    pub fn prefix(&self) -> String {
        self.config.normalized_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn test_state_clone_shares_store() {
        let state = AppState::new(Arc::new(InMemoryStore::new()), MockConfig::for_testing());
        let cloned = state.clone();
        assert!(std::ptr::eq(state.store(), cloned.store()));
        assert_eq!(cloned.prefix(), "/public/v2");
        assert_eq!(state.store().backend_name(), "in-memory");
    }
}
