//! Error types for the test harness.
//!
//! Errors are grouped by the component that raises them, with [`HarnessError`]
//! aggregating them for callers that drive several components at once.
//!
//! | Error | Raised by | Policy |
//! |-------|-----------|--------|
//! | [`ConfigError`] | configuration, client construction | fatal, before any I/O |
//! | [`SchemaError`] | schema validator | fatal for that schema only |
//! | [`FactoryError`] | data factories, fixture plans | fatal, before any request |
//! | [`FixtureError`] | fixture lifecycle manager | fatal for the test, body never runs |
//! | `Transport` / `Decode` | resource client | propagated unchanged |
//!
//! Schema validation failures are not errors: they are returned as
//! [`ValidationResult`](crate::schema::ValidationResult) values. Cleanup
//! failures are not errors either: see [`CleanupWarning`](crate::fixture::CleanupWarning).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::fixture::{ChainState, FixtureRecord};
use crate::resources::ResourceKind;

/// The primary error type for harness operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Schema compilation errors
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Data factory errors
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// Fixture lifecycle errors
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Network-level failure (DNS, connect, timeout, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Required configuration is absent or invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} environment variable is required")]
    MissingToken { name: &'static str },

    #[error("bearer token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request timeout cannot be 0")]
    InvalidTimeout,

    #[error("failed to parse configuration: {message}")]
    Parse { message: String },
}

/// A schema document could not be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema compilation failed: {message}")]
    Compilation { message: String },
}

/// A data factory could not produce a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    #[error("{kind} payload requires a parent {parent} identifier")]
    MissingDependency {
        kind: ResourceKind,
        parent: ResourceKind,
    },

    #[error("email prefix '{prefix}' is not a valid address local part")]
    InvalidEmailPrefix { prefix: String },
}

/// A fixture chain could not be set up, or was driven through an illegal transition.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("fixture setup failed creating {kind}: {reason} (status {status})")]
    Setup {
        kind: ResourceKind,
        status: u16,
        reason: String,
        body: String,
        /// Records created before the failing step. They are not rolled back.
        created: Vec<FixtureRecord>,
    },

    #[error("illegal fixture chain transition: {from} -> {to}")]
    IllegalTransition { from: ChainState, to: ChainState },
}

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
