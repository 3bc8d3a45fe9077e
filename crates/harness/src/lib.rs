//! # apicheck-harness - Schema-Validated REST Resource Test Harness
//!
//! Building blocks for CRUD test suites against REST resources (users, posts,
//! comments):
//!
//! - **Schema validation** ([`schema`]): compiles JSON Schema documents once,
//!   caches the compiled validators, and reports field-level violations.
//! - **Data factories** ([`factory`]): randomized payloads that satisfy the
//!   resource schemas, with field overrides and parent-id injection.
//! - **Resource client** ([`client`]): authenticated create/read/update/
//!   delete/list requests that return raw responses.
//! - **Fixture lifecycle** ([`fixture`]): dependent resource chains created
//!   in order and torn down in reverse, even when the test body panics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apicheck_harness::factory::{DataFactory, UserFactory};
//! use apicheck_harness::schema::{self, documents};
//! use apicheck_harness::{HarnessConfig, Payload, ResourceClient};
//! use http::StatusCode;
//!
//! # async fn run() -> apicheck_harness::HarnessResult<()> {
//! let config = HarnessConfig::from_env()?;
//! apicheck_harness::init_logging(&config.log_level);
//!
//! let client = ResourceClient::new(&config)?;
//! let payload = UserFactory::new().create(&Payload::new())?;
//!
//! let response = client.create_user(&payload).await?;
//! assert_eq!(response.status(), StatusCode::CREATED);
//!
//! let result = schema::validate(documents::user_schema(), &response.json()?)?;
//! assert!(result.valid, "{}", result.describe());
//!
//! if let Some(id) = response.resource_id() {
//!     client.delete_user(id).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment
//!
//! See [`config`] for the variables read by [`HarnessConfig::from_env`].

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod resources;
pub mod schema;

pub use client::{ApiResponse, ListQuery, ResourceClient};
pub use config::HarnessConfig;
pub use error::{
    ConfigError, FactoryError, FixtureError, HarnessError, HarnessResult, SchemaError,
};
pub use fixture::{FixtureChain, FixtureManager, FixturePlan};
pub use resources::{Payload, ResourceId, ResourceKind};
pub use schema::{ValidationResult, validate};

/// Initializes logging for the harness.
///
/// `RUST_LOG` takes precedence over `level`. Safe to call more than once; only
/// the first call installs a subscriber.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("apicheck_harness={}", level)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(filter)
        .try_init();
}
