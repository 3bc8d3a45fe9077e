//! # apicheck-mock - Reference Service Double
//!
//! An in-memory implementation of the users/posts/comments REST protocol the
//! harness targets, so end-to-end tests run without network access or a real
//! account.
//!
//! ## API Endpoints
//!
//! Mounted under a configurable prefix (default `/public/v2`):
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | list | GET | `/{collection}` |
//! | create | POST | `/{collection}` |
//! | read | GET | `/{collection}/{id}` |
//! | update | PUT, PATCH | `/{collection}/{id}` |
//! | delete | DELETE | `/{collection}/{id}` |
//! | nested list | GET | `/users/{id}/posts`, `/posts/{id}/comments` |
//! | nested create | POST | `/users/{id}/posts`, `/posts/{id}/comments` |
//! | health | GET | `/health` (outside the prefix) |
//!
//! ## Status Codes
//!
//! | HTTP Status | Body | Meaning |
//! |-------------|------|---------|
//! | 201 | record | Created |
//! | 204 | empty | Deleted |
//! | 401 | `{"message"}` | Missing token on a write, or unknown token |
//! | 404 | `{"message": "Resource not found"}` | No such record |
//! | 422 | `[{"field", "message"}]` | Field validation failed |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apicheck_mock::MockServer;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let server = MockServer::start().await?;
//! println!("API at {}", server.base_url());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod routing;
pub mod state;
pub mod store;
pub mod validation;

pub use config::MockConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use store::{InMemoryStore, ResourceStore};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Creates the Axum application with the given store and configuration.
pub fn create_app<S>(store: S, config: MockConfig) -> Router
where
    S: ResourceStore + Send + Sync + 'static,
{
    info!(
        prefix = %config.normalized_prefix(),
        "Creating mock API with backend: {}",
        store.backend_name()
    );

    let timeout = std::time::Duration::from_secs(config.request_timeout);
    let state = AppState::new(Arc::new(store), config);
    let router = routing::create_routes(state);

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                axum::http::StatusCode::REQUEST_TIMEOUT,
                timeout,
            )),
    )
}

/// A double serving on a background task.
///
/// The task is aborted when the value is dropped.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    prefix: String,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Starts an empty double on an ephemeral localhost port.
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with(MockConfig::for_testing()).await
    }

    /// Starts an empty double with the given configuration.
    ///
    /// The configured host and port are used as-is; port 0 picks a free port.
    pub async fn start_with(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        let prefix = config.normalized_prefix();
        let app = create_app(InMemoryStore::new(), config);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock server stopped");
            }
        });

        info!(%addr, "Mock server listening");
        Ok(Self {
            addr,
            prefix,
            handle,
        })
    }

    /// Returns the bound socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the API base URL, including the prefix.
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, self.prefix)
    }

    /// Returns the root URL, without the prefix.
    pub fn root_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level`. Only the first call installs a
/// subscriber.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("apicheck_mock={},tower_http=debug", level))
    });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();
}
