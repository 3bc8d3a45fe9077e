//! Reference service double for apicheck-harness.
//!
//! Serves an empty in-memory users/posts/comments API.

use apicheck_mock::{InMemoryStore, MockConfig, create_app, init_logging};
use clap::Parser;
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &MockConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        address = %listener.local_addr()?,
        prefix = %config.normalized_prefix(),
        "Server listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MockConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        tokens = config.tokens.len(),
        "Starting gorest-mock"
    );

    let app = create_app(InMemoryStore::new(), config.clone());
    serve(app, &config).await
}
