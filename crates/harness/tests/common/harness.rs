//! Service double setup.

use apicheck_harness::{FixtureManager, HarnessConfig, ResourceClient};
use apicheck_mock::MockServer;

/// Token the double accepts.
pub const TOKEN: &str = "test-token";

/// A running double with a client and fixture manager bound to it.
///
/// The double stops when this value is dropped.
pub struct TestContext {
    pub server: MockServer,
    pub config: HarnessConfig,
    pub client: ResourceClient,
    pub fixtures: FixtureManager,
}

impl TestContext {
    /// Returns a client for the same double that sends `token` instead.
    pub fn client_with_token(&self, token: &str) -> ResourceClient {
        self.client
            .with_token(token)
            .expect("Failed to build client with token")
    }
}

/// Starts an empty double on an ephemeral port.
pub async fn start() -> TestContext {
    apicheck_harness::init_logging("debug");

    let server = MockServer::start()
        .await
        .expect("Failed to start mock server");
    let config = HarnessConfig::for_testing(server.base_url(), TOKEN);
    let client = ResourceClient::new(&config).expect("Failed to create client");
    let fixtures = FixtureManager::new(client.clone());

    TestContext {
        server,
        config,
        client,
        fixtures,
    }
}
