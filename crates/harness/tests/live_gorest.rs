//! Scenarios against the live service.
//!
//! Ignored by default. Run with:
//!
//! ```bash
//! GOREST_TOKEN=... cargo test -p apicheck-harness --test live_gorest -- --ignored
//! ```

mod common;

use apicheck_harness::factory::{DataFactory, UserFactory};
use apicheck_harness::fixture::{FixtureManager, FixturePlan};
use apicheck_harness::{HarnessConfig, Payload, ResourceClient, ResourceKind};
use http::StatusCode;

use common::assertions::{assert_field_error, assert_record, assert_status};

fn live_client() -> ResourceClient {
    let config = HarnessConfig::from_env().expect("GOREST_TOKEN must be set for live tests");
    apicheck_harness::init_logging(&config.log_level);
    ResourceClient::new(&config).expect("Failed to create client")
}

#[tokio::test]
#[ignore = "requires GOREST_TOKEN and network access"]
async fn live_user_crud() {
    let client = live_client();
    let payload = UserFactory::new()
        .with_email_prefix("apicheck")
        .create(&Payload::new())
        .unwrap();

    let created = client.create_user(&payload).await.unwrap();
    assert_status(&created, StatusCode::CREATED);
    assert_record(&created, ResourceKind::User);
    let id = created.resource_id().unwrap();

    let updated = client
        .update_user(id, &Payload::new().with("status", "inactive"))
        .await
        .unwrap();
    assert_status(&updated, StatusCode::OK);

    assert_status(&client.delete_user(id).await.unwrap(), StatusCode::NO_CONTENT);
    assert_status(&client.get_user_by_id(id).await.unwrap(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires GOREST_TOKEN and network access"]
async fn live_missing_email_rejected() {
    let client = live_client();
    let mut payload = UserFactory::new().create(&Payload::new()).unwrap();
    payload.remove("email");

    let response = client.create_user(&payload).await.unwrap();

    assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_field_error(&response, "email");
}

#[tokio::test]
#[ignore = "requires GOREST_TOKEN and network access"]
async fn live_invalid_token_rejected() {
    let client = live_client().with_token("invalid_token_12345").unwrap();
    let payload = UserFactory::new().create(&Payload::new()).unwrap();

    let response = client.create_user(&payload).await.unwrap();

    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires GOREST_TOKEN and network access"]
async fn live_comment_chain() {
    let manager = FixtureManager::new(live_client());

    let comment = manager
        .scoped(&FixturePlan::user_post_comment(), |chain| async move {
            let record = chain.record(ResourceKind::Comment).unwrap().clone();
            assert_eq!(
                record.body["post_id"],
                serde_json::json!(chain.id(ResourceKind::Post).unwrap().get())
            );
            record.id
        })
        .await
        .unwrap();

    let response = manager.client().get_comment_by_id(comment).await.unwrap();
    assert_status(&response, StatusCode::NOT_FOUND);
}
