//! Integration tests for the fluent patch builder.
//!
//! These tests run the full round trip against a mock PATCH endpoint:
//! request body shape, header handling, response decoding, and the
//! clean-slate guarantee after both successful and failed sends.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trellis_api::resources::dns_zone::DnsZonePatch;
use trellis_api::resources::policy::PolicyPatch;
use trellis_api::resources::trust_requirement::TrustRequirementPatch;
use trellis_api::{AccessToken, ApiClient, ApiHost, HttpError, OrgId, PatchError, TrellisConfig};

fn test_client(server: &MockServer) -> ApiClient {
    let config = TrellisConfig::builder()
        .access_token(AccessToken::new("tk-test").unwrap())
        .host(ApiHost::new(server.uri()).unwrap())
        .build()
        .unwrap();
    ApiClient::new(&config, OrgId::new("acme").unwrap())
}

fn zone_body(name: &str) -> serde_json::Value {
    json!({
        "id": 123,
        "name": name,
        "created": "2024-05-12T08:30:00Z",
        "recordCount": 4
    })
}

fn policy_body(description: &str) -> serde_json::Value {
    json!({
        "id": 7,
        "created": "2024-04-20T14:00:00Z",
        "description": description,
        "isEnabled": true,
        "senderTags": [],
        "receiverTags": []
    })
}

#[tokio::test]
async fn patch_sends_only_set_fields_and_decodes_response() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/dns/zones/123"))
        .and(body_json(json!({"name": "Zone1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body("Zone1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.dns_zones().update(123);
    let zone = builder
        .set(DnsZonePatch::NAME, "Zone1".to_string())
        .unwrap()
        .apply()
        .await
        .unwrap();

    assert_eq!(zone.id, 123);
    assert_eq!(zone.name, "Zone1");
}

#[tokio::test]
async fn empty_patch_sends_empty_json_object() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("Unchanged")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);
    let policy = builder.apply().await.unwrap();

    assert_eq!(policy.description, "Unchanged");
}

#[tokio::test]
async fn setting_the_same_field_twice_sends_the_last_value_only() {
    let server = MockServer::start().await;
    // The body matcher is exact: {"description": "B"} and nothing else.
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(body_json(json!({"description": "B"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("B")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);
    let policy = builder
        .set(PolicyPatch::DESCRIPTION, "A".to_string())
        .unwrap()
        .set(PolicyPatch::DESCRIPTION, "B".to_string())
        .unwrap()
        .apply()
        .await
        .unwrap();

    assert_eq!(policy.description, "B");
}

#[tokio::test]
async fn failed_send_clears_pending_fields_for_the_next_patch() {
    let server = MockServer::start().await;
    // First call fails with a problem-details style 500.
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "type": "https://httpstatuses.io/500",
            "title": "Internal Server Error",
            "status": 500
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // Second call must carry only the fields set after the failure.
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(body_json(json!({"notes": "second attempt"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("CI agents")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);

    builder
        .set(PolicyPatch::DESCRIPTION, "doomed".to_string())
        .unwrap();
    let error = builder.apply().await.unwrap_err();
    match error {
        PatchError::Http(HttpError::Response(e)) => {
            assert_eq!(e.code, 500);
            assert!(e.message.contains("Internal Server Error"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }

    // Same builder instance, fresh fields.
    assert!(builder.pending_fields().is_empty());
    let policy = builder
        .set(PolicyPatch::NOTES, "second attempt".to_string())
        .unwrap()
        .apply()
        .await
        .unwrap();
    assert_eq!(policy.description, "CI agents");
}

#[tokio::test]
async fn successful_send_clears_pending_fields_for_the_next_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(body_json(json!({"description": "first"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("first")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(body_json(json!({"isEnabled": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("first")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);

    builder
        .set(PolicyPatch::DESCRIPTION, "first".to_string())
        .unwrap()
        .apply()
        .await
        .unwrap();

    // The description from the first patch must not leak into the second.
    builder
        .set(PolicyPatch::IS_ENABLED, false)
        .unwrap()
        .apply()
        .await
        .unwrap();
}

#[tokio::test]
async fn null_value_is_rejected_before_any_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.trust_requirements().update(3);

    let error = builder
        .set(TrustRequirementPatch::SETTINGS, serde_json::Value::Null)
        .unwrap_err();
    assert!(matches!(
        error,
        PatchError::NullValue { field: "settings" }
    ));
    assert!(builder.pending_fields().is_empty());
    // Server verifies on drop that no PATCH was received.
}

#[tokio::test]
async fn patch_round_trip_reflects_value_set_by_caller() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(body_json(json!({"description": "X"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("X")))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let policy = client
        .policies()
        .update(7)
        .set(PolicyPatch::DESCRIPTION, "X".to_string())
        .unwrap()
        .apply()
        .await
        .unwrap();

    assert_eq!(policy.description, "X");
}

#[tokio::test]
async fn patch_requests_carry_bearer_token_and_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(header("Authorization", "Bearer tk-test"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);
    builder.apply().await.unwrap();
}

#[tokio::test]
async fn null_success_body_is_a_contract_violation() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);
    let error = builder.apply().await.unwrap_err();

    assert!(matches!(error, PatchError::EmptyResponse { .. }));
}

#[tokio::test]
async fn empty_success_body_is_a_contract_violation() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);
    let error = builder.apply().await.unwrap_err();

    assert!(matches!(error, PatchError::EmptyResponse { .. }));
}

#[tokio::test]
async fn mismatched_success_body_is_a_contract_violation() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "not-a-number"})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);
    let error = builder.apply().await.unwrap_err();

    assert!(matches!(error, PatchError::InvalidResponse { .. }));
}

#[tokio::test]
async fn timed_out_patch_surfaces_network_error_and_leaves_builder_reusable() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(policy_body("slow"))
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/policies/7"))
        .and(body_json(json!({"notes": "after timeout"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_body("recovered")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut builder = client.policies().update(7);
    builder.timeout(Duration::from_millis(50));

    builder
        .set(PolicyPatch::DESCRIPTION, "slow".to_string())
        .unwrap();
    let error = builder.apply().await.unwrap_err();
    assert!(matches!(error, PatchError::Http(HttpError::Network(_))));

    // The timed-out request already consumed the pending fields.
    assert!(builder.pending_fields().is_empty());
    builder.timeout(Duration::from_secs(5));
    let policy = builder
        .set(PolicyPatch::NOTES, "after timeout".to_string())
        .unwrap()
        .apply()
        .await
        .unwrap();
    assert_eq!(policy.description, "recovered");
}

#[tokio::test]
async fn builders_for_different_resources_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/dns/zones/1"))
        .and(body_json(json!({"name": "one"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "one", "created": "2024-05-12T08:30:00Z", "recordCount": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/org/acme/dns/zones/2"))
        .and(body_json(json!({"name": "two"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "name": "two", "created": "2024-05-12T08:30:00Z", "recordCount": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let zones = client.dns_zones();
    let mut first = zones.update(1);
    let mut second = zones.update(2);

    first.set(DnsZonePatch::NAME, "one".to_string()).unwrap();
    second.set(DnsZonePatch::NAME, "two".to_string()).unwrap();

    let one = first.apply().await.unwrap();
    let two = second.apply().await.unwrap();
    assert_eq!(one.name, "one");
    assert_eq!(two.name, "two");
}
