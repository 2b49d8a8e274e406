//! Deployment client integration tests
//!
//! Exercises the full ask path (IAM exchange, completion request, answer
//! cleanup) against mock IAM and deployment servers.

use std::sync::Arc;
use std::time::Duration;

use career_companion::{
    auth::{CachedTokenProvider, IamTokenProvider, TokenProvider},
    config::Config,
    model::{ChatModel, FailureKind, ModelClient},
    sanitize::Sanitizer,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, test_config};
use crate::mocks::{MockDeploymentServer, MockIamServer};

/// Mock servers plus a client wired to them
struct ClientHarness {
    iam: MockIamServer,
    deployment: MockDeploymentServer,
    config: Config,
}

impl ClientHarness {
    async fn new() -> Self {
        let iam = MockIamServer::start().await;
        let deployment = MockDeploymentServer::start().await;
        let config = test_config(&iam.uri(), &deployment.uri());
        Self {
            iam,
            deployment,
            config,
        }
    }

    fn client(&self) -> ModelClient {
        let http_client = reqwest::Client::new();
        let tokens: Arc<dyn TokenProvider> =
            Arc::new(IamTokenProvider::new(http_client.clone(), &self.config));
        ModelClient::new(http_client, &self.config, tokens, Sanitizer::default())
    }

    fn cached_client(&self) -> ModelClient {
        let http_client = reqwest::Client::new();
        let iam: Arc<dyn TokenProvider> =
            Arc::new(IamTokenProvider::new(http_client.clone(), &self.config));
        let tokens: Arc<dyn TokenProvider> = Arc::new(CachedTokenProvider::new(iam));
        ModelClient::new(http_client, &self.config, tokens, Sanitizer::default())
    }
}

#[tokio::test]
async fn test_successful_ask_returns_sanitized_answer() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness
        .deployment
        .mock_completion(
            "Hi, I am Carenzaa, your career guide.\n\
             How can I help you?\n\
             Start by building a portfolio of small projects.\n\
             Then apply for internships.",
        )
        .await;

    let response = harness.client().ask("How do I get started?").await;

    assert!(response.is_success(), "unexpected failure: {:?}", response);
    assert_eq!(
        response.content(),
        Some("Start by building a portfolio of small projects.\nThen apply for internships.")
    );

    // Raw body keeps the unsanitized text
    let raw = response.raw().expect("raw body");
    assert!(raw["choices"][0]["message"]["content"]
        .as_str()
        .unwrap()
        .starts_with("Hi, I am Carenzaa"));
}

#[tokio::test]
async fn test_short_answer_after_introduction_is_kept() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness
        .deployment
        .mock_completion_body(json!({
            "choices": [{"message": {"content": "Hi, I am Carenzaa. Here's a plan."}}]
        }))
        .await;

    let response = harness.client().ask("Plan my next year").await;

    assert_eq!(response.content(), Some("Here's a plan."));
}

#[tokio::test]
async fn test_answer_without_boilerplate_is_unchanged() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness
        .deployment
        .mock_completion("Data analysts are in high demand across finance and healthcare.")
        .await;

    let response = harness.client().ask("Which jobs are in demand in 2025?").await;

    assert_eq!(
        response.content(),
        Some("Data analysts are in high demand across finance and healthcare.")
    );
}

#[tokio::test]
async fn test_token_exchange_request_shape() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness.deployment.mock_completion("Learn SQL.").await;

    harness.client().ask("What should I learn?").await;

    let requests = harness.iam.received_requests().await;
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains(&format!("apikey={}", constants::TEST_API_KEY)));
    assert!(body.contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"));
}

#[tokio::test]
async fn test_completion_request_shape() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness.deployment.mock_completion("Learn SQL.").await;

    let response = harness.client().ask("How do I prepare for a career in AI/ML?").await;
    assert!(response.is_success());

    let requests = harness.deployment.received_requests().await;
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.url.path(), MockDeploymentServer::completion_path());
    assert_eq!(
        request.url.query(),
        Some(format!("version={}", constants::TEST_API_VERSION).as_str())
    );
    assert_eq!(
        request.headers.get("authorization").unwrap().to_str().unwrap(),
        format!("Bearer {}", constants::TEST_BEARER_TOKEN)
    );

    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(
        body,
        json!({
            "messages": [
                {"content": "How do I prepare for a career in AI/ML?", "role": "user"}
            ]
        })
    );
}

#[tokio::test]
async fn test_rejected_api_key_is_authentication_failure_without_completion_call() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_invalid_key().await;
    harness.deployment.mock_completion("should not be reached").await;

    let response = harness.client().ask("Any advice?").await;

    assert!(!response.is_success());
    assert_eq!(response.failure_kind(), Some(FailureKind::AuthenticationFailure));
    assert!(response
        .error_message()
        .unwrap()
        .starts_with("Authentication failed"));
    assert!(harness.deployment.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_missing_access_token_is_authentication_failure() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_missing().await;

    let response = harness.client().ask("Any advice?").await;

    assert_eq!(response.failure_kind(), Some(FailureKind::AuthenticationFailure));
    assert!(harness.deployment.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_absurd_token_lifetime_does_not_break_ask() {
    let harness = ClientHarness::new().await;
    harness
        .iam
        .mock_token_body(json!({
            "access_token": constants::TEST_BEARER_TOKEN,
            "expires_in": 1_000_000_000_000_000_i64
        }))
        .await;
    harness.deployment.mock_completion("Learn SQL.").await;

    let response = harness.cached_client().ask("Any advice?").await;

    assert_eq!(response.content(), Some("Learn SQL."));
}

#[tokio::test]
async fn test_unparseable_iam_body_is_authentication_failure() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_garbage().await;

    let response = harness.client().ask("Any advice?").await;

    assert_eq!(response.failure_kind(), Some(FailureKind::AuthenticationFailure));
}

#[tokio::test]
async fn test_blank_query_makes_no_network_calls() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness.deployment.mock_completion("unused").await;

    let client = harness.client();
    for query in ["", "   ", "\n\t"] {
        let response = client.ask(query).await;
        assert_eq!(response.failure_kind(), Some(FailureKind::EmptyQuery));
        assert_eq!(response.error_message(), Some("Empty query provided"));
    }

    assert!(harness.iam.received_requests().await.is_empty());
    assert!(harness.deployment.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_deployment_error_status_is_request_failure_with_raw_body() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness
        .deployment
        .mock_completion_error(500, "deployment is not ready")
        .await;

    let response = harness.client().ask("Any advice?").await;

    assert_eq!(response.failure_kind(), Some(FailureKind::RequestFailure));
    let message = response.error_message().unwrap();
    assert!(message.contains("500"), "message was {message}");
    assert!(message.contains("deployment is not ready"));
    assert_eq!(response.raw().unwrap()["status_code"], 500);
}

#[tokio::test]
async fn test_non_json_completion_is_malformed_response() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness.deployment.mock_completion_garbage().await;

    let response = harness.client().ask("Any advice?").await;

    assert_eq!(response.failure_kind(), Some(FailureKind::MalformedResponse));
    assert!(response.raw().is_none());
}

#[tokio::test]
async fn test_missing_choices_is_malformed_response_with_raw_body() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness
        .deployment
        .mock_completion_body(json!({"id": "chat-test", "choices": []}))
        .await;

    let response = harness.client().ask("Any advice?").await;

    assert_eq!(response.failure_kind(), Some(FailureKind::MalformedResponse));
    assert_eq!(response.raw(), Some(&json!({"id": "chat-test", "choices": []})));
}

#[tokio::test]
async fn test_non_string_content_is_malformed_response() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness
        .deployment
        .mock_completion_body(json!({"choices": [{"message": {"content": null}}]}))
        .await;

    let response = harness.client().ask("Any advice?").await;

    assert_eq!(response.failure_kind(), Some(FailureKind::MalformedResponse));
}

#[tokio::test]
async fn test_slow_deployment_times_out_as_request_failure() {
    let mut harness = ClientHarness::new().await;
    harness.config.model_timeout_seconds = 1;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness
        .deployment
        .mock_completion_delayed("Too late.", Duration::from_secs(3))
        .await;

    let response = harness.client().ask("Any advice?").await;

    assert_eq!(response.failure_kind(), Some(FailureKind::RequestFailure));
}

#[tokio::test]
async fn test_every_ask_exchanges_a_fresh_token_by_default() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness.deployment.mock_completion("Learn SQL.").await;

    let client = harness.client();
    client.ask("first").await;
    client.ask("second").await;

    assert_eq!(harness.iam.received_requests().await.len(), 2);
    assert_eq!(harness.deployment.received_requests().await.len(), 2);
}

#[tokio::test]
async fn test_cached_tokens_are_reused_across_asks() {
    let harness = ClientHarness::new().await;
    harness.iam.mock_token_success(constants::TEST_BEARER_TOKEN).await;
    harness.deployment.mock_completion("Learn SQL.").await;

    let client = harness.cached_client();
    assert!(client.ask("first").await.is_success());
    assert!(client.ask("second").await.is_success());

    assert_eq!(harness.iam.received_requests().await.len(), 1);
    assert_eq!(harness.deployment.received_requests().await.len(), 2);
}
