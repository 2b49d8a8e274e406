//! watsonx.ai deployment client
//!
//! Sends a single-message chat request to the `ai_service` deployment
//! endpoint and folds every outcome into a [`ModelResponse`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    auth::TokenProvider,
    config::Config,
    model::types::{AskError, ChatRequest, ModelResponse},
    sanitize::Sanitizer,
};

/// Anything that can answer a career question
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Ask a question; failures are reported in the result, never raised
    async fn ask(&self, query: &str) -> ModelResponse;
}

/// Client for the hosted deployment
pub struct ModelClient {
    client: reqwest::Client,
    endpoint: String,
    api_version: String,
    timeout: Duration,
    tokens: Arc<dyn TokenProvider>,
    sanitizer: Sanitizer,
}

impl ModelClient {
    /// Create a new deployment client
    pub fn new(
        client: reqwest::Client,
        config: &Config,
        tokens: Arc<dyn TokenProvider>,
        sanitizer: Sanitizer,
    ) -> Self {
        Self {
            client,
            endpoint: config.deployment_endpoint(),
            api_version: config.api_version.clone(),
            timeout: Duration::from_secs(config.model_timeout_seconds),
            tokens,
            sanitizer,
        }
    }

    /// Run one question through token exchange, completion, and cleanup
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn try_ask(&self, query: &str) -> Result<(String, Value), AskError> {
        if query.trim().is_empty() {
            return Err(AskError::EmptyQuery);
        }

        let token = self.tokens.fetch_token().await?;
        debug!(provider = self.tokens.name(), "Bearer token acquired");

        let request = ChatRequest::from_query(query);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("version", self.api_version.as_str())])
            .bearer_auth(token.secret())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %self.endpoint, error = %e, "Failed to send request to deployment");
                e
            })?;

        let status = response.status();
        debug!(status = %status, "Deployment response status");

        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "Deployment request failed");
            let raw = serde_json::from_str(&body).ok();
            return Err(AskError::Status { status, body, raw });
        }

        let raw: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "Deployment returned a non-JSON body");
                return Err(AskError::InvalidFormat(e.to_string()));
            }
        };

        let Some(content) = first_choice_content(&raw).map(str::to_string) else {
            warn!("Deployment response has no message content");
            return Err(AskError::MissingContent { raw });
        };

        let cleaned = self.sanitizer.clean(&content);
        debug!(
            original_len = content.len(),
            cleaned_len = cleaned.len(),
            "Sanitized model answer"
        );

        Ok((cleaned, raw))
    }
}

#[async_trait]
impl ChatModel for ModelClient {
    async fn ask(&self, query: &str) -> ModelResponse {
        match self.try_ask(query).await {
            Ok((content, raw)) => {
                info!("Model answered");
                ModelResponse::Success { content, raw }
            }
            Err(err) => {
                warn!(kind = err.kind().as_str(), error = %err, "Model call failed");
                ModelResponse::from(err)
            }
        }
    }
}

/// `choices[0].message.content` when it is a string
fn first_choice_content(raw: &Value) -> Option<&str> {
    raw.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
}
