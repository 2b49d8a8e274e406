//! Request and result types for the model deployment

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::AuthError;

/// Role of a message participant; questions are only ever sent as the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A single chat message sent to the deployment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub content: String,
    pub role: Role,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::User,
        }
    }
}

/// Body of a completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Single-message request carrying the user's question as-is
    pub fn from_query(query: &str) -> Self {
        Self {
            messages: vec![ChatMessage::user(query)],
        }
    }
}

/// Category of a failed model call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EmptyQuery,
    AuthenticationFailure,
    RequestFailure,
    MalformedResponse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::EmptyQuery => "empty_query",
            FailureKind::AuthenticationFailure => "authentication_failure",
            FailureKind::RequestFailure => "request_failure",
            FailureKind::MalformedResponse => "malformed_response",
        }
    }
}

/// Outcome of asking the model a question
///
/// Exactly one variant is populated. Whatever JSON the deployment returned
/// is kept for diagnostics, even when it could not be interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelResponse {
    Success {
        /// Sanitized answer text
        content: String,
        /// Response body as received, before sanitizing
        raw: Value,
    },
    Failure {
        kind: FailureKind,
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw: Option<Value>,
    },
}

impl ModelResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, ModelResponse::Success { .. })
    }

    /// Answer text, if the call succeeded
    pub fn content(&self) -> Option<&str> {
        match self {
            ModelResponse::Success { content, .. } => Some(content),
            ModelResponse::Failure { .. } => None,
        }
    }

    /// Error message, if the call failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ModelResponse::Success { .. } => None,
            ModelResponse::Failure { error, .. } => Some(error),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ModelResponse::Success { .. } => None,
            ModelResponse::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Upstream JSON body, when one was received and parsed
    pub fn raw(&self) -> Option<&Value> {
        match self {
            ModelResponse::Success { raw, .. } => Some(raw),
            ModelResponse::Failure { raw, .. } => raw.as_ref(),
        }
    }

    /// Short label for logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            ModelResponse::Success { .. } => "success",
            ModelResponse::Failure { kind, .. } => kind.as_str(),
        }
    }
}

/// Reasons a model call can fail
#[derive(Debug, Error)]
pub enum AskError {
    #[error("Empty query provided")]
    EmptyQuery,

    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
        raw: Option<Value>,
    },

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Invalid response format: no message content in first choice")]
    MissingContent { raw: Value },
}

impl AskError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AskError::EmptyQuery => FailureKind::EmptyQuery,
            AskError::Authentication(_) => FailureKind::AuthenticationFailure,
            AskError::Request(_) | AskError::Status { .. } => FailureKind::RequestFailure,
            AskError::InvalidFormat(_) | AskError::MissingContent { .. } => {
                FailureKind::MalformedResponse
            }
        }
    }
}

impl From<AskError> for ModelResponse {
    fn from(err: AskError) -> Self {
        let kind = err.kind();
        let error = err.to_string();
        let raw = match err {
            AskError::Status { raw, .. } => raw,
            AskError::MissingContent { raw } => Some(raw),
            _ => None,
        };

        ModelResponse::Failure { kind, error, raw }
    }
}
