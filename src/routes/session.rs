//! Chat session endpoints
//!
//! The session mutex is held for the whole of a submission, so a second
//! ask waits for the first one to finish instead of running alongside it.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    model::{FailureKind, ModelResponse},
    routes::metrics,
    session::{ConversationEntry, Session},
    AppState,
};

/// Whether an entry holds an answer or an error
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Answered,
    Failed,
}

/// A history entry as shown to the user
///
/// Failures carry `error` instead of `answer` so they are never rendered as
/// model output.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryView {
    #[schema(example = "How do I prepare for a career in AI/ML?")]
    pub question: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    /// Deployment response body, for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub raw: Option<Value>,
    /// RFC 3339 timestamp
    pub asked_at: String,
}

impl From<&ConversationEntry> for EntryView {
    fn from(entry: &ConversationEntry) -> Self {
        let (status, answer, error, error_kind) = match &entry.response {
            ModelResponse::Success { content, .. } => {
                (EntryStatus::Answered, Some(content.clone()), None, None)
            }
            ModelResponse::Failure { kind, error, .. } => {
                (EntryStatus::Failed, None, Some(error.clone()), Some(*kind))
            }
        };

        Self {
            question: entry.question.clone(),
            status,
            answer,
            error,
            error_kind,
            raw: entry.response.raw().cloned(),
            asked_at: entry.asked_at.to_rfc3339(),
        }
    }
}

/// Current input box contents and history
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionView {
    pub session_id: String,
    pub pending_input: String,
    pub history: Vec<EntryView>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id().to_string(),
            pending_input: session.pending_input().to_string(),
            history: session.history().iter().map(EntryView::from).collect(),
        }
    }
}

/// Body for replacing the pending input
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetInputRequest {
    pub text: String,
}

/// Optional body for asking; `question` replaces the pending input first
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Get the session
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "Session",
    responses((status = 200, description = "Pending input and history", body = SessionView))
)]
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from(&*session))
}

/// Replace the pending input
#[utoipa::path(
    put,
    path = "/api/session/input",
    tag = "Session",
    request_body = SetInputRequest,
    responses(
        (status = 200, description = "Updated session", body = SessionView),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    )
)]
pub async fn set_input(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SetInputRequest>, JsonRejection>,
) -> AppResult<Json<SessionView>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut session = state.session.lock().await;
    session.set_pending_input(request.text);
    Ok(Json(SessionView::from(&*session)))
}

/// Submit the pending input to the model
///
/// Model failures are part of the returned entry. An empty body submits the
/// pending input as is; a body that is not a valid `AskRequest` is rejected
/// before anything is sent.
#[utoipa::path(
    post,
    path = "/api/session/ask",
    tag = "Session",
    request_body(content = AskRequest, description = "Optional question overriding the pending input"),
    responses(
        (status = 200, description = "The new history entry", body = EntryView),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    )
)]
pub async fn ask(State(state): State<Arc<AppState>>, body: Bytes) -> AppResult<Json<EntryView>> {
    let override_question = parse_ask_body(&body)?;

    let mut session = state.session.lock().await;
    if let Some(question) = override_question {
        session.set_pending_input(question);
    }

    let started = Instant::now();
    let entry = session.submit(state.model.as_ref()).await;
    let outcome = entry.response.outcome();
    let view = EntryView::from(entry);
    metrics::record_ask(outcome, started.elapsed().as_secs_f64());

    info!(
        session_id = %session.id(),
        outcome,
        history_len = session.history().len(),
        "Question answered"
    );

    Ok(Json(view))
}

/// Question override carried by an ask body, if any
fn parse_ask_body(body: &[u8]) -> AppResult<Option<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let Json(request) = Json::<AskRequest>::from_bytes(body)
        .map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(request.question)
}

/// Get the history, oldest first
#[utoipa::path(
    get,
    path = "/api/session/history",
    tag = "Session",
    responses((status = 200, description = "History entries", body = [EntryView]))
)]
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<EntryView>> {
    let session = state.session.lock().await;
    Json(session.history().iter().map(EntryView::from).collect())
}
