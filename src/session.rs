//! Conversation state for a single user session
//!
//! Holds the text waiting in the input box and the append-only history of
//! question/answer pairs. Nothing here is persisted; the session lives as
//! long as its owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    catalog::{self, QuickQuestion},
    model::{ChatModel, ModelResponse},
};

/// One question and whatever came back for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationEntry {
    pub question: String,
    pub response: ModelResponse,
    pub asked_at: DateTime<Utc>,
}

/// Pending input plus ordered history
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    pending_input: String,
    history: Vec<ConversationEntry>,
}

impl Session {
    /// Start an empty session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            pending_input: String::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replace the pending input, as when the user types
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Put a quick question into the pending input without submitting it
    pub fn select_quick_question(&mut self, index: usize) -> Option<&'static QuickQuestion> {
        let question = catalog::quick_question(index)?;
        self.pending_input = question.query.to_string();
        Some(question)
    }

    /// Ask the model the pending input and record the outcome
    ///
    /// The entry is appended whether the call succeeded or failed. The
    /// pending input is left as it was.
    #[instrument(skip(self, model), fields(session_id = %self.id, history_len = self.history.len()))]
    pub async fn submit(&mut self, model: &dyn ChatModel) -> &ConversationEntry {
        let question = self.pending_input.clone();
        let response = model.ask(&question).await;

        debug!(outcome = response.outcome(), "Recording conversation entry");

        let index = self.history.len();
        self.history.push(ConversationEntry {
            question,
            response,
            asked_at: Utc::now(),
        });
        &self.history[index]
    }

    /// Entries in the order they were asked
    pub fn history(&self) -> &[ConversationEntry] {
        &self.history
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
