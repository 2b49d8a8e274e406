//! Quick questions and career pathway endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    catalog::{CAREER_PATHWAYS, QUICK_QUESTIONS},
    error::{AppError, AppResult, ErrorResponse},
    routes::session::SessionView,
    AppState,
};

/// A quick-question shortcut
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuickQuestionView {
    #[schema(example = 1)]
    pub index: usize,
    #[schema(example = "How do I prepare for a career in AI/ML?")]
    pub label: String,
    pub query: String,
}

/// A career family and its example roles
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PathwayView {
    #[schema(example = "AI & Data Science")]
    pub category: String,
    pub careers: Vec<String>,
}

/// List quick questions
#[utoipa::path(
    get,
    path = "/api/quick-questions",
    tag = "Catalog",
    responses((status = 200, description = "Available shortcuts", body = [QuickQuestionView]))
)]
pub async fn list_quick_questions() -> Json<Vec<QuickQuestionView>> {
    let questions = QUICK_QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, q)| QuickQuestionView {
            index,
            label: q.label.to_string(),
            query: q.query.to_string(),
        })
        .collect();

    Json(questions)
}

/// Put a quick question into the pending input
///
/// Does not submit; the caller asks separately.
#[utoipa::path(
    post,
    path = "/api/quick-questions/{index}",
    tag = "Catalog",
    params(("index" = usize, Path, description = "Position in the quick-question list")),
    responses(
        (status = 200, description = "Session with the question pending", body = SessionView),
        (status = 404, description = "No quick question at that index", body = ErrorResponse)
    )
)]
pub async fn select_quick_question(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> AppResult<Json<SessionView>> {
    let mut session = state.session.lock().await;

    let selected = session
        .select_quick_question(index)
        .ok_or_else(|| AppError::NotFound(format!("Quick question {} does not exist", index)))?;
    debug!(index, label = selected.label, "Quick question selected");

    Ok(Json(SessionView::from(&*session)))
}

/// List career pathways
#[utoipa::path(
    get,
    path = "/api/pathways",
    tag = "Catalog",
    responses((status = 200, description = "Career pathway directory", body = [PathwayView]))
)]
pub async fn list_pathways() -> Json<Vec<PathwayView>> {
    let pathways = CAREER_PATHWAYS
        .iter()
        .map(|c| PathwayView {
            category: c.name.to_string(),
            careers: c.careers.iter().map(|career| career.to_string()).collect(),
        })
        .collect();

    Json(pathways)
}
