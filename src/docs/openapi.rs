//! OpenAPI specification for the companion API
//!
//! Aggregates the session, catalog, and debug endpoints and their schemas
//! into a single OpenAPI document.

use utoipa::OpenApi;

use crate::{
    error::{ErrorBody, ErrorResponse},
    model::FailureKind,
    routes::{
        catalog::{PathwayView, QuickQuestionView},
        debug::DebugInfo,
        session::{AskRequest, EntryStatus, EntryView, SessionView, SetInputRequest},
    },
};

/// OpenAPI specification for the Career Companion API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Career Companion API",
        version = "1.0.0",
        description = "Career-advice chat backed by a hosted watsonx.ai deployment, with quick questions and a career pathway directory"
    ),
    paths(
        crate::routes::session::get_session,
        crate::routes::session::set_input,
        crate::routes::session::ask,
        crate::routes::session::get_history,
        crate::routes::catalog::list_quick_questions,
        crate::routes::catalog::select_quick_question,
        crate::routes::catalog::list_pathways,
        crate::routes::debug::debug_info,
    ),
    components(
        schemas(
            // Session
            SessionView,
            EntryView,
            EntryStatus,
            FailureKind,
            SetInputRequest,
            AskRequest,
            // Catalog
            QuickQuestionView,
            PathwayView,
            // Debug
            DebugInfo,
            // Error
            ErrorResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "Session", description = "Pending input, asking, and history"),
        (name = "Catalog", description = "Quick questions and career pathways"),
        (name = "Debug", description = "Configuration introspection")
    )
)]
pub struct CompanionApiDoc;
