//! Debug endpoint for development
//!
//! Only available when COMPANION_DEBUG=true. Shows where requests go and how
//! the client is set up, without exposing secrets.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::key_fingerprint,
    error::{AppError, AppResult, ErrorResponse},
    AppState,
};

/// Non-sensitive view of the deployment configuration
#[derive(Debug, Serialize, ToSchema)]
pub struct DebugInfo {
    /// Full completion URL, including the version parameter
    pub endpoint: String,
    #[schema(example = "non-streaming")]
    pub mode: String,
    pub region: String,
    pub api_version: String,
    pub iam_token_url: String,
    pub api_key_fingerprint: String,
    pub token_cache_enabled: bool,
    pub model_timeout_seconds: u64,
    pub sanitizer_min_length: usize,
}

/// Deployment and client configuration
#[utoipa::path(
    get,
    path = "/api/debug",
    tag = "Debug",
    responses(
        (status = 200, description = "Configuration summary", body = DebugInfo),
        (status = 404, description = "Debug endpoints disabled", body = ErrorResponse)
    )
)]
pub async fn debug_info(State(state): State<Arc<AppState>>) -> AppResult<Json<DebugInfo>> {
    if !state.config.debug_enabled {
        return Err(debug_disabled_error());
    }

    let config = &state.config;
    Ok(Json(DebugInfo {
        endpoint: config.deployment_url(),
        mode: "non-streaming".to_string(),
        region: config.region.clone(),
        api_version: config.api_version.clone(),
        iam_token_url: config.iam_token_url.clone(),
        api_key_fingerprint: key_fingerprint(&config.api_key),
        token_cache_enabled: config.token_cache_enabled,
        model_timeout_seconds: config.model_timeout_seconds,
        sanitizer_min_length: config.sanitizer.min_length,
    }))
}

fn debug_disabled_error() -> AppError {
    AppError::NotFound("Debug endpoints are disabled. Set COMPANION_DEBUG=true to enable.".to_string())
}
