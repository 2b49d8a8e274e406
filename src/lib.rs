//! Career Companion - career-advice chat over a hosted watsonx.ai deployment
//!
//! This library provides the core of the companion: bearer token
//! acquisition, the deployment client, answer sanitizing, and the
//! in-memory conversation session, plus the HTTP API that presents them.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod sanitize;
pub mod session;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::info;

pub use crate::auth::{CachedTokenProvider, IamTokenProvider, TokenProvider};
pub use crate::config::Config;
pub use crate::model::{ChatModel, ModelClient, ModelResponse};
pub use crate::sanitize::Sanitizer;
pub use crate::session::{ConversationEntry, Session};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Answers questions; the deployment client in production
    pub model: Arc<dyn ChatModel>,
    /// The single session served by this process
    pub session: Mutex<Session>,
}

impl AppState {
    /// Create a new application state wired to the real deployment
    pub fn new(config: Config) -> Result<Self> {
        // No client-wide timeout: only the completion request is bounded
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let iam: Arc<dyn TokenProvider> =
            Arc::new(IamTokenProvider::new(http_client.clone(), &config));
        let tokens: Arc<dyn TokenProvider> = if config.token_cache_enabled {
            info!("Bearer token cache enabled");
            Arc::new(CachedTokenProvider::new(iam))
        } else {
            iam
        };

        let sanitizer =
            Sanitizer::new(config.sanitizer.clone()).context("Invalid sanitizer markers")?;

        let model: Arc<dyn ChatModel> = Arc::new(ModelClient::new(
            http_client,
            &config,
            tokens,
            sanitizer,
        ));

        Ok(Self::with_model(config, model))
    }

    /// Create an application state around any model, e.g. a scripted one in tests
    pub fn with_model(config: Config, model: Arc<dyn ChatModel>) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            model,
            session: Mutex::new(Session::new()),
        }
    }
}
