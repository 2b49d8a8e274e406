//! Configuration management for Career Companion
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::sanitize::SanitizerConfig;

/// Default IBM Cloud IAM token endpoint
pub const DEFAULT_IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// IBM Cloud API key exchanged for bearer tokens
    pub api_key: String,
    /// IAM identity endpoint used for the key exchange
    pub iam_token_url: String,
    /// Reuse bearer tokens until shortly before they expire
    pub token_cache_enabled: bool,

    /// watsonx.ai deployment identifier
    pub deployment_id: String,
    /// Deployment region (e.g. `us-south`)
    pub region: String,
    /// Value of the `version` query parameter
    pub api_version: String,
    /// Machine learning API base URL, derived from the region unless overridden
    pub ml_base_url: String,
    /// Timeout for a single completion request (in seconds)
    pub model_timeout_seconds: u64,

    /// Markers and thresholds for cleaning model answers
    pub sanitizer: SanitizerConfig,

    /// Enable the debug information endpoint
    pub debug_enabled: bool,
    /// Shared key for the API docs; docs are open when unset
    pub docs_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let region = env::var("WATSONX_REGION").unwrap_or_else(|_| "us-south".to_string());
        let ml_base_url = env::var("WATSONX_ML_URL")
            .unwrap_or_else(|_| default_ml_base_url(&region));

        let mut sanitizer = SanitizerConfig::default();
        if let Ok(markers) = env::var("SANITIZER_BOILERPLATE_MARKERS") {
            sanitizer.boilerplate_markers = split_markers(&markers);
        }
        if let Ok(markers) = env::var("SANITIZER_CONTENT_MARKERS") {
            sanitizer.content_markers = split_markers(&markers);
        }
        if let Ok(min_length) = env::var("SANITIZER_MIN_LENGTH") {
            sanitizer.min_length = min_length
                .parse()
                .context("Invalid SANITIZER_MIN_LENGTH")?;
        }

        Ok(Self {
            host: env::var("COMPANION_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("COMPANION_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid COMPANION_PORT")?,

            api_key: env::var("WATSONX_API_KEY").context("WATSONX_API_KEY must be set")?,
            iam_token_url: env::var("IAM_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_IAM_TOKEN_URL.to_string()),
            token_cache_enabled: flag("TOKEN_CACHE_ENABLED"),

            deployment_id: env::var("WATSONX_DEPLOYMENT_ID")
                .context("WATSONX_DEPLOYMENT_ID must be set")?,
            region,
            api_version: env::var("WATSONX_API_VERSION")
                .unwrap_or_else(|_| "2021-05-01".to_string()),
            ml_base_url: ml_base_url.trim_end_matches('/').to_string(),
            model_timeout_seconds: env::var("MODEL_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid MODEL_TIMEOUT_SECONDS")?,

            sanitizer,

            debug_enabled: flag("COMPANION_DEBUG"),
            docs_key: env::var("COMPANION_DOCS_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
        })
    }

    /// Deployment endpoint without the version query parameter
    pub fn deployment_endpoint(&self) -> String {
        format!(
            "{}/ml/v4/deployments/{}/ai_service",
            self.ml_base_url, self.deployment_id
        )
    }

    /// Full deployment URL as it appears on the wire
    pub fn deployment_url(&self) -> String {
        format!("{}?version={}", self.deployment_endpoint(), self.api_version)
    }
}

fn default_ml_base_url(region: &str) -> String {
    format!("https://{}.ml.cloud.ibm.com", region)
}

fn flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Split a `|`-separated marker list, dropping blanks
fn split_markers(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
