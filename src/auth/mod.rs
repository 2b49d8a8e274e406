//! Bearer token acquisition
//!
//! The deployment only accepts short-lived IAM bearer tokens, which are
//! obtained by exchanging the long-lived API key. By default a fresh token is
//! fetched for every model call; [`CachedTokenProvider`] can be layered on top
//! to reuse a token until it is about to expire.

pub mod cache;
pub mod iam;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use cache::CachedTokenProvider;
pub use iam::IamTokenProvider;

/// Failure to obtain a bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("identity response could not be parsed: {0}")]
    InvalidBody(String),

    #[error("identity response did not contain an access_token")]
    MissingToken,
}

/// A bearer token together with its reported expiry
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Wrap a token string; empty tokens are rejected
    pub fn new(secret: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(Self { secret, expires_at })
    }

    /// The raw token value, for the Authorization header only
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the token remains valid for at least `margin` from `now`
    ///
    /// Tokens without a known expiry are never considered fresh.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at
            .map(|expires_at| now + margin < expires_at)
            .unwrap_or(false)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of bearer tokens for the model deployment
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Obtain a token valid for one model call
    async fn fetch_token(&self) -> Result<AccessToken, AuthError>;
}

/// Short SHA-256 fingerprint of an API key, safe to log or display
pub fn key_fingerprint(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}
