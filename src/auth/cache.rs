//! Expiry-aware token reuse
//!
//! Wraps another [`TokenProvider`] and hands out the same token until it is
//! within the refresh margin of its reported expiry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::auth::{AccessToken, AuthError, TokenProvider};

/// Default margin before expiry at which a cached token is replaced
pub const DEFAULT_REFRESH_MARGIN_SECONDS: i64 = 60;

/// Caching wrapper around a token provider
pub struct CachedTokenProvider {
    inner: Arc<dyn TokenProvider>,
    slot: Mutex<Option<AccessToken>>,
    refresh_margin: Duration,
}

impl CachedTokenProvider {
    pub fn new(inner: Arc<dyn TokenProvider>) -> Self {
        Self::with_margin(inner, Duration::seconds(DEFAULT_REFRESH_MARGIN_SECONDS))
    }

    pub fn with_margin(inner: Arc<dyn TokenProvider>, refresh_margin: Duration) -> Self {
        Self {
            inner,
            slot: Mutex::new(None),
            refresh_margin,
        }
    }
}

#[async_trait]
impl TokenProvider for CachedTokenProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        // Held across the fetch so concurrent callers share one exchange
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_fresh_at(Utc::now(), self.refresh_margin) {
                debug!(provider = self.inner.name(), "Token cache hit");
                return Ok(token.clone());
            }
        }

        debug!(provider = self.inner.name(), "Token cache miss");
        let token = self.inner.fetch_token().await?;

        // Tokens without a known expiry are not worth keeping
        *slot = token.expires_at().map(|_| token.clone());

        Ok(token)
    }
}
