//! IBM Cloud IAM token exchange
//!
//! Exchanges an API key for a bearer token with a single form-encoded POST.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::{
    auth::{AccessToken, AuthError, TokenProvider},
    config::Config,
};

/// Grant type for API key exchange
pub const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Body returned by the identity endpoint
#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: Option<String>,
    /// Lifetime in seconds
    expires_in: Option<i64>,
    /// Expiry as a unix timestamp
    expiration: Option<i64>,
}

impl IamTokenResponse {
    fn expires_at(&self, issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.expiration
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .or_else(|| {
                // Out-of-range lifetimes leave the expiry unknown
                self.expires_in
                    .and_then(Duration::try_seconds)
                    .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            })
    }
}

/// Token provider backed by the IAM identity endpoint
pub struct IamTokenProvider {
    client: reqwest::Client,
    token_url: String,
    api_key: String,
}

impl IamTokenProvider {
    /// Create a new IAM token provider
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            token_url: config.iam_token_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Exchange an API key for a bearer token
    ///
    /// Sends exactly one request. No timeout is applied beyond the client's own.
    #[instrument(skip(self, api_key), fields(token_url = %self.token_url))]
    pub async fn exchange(&self, api_key: &str) -> Result<AccessToken, AuthError> {
        debug!("Requesting bearer token from IAM");
        metrics::counter!("companion_token_fetches_total").increment(1);

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("apikey", api_key), ("grant_type", APIKEY_GRANT_TYPE)])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to IAM");
                e
            })?;

        let status = response.status();
        debug!(status = %status, "IAM response status");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "IAM token request failed");
            return Err(AuthError::Status { status, body });
        }

        let issued_at = Utc::now();
        let body = response.text().await?;
        let parsed: IamTokenResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "Failed to parse IAM token response");
                return Err(AuthError::InvalidBody(e.to_string()));
            }
        };

        let expires_at = parsed.expires_at(issued_at);
        let token = AccessToken::new(parsed.access_token.unwrap_or_default(), expires_at)?;

        debug!(expires_at = ?token.expires_at(), "Obtained bearer token");
        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for IamTokenProvider {
    fn name(&self) -> &'static str {
        "ibm-iam"
    }

    async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        self.exchange(&self.api_key).await
    }
}
