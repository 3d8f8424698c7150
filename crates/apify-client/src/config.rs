use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApifyError;

/// Default base URL for the Apify API v2.
pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`ApifyClient`](crate::ApifyClient).
///
/// Immutable once the client is constructed. The token is required; the base
/// URL and timeout have platform defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApifyConfig {
    /// API token used as a bearer credential on every request.
    pub api_token: String,
    /// Base URL all endpoint paths are resolved against. Normalized to end
    /// with `/` so relative joins keep the `/v2/` prefix.
    pub base_url: String,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
}

impl ApifyConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from the environment.
    ///
    /// Reads `APIFY_API_TOKEN` (required), `APIFY_BASE_URI` and
    /// `APIFY_TIMEOUT` (seconds, both optional).
    pub fn from_env() -> Result<Self, ApifyError> {
        let api_token = env::var("APIFY_API_TOKEN").map_err(|_| {
            ApifyError::config(
                "Apify API token is not configured. Please set APIFY_API_TOKEN in your environment.",
            )
        })?;

        let mut config = Self::new(api_token);

        if let Ok(base_url) = env::var("APIFY_BASE_URI") {
            config.base_url = base_url;
        }
        if let Ok(timeout) = env::var("APIFY_TIMEOUT") {
            let secs: u64 = timeout.parse().map_err(|_| {
                ApifyError::config(format!("APIFY_TIMEOUT is not a valid number of seconds: {timeout}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the client construction relies on.
    pub fn validate(&self) -> Result<(), ApifyError> {
        if self.api_token.trim().is_empty() {
            return Err(ApifyError::config(
                "Apify API token is not configured. Please set APIFY_API_TOKEN in your environment.",
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(ApifyError::config("base URL must not be empty"));
        }
        Ok(())
    }

    /// Base URL with a guaranteed trailing slash.
    pub(crate) fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}
