use thiserror::Error;

/// Errors surfaced by [`ApifyClient`](crate::ApifyClient) operations.
///
/// Every transport failure and every non-2xx response is reported as
/// [`ApifyError::Api`], prefixed with the operation that failed. Malformed
/// JSON in an otherwise successful response is a distinct [`ApifyError::Json`]
/// so callers can tell a broken wire payload apart from a rejected request.
#[derive(Error, Debug)]
pub enum ApifyError {
    /// The Apify API rejected the request or the transport failed.
    #[error("Failed to {operation}: {message}")]
    Api {
        operation: &'static str,
        message: String,
        /// HTTP status code, when one was observed.
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A success response carried a body that did not decode as JSON, or a
    /// webhook list could not be serialized for transmission.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The client could not be constructed from the given configuration.
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl ApifyError {
    /// Wrap a transport-level failure (DNS, connection, timeout) for `operation`.
    pub(crate) fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Api {
            operation,
            message: source.to_string(),
            status: source.status().map(|s| s.as_u16()),
            source: Some(source),
        }
    }

    /// Wrap a non-2xx response for `operation`, keeping the status and a
    /// body excerpt for diagnostics.
    pub(crate) fn status(operation: &'static str, status: u16, body: &str) -> Self {
        let mut excerpt = body.trim().to_string();
        if excerpt.len() > 200 {
            excerpt.truncate(200);
        }
        let message = if excerpt.is_empty() {
            format!("server returned status {status}")
        } else {
            format!("server returned status {status}: {excerpt}")
        };
        Self::Api {
            operation,
            message,
            status: Some(status),
            source: None,
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// The HTTP status code associated with this error, if one was observed.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}
