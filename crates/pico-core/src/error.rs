//! Core error type for the pico-maps adapters.
//!
//! `AdapterError` is produced by the workflow pipe, the location tool and the
//! config loader. None of these errors propagate past the operation that
//! produced them: the pipe turns them into a terminal status event plus an
//! error result, the tool turns them into a human-readable text.
//!
//! When the `axum` feature is enabled, each variant also maps to an HTTP
//! status code for use by HTTP adapters.

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// A required setting (e.g. the Maps API key) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure, timeout or non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream JSON is missing an expected key or is not JSON at all.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The conversation body carried no messages.
    #[error("No messages found in the request body")]
    NoInput,

    /// The config file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        AdapterError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(e: serde_json::Error) -> Self {
        AdapterError::MalformedResponse(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// axum integration (opt-in via feature flag)
// ---------------------------------------------------------------------------

#[cfg(feature = "axum")]
impl AdapterError {
    /// HTTP status an adapter should answer with when surfacing this error.
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            AdapterError::Configuration(_) | AdapterError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AdapterError::Network(_) | AdapterError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AdapterError::NoInput => StatusCode::BAD_REQUEST,
        }
    }
}
