use async_trait::async_trait;
use common::{
    domain::{entities::document::DocumentType, metric::FetchWindow},
    helper::error_chain_fmt,
};
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;

/// Provider of raw health metrics
///
/// Retry and backoff, if any, belong to the implementation: the worker
/// aborts its run on the first error.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Fetches the raw body of `document_type` for `window`.
    ///
    /// Returns `FetchError::Cancelled` if `cancel_token` fires before the
    /// provider answers.
    async fn fetch(
        &self,
        document_type: DocumentType,
        window: FetchWindow,
        cancel_token: &CancellationToken,
    ) -> Result<JsonValue, FetchError>;
}

#[derive(thiserror::Error)]
pub enum FetchError {
    #[error("Provider access token expired or was revoked: {0}")]
    AuthExpired(String),
    #[error("Provider rate limit reached: {0}")]
    RateLimited(String),
    #[error("Provider has no data for this request: {0}")]
    NotFound(String),
    #[error("Provider rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Provider request failed: {0}")]
    Transient(String),
    #[error("Provider response is not valid JSON: {0}")]
    InvalidBody(String),
    #[error("Fetch was cancelled")]
    Cancelled,
}

impl std::fmt::Debug for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
