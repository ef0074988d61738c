use async_trait::async_trait;
use common::domain::{entities::document::DocumentType, metric::FetchWindow};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    configuration::MetricSourceSettings,
    ports::metric_source::{FetchError, MetricSource},
};

/// Metric source backed by the provider's REST API
pub struct MetricSourceHttpRepository {
    client: reqwest::Client,
    base_url: String,
    access_token: Secret<String>,
}

impl MetricSourceHttpRepository {
    pub fn new(client: reqwest::Client, base_url: &str, access_token: Secret<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Builds the repository with a client whose requests time out after `settings.timeout_ms`
    pub fn from_settings(settings: &MetricSourceSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;

        Ok(Self::new(
            client,
            &settings.base_url,
            settings.access_token.clone(),
        ))
    }

    pub fn url(&self, document_type: DocumentType, window: &FetchWindow) -> String {
        format!("{}{}", self.base_url, endpoint_path(document_type, window))
    }
}

/// Path of the provider resource holding `document_type` for `window`
///
/// Only weight is served over a date range. The other domains are daily
/// resources and are requested for the window's as-of date.
pub fn endpoint_path(document_type: DocumentType, window: &FetchWindow) -> String {
    let day = window.as_of();
    match document_type {
        DocumentType::Activity => format!("/1/user/-/activities/date/{}.json", day),
        DocumentType::Sleep => format!("/1.2/user/-/sleep/date/{}.json", day),
        DocumentType::Weight => format!(
            "/1/user/-/body/log/weight/date/{}/{}.json",
            window.start(),
            day
        ),
        DocumentType::Food => format!("/1/user/-/foods/log/date/{}.json", day),
    }
}

/// Sorts a non-success provider answer into a fetch error kind
pub fn error_from_status(status: u16, body: String) -> FetchError {
    match status {
        401 => FetchError::AuthExpired(body),
        404 => FetchError::NotFound(body),
        429 => FetchError::RateLimited(body),
        status => FetchError::Rejected { status, body },
    }
}

#[async_trait]
impl MetricSource for MetricSourceHttpRepository {
    #[tracing::instrument(name = "Fetching metric from provider", skip(self, cancel_token))]
    async fn fetch(
        &self,
        document_type: DocumentType,
        window: FetchWindow,
        cancel_token: &CancellationToken,
    ) -> Result<JsonValue, FetchError> {
        let url = self.url(document_type, &window);

        let request = self
            .client
            .get(&url)
            .bearer_auth(self.access_token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => return Err(FetchError::Cancelled),
            response = request => response.map_err(|e| FetchError::Transient(e.to_string()))?,
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transient(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(error_from_status(status.as_u16(), body));
        }

        info!(status = status.as_u16(), "Received provider response");

        serde_json::from_str(&body).map_err(|e| FetchError::InvalidBody(e.to_string()))
    }
}
