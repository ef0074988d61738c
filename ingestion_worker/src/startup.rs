use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use common::{
    domain::{
        entities::document::DocumentType,
        metric::{ActivityMetric, FoodMetric, Metric, SleepMetric, WeightMetric},
    },
    helper::error_chain_fmt,
    ports::document_store::DocumentStore,
    repositories::document_store_setup::set_up_document_store,
};
use sqlx::migrate::MigrateError;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    configuration::Settings,
    domain::entities::ingestion_run::RunOutcome,
    ports::metric_source::MetricSource,
    repositories::metric_source_http_repository::MetricSourceHttpRepository,
    use_cases::ingest_metric::IngestionWorker,
};

/// Holds the clients of one worker process
pub struct Application {
    domain: DocumentType,
    source: Arc<dyn MetricSource>,
    store: Arc<dyn DocumentStore>,
}

impl Application {
    #[tracing::instrument(name = "Building worker application")]
    pub async fn build(settings: Settings) -> Result<Self, ApplicationError> {
        let source = MetricSourceHttpRepository::from_settings(&settings.metric_source)?;
        let store = set_up_document_store(&settings.document_store, &settings.database).await?;

        Ok(Self::with_clients(
            settings.worker.domain,
            Arc::new(source),
            store,
        ))
    }

    pub fn with_clients(
        domain: DocumentType,
        source: Arc<dyn MetricSource>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            domain,
            source,
            store,
        }
    }

    pub fn domain(&self) -> DocumentType {
        self.domain
    }

    /// Performs a single ingestion run of the configured domain for today's date
    ///
    /// `self` is moved: an application runs once.
    pub async fn run(self, cancel_token: CancellationToken) -> RunOutcome {
        let today = Utc::now().date_naive();
        self.run_for(today, cancel_token).await
    }

    /// Same as `run`, with the run date supplied by the caller
    pub async fn run_for(self, today: NaiveDate, cancel_token: CancellationToken) -> RunOutcome {
        info!(domain = %self.domain, %today, "📡 Starting ingestion run");

        match self.domain {
            DocumentType::Activity => self.worker::<ActivityMetric>(today).run(cancel_token).await,
            DocumentType::Sleep => self.worker::<SleepMetric>(today).run(cancel_token).await,
            DocumentType::Weight => self.worker::<WeightMetric>(today).run(cancel_token).await,
            DocumentType::Food => self.worker::<FoodMetric>(today).run(cancel_token).await,
        }
    }

    fn worker<M: Metric>(&self, today: NaiveDate) -> IngestionWorker<M> {
        IngestionWorker::new(self.source.clone(), self.store.clone(), today)
    }
}

#[derive(thiserror::Error)]
pub enum ApplicationError {
    #[error("Failed to build the metric source HTTP client: {0}")]
    HttpClientError(#[from] reqwest::Error),
    #[error("Failed to migrate the document store: {0}")]
    MigrationError(#[from] MigrateError),
}

impl std::fmt::Debug for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
