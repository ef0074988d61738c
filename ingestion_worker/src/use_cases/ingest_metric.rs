use std::{marker::PhantomData, sync::Arc};

use chrono::NaiveDate;
use common::{domain::metric::Metric, ports::document_store::DocumentStore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    domain::{
        entities::ingestion_run::{RunOutcome, WorkerError, WorkerState},
        services::document_mapper::map_raw,
    },
    ports::metric_source::MetricSource,
};

/// One fetch -> map -> persist cycle for the metric domain `M`.
///
/// `run` consumes the worker: a worker executes at most once. It never loops
/// and never stops the process itself; the caller turns the returned
/// `RunOutcome` into an exit status.
pub struct IngestionWorker<M: Metric> {
    source: Arc<dyn MetricSource>,
    store: Arc<dyn DocumentStore>,
    /// Day the run happens on, the fetch window is derived from it
    today: NaiveDate,
    state: WorkerState,
    metric: PhantomData<M>,
}

impl<M: Metric> IngestionWorker<M> {
    pub fn new(
        source: Arc<dyn MetricSource>,
        store: Arc<dyn DocumentStore>,
        today: NaiveDate,
    ) -> Self {
        Self {
            source,
            store,
            today,
            state: WorkerState::Idle,
            metric: PhantomData,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Runs the cycle to a terminal state.
    ///
    /// Cancellation is advisory: it is honoured while waiting on the provider
    /// and between steps, but a persisting step that has started creates all
    /// of its documents.
    #[tracing::instrument(
        name = "Running ingestion worker",
        skip(self, cancel_token),
        fields(document_type = %M::DOCUMENT_TYPE, today = %self.today)
    )]
    pub async fn run(mut self, cancel_token: CancellationToken) -> RunOutcome {
        let mut persisted = 0;

        match self.execute(&cancel_token, &mut persisted).await {
            Ok(()) => {
                self.transition(WorkerState::Completed);
                info!(persisted, "Ingestion run completed");
                RunOutcome::Completed { persisted }
            }
            Err(error) => {
                let step = self.state;
                self.transition(WorkerState::Failed);
                error!(
                    step = %step,
                    persisted,
                    error.message = %error,
                    error.details = ?error,
                    "Ingestion run failed"
                );
                RunOutcome::Failed {
                    step,
                    persisted,
                    error,
                }
            }
        }
    }

    async fn execute(
        &mut self,
        cancel_token: &CancellationToken,
        persisted: &mut usize,
    ) -> Result<(), WorkerError> {
        self.enter(WorkerState::Fetching, cancel_token)?;
        let window = M::fetch_window(self.today);
        let raw = self
            .source
            .fetch(M::DOCUMENT_TYPE, window, cancel_token)
            .await?;

        self.enter(WorkerState::Mapping, cancel_token)?;
        let documents = map_raw::<M>(&window, raw)?;
        info!(
            window = %window,
            documents = documents.len(),
            "Mapped provider response"
        );

        self.enter(WorkerState::Persisting, cancel_token)?;
        // Sequential on purpose: the first failure stops the run
        for document in &documents {
            self.store
                .create_document(document, M::DOCUMENT_TYPE)
                .await?;
            *persisted += 1;
        }

        Ok(())
    }

    /// Moves to the next step unless the run was cancelled in between
    fn enter(
        &mut self,
        next: WorkerState,
        cancel_token: &CancellationToken,
    ) -> Result<(), WorkerError> {
        if cancel_token.is_cancelled() {
            return Err(WorkerError::Cancelled(next));
        }
        self.transition(next);
        Ok(())
    }

    fn transition(&mut self, next: WorkerState) {
        debug!(from = %self.state, to = %next, "Worker state transition");
        self.state = next;
    }
}
