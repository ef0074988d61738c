use common::{helper::error_chain_fmt, ports::document_store::DocumentStoreError};

use crate::{domain::services::document_mapper::MappingError, ports::metric_source::FetchError};

/// States of one ingestion run
///
/// `Idle -> Fetching -> Mapping -> Persisting -> Completed`, or `Failed` from
/// any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Fetching,
    Mapping,
    Persisting,
    Completed,
    Failed,
}

impl WorkerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerState::Idle => "idle",
            WorkerState::Fetching => "fetching",
            WorkerState::Mapping => "mapping",
            WorkerState::Persisting => "persisting",
            WorkerState::Completed => "completed",
            WorkerState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Completed | WorkerState::Failed)
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of a run, observed by the process driver
#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        persisted: usize,
    },
    Failed {
        /// State the run was in when the error happened
        step: WorkerState,
        /// Documents created before the failure, they are not rolled back
        persisted: usize,
        error: WorkerError,
    },
}

impl RunOutcome {
    pub fn state(&self) -> WorkerState {
        match self {
            RunOutcome::Completed { .. } => WorkerState::Completed,
            RunOutcome::Failed { .. } => WorkerState::Failed,
        }
    }

    pub fn persisted(&self) -> usize {
        match self {
            RunOutcome::Completed { persisted } | RunOutcome::Failed { persisted, .. } => {
                *persisted
            }
        }
    }

    /// Process exit status: 0 on `Completed`, 1 on `Failed`
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Completed { .. } => 0,
            RunOutcome::Failed { .. } => 1,
        }
    }
}

#[derive(thiserror::Error)]
pub enum WorkerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
    #[error("Run was cancelled before {0}")]
    Cancelled(WorkerState),
}

impl std::fmt::Debug for WorkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
