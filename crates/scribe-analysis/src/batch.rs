use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use scribe_store::Outcome;
use scribe_types::AnalysisResponse;

use crate::error::ExecutorError;
use crate::executor::AnalysisExecutor;
use crate::SharedStore;

/// Lifecycle of one batch item.
///
/// `Pending -> Executing -> {Stored | ExecutionFailed | StoreFailed}`.
/// There are no transitions out of the three terminal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemState {
    Pending,
    Executing,
    Stored,
    ExecutionFailed,
    StoreFailed,
}

impl ItemState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stored | Self::ExecutionFailed | Self::StoreFailed)
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Executing => write!(f, "executing"),
            Self::Stored => write!(f, "stored"),
            Self::ExecutionFailed => write!(f, "execution_failed"),
            Self::StoreFailed => write!(f, "store_failed"),
        }
    }
}

/// Why a single batch item failed.
#[derive(Debug, Error)]
pub enum ItemFailure {
    /// The transcript was blank; the executor was never called.
    #[error("Transcript cannot be empty")]
    Validation,

    #[error(transparent)]
    Execution(#[from] ExecutorError),

    /// Carries the store's own message, which is logged but not displayed.
    #[error("Failed to store analysis")]
    Store(String),

    /// The item's task panicked or was cancelled by the runtime.
    #[error("analysis task aborted: {0}")]
    Aborted(String),
}

impl ItemFailure {
    /// Terminal state this failure leaves the item in.
    pub fn state(&self) -> ItemState {
        match self {
            Self::Store(_) => ItemState::StoreFailed,
            _ => ItemState::ExecutionFailed,
        }
    }
}

/// Result for one input position.
#[derive(Debug)]
pub struct ItemOutcome {
    pub index: usize,
    pub result: Result<AnalysisResponse, ItemFailure>,
}

impl ItemOutcome {
    pub fn state(&self) -> ItemState {
        match &self.result {
            Ok(_) => ItemState::Stored,
            Err(failure) => failure.state(),
        }
    }
}

/// Aggregate failure for the all-or-nothing batch contract.
///
/// Displays as the message of the reported item so callers see the same
/// text a single-item failure would produce.
#[derive(Debug, Error)]
#[error("{failure}")]
pub struct BatchError {
    /// Position of the reported failure.
    pub index: usize,
    pub failure: ItemFailure,
    /// How many items failed in total.
    pub failed: usize,
    pub total: usize,
}

/// Per-position outcomes of one batch run, in input order.
#[derive(Debug)]
pub struct BatchReport {
    items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn items(&self) -> &[ItemOutcome] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ItemOutcome> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_err()).count()
    }

    /// Lowest input position that failed.
    pub fn first_failure(&self) -> Option<usize> {
        self.items.iter().position(|i| i.result.is_err())
    }

    /// Collapse into the all-or-nothing contract.
    ///
    /// Any failed item turns the whole batch into one [`BatchError`] for the
    /// lowest failing position. Items that succeeded stay in the store
    /// regardless and remain loadable by id.
    pub fn into_all_or_nothing(self) -> Result<Vec<AnalysisResponse>, BatchError> {
        let total = self.items.len();
        let failed = self.failed_count();
        let mut responses = Vec::with_capacity(total);
        for item in self.items {
            match item.result {
                Ok(response) => responses.push(response),
                Err(failure) => {
                    return Err(BatchError {
                        index: item.index,
                        failure,
                        failed,
                        total,
                    })
                }
            }
        }
        Ok(responses)
    }
}

/// Runs many transcript analyses concurrently and gathers their outcomes.
///
/// Every item is spawned onto the runtime immediately with no concurrency
/// cap. Items are independent: a failing item never cancels or alters its
/// siblings, and each success is stored as soon as its analysis finishes.
#[derive(Clone)]
pub struct BatchOrchestrator {
    executor: Arc<AnalysisExecutor>,
    store: SharedStore,
}

impl BatchOrchestrator {
    pub fn new(executor: Arc<AnalysisExecutor>, store: SharedStore) -> Self {
        Self { executor, store }
    }

    /// Analyze and store every transcript, returning one outcome per input.
    #[instrument(skip_all, fields(items = transcripts.len()))]
    pub async fn run(&self, transcripts: Vec<String>) -> BatchReport {
        let handles: Vec<(usize, JoinHandle<Result<AnalysisResponse, ItemFailure>>)> = transcripts
            .into_iter()
            .enumerate()
            .map(|(index, transcript)| {
                let executor = Arc::clone(&self.executor);
                let store = Arc::clone(&self.store);
                debug!(index, state = %ItemState::Pending, "item queued");
                let handle = tokio::spawn(async move {
                    process_item(&executor, &store, index, &transcript).await
                });
                (index, handle)
            })
            .collect();

        // All items are already running; awaiting in order only fixes the
        // order results are collected in.
        let mut items = Vec::with_capacity(handles.len());
        for (index, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!(index, error = %e, "analysis task aborted");
                    Err(ItemFailure::Aborted(e.to_string()))
                }
            };
            items.push(ItemOutcome { index, result });
        }

        let report = BatchReport { items };
        info!(
            total = report.len(),
            failed = report.failed_count(),
            "batch complete"
        );
        report
    }
}

impl fmt::Debug for BatchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchOrchestrator")
            .field("executor", &self.executor)
            .finish()
    }
}

async fn process_item(
    executor: &AnalysisExecutor,
    store: &SharedStore,
    index: usize,
    transcript: &str,
) -> Result<AnalysisResponse, ItemFailure> {
    if transcript.trim().is_empty() {
        warn!(index, state = %ItemState::ExecutionFailed, "blank transcript");
        return Err(ItemFailure::Validation);
    }

    debug!(index, state = %ItemState::Executing, "analysis started");
    let analysis = match executor.analyze(transcript).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(index, state = %ItemState::ExecutionFailed, error = %e, "analysis failed");
            return Err(e.into());
        }
    };

    match store.store(analysis.clone()) {
        Outcome::Success { id, .. } => {
            debug!(index, id = %id, state = %ItemState::Stored, "analysis stored");
            Ok(AnalysisResponse::new(id, analysis))
        }
        other => {
            let message = other.message().unwrap_or("unknown store failure").to_string();
            warn!(index, state = %ItemState::StoreFailed, error = %message, "store failed");
            Err(ItemFailure::Store(message))
        }
    }
}
