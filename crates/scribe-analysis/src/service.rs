use std::sync::Arc;

use tracing::{info, instrument, warn};

use scribe_llm::Completion;
use scribe_store::Outcome;
use scribe_types::{AnalysisResponse, ObjectId, TranscriptAnalysis};

use crate::batch::{BatchOrchestrator, BatchReport};
use crate::error::{ServiceError, ServiceResult};
use crate::executor::AnalysisExecutor;
use crate::SharedStore;

const EMPTY_TRANSCRIPT: &str = "Transcript cannot be empty";
const EMPTY_BATCH: &str = "Transcripts list cannot be empty";

/// High-level analysis API shared by the HTTP layer and the CLI.
///
/// The single-item path calls the executor and the store directly; the
/// batch path goes through [`BatchOrchestrator`].
#[derive(Clone)]
pub struct AnalysisService {
    executor: Arc<AnalysisExecutor>,
    store: SharedStore,
    orchestrator: BatchOrchestrator,
}

impl AnalysisService {
    pub fn new(completion: Arc<dyn Completion>, store: SharedStore) -> Self {
        let executor = Arc::new(AnalysisExecutor::new(completion));
        let orchestrator = BatchOrchestrator::new(Arc::clone(&executor), Arc::clone(&store));
        Self {
            executor,
            store,
            orchestrator,
        }
    }

    pub fn executor(&self) -> &AnalysisExecutor {
        &self.executor
    }

    /// Analyze one transcript and store the result.
    #[instrument(skip_all, fields(chars = transcript.len()))]
    pub async fn analyze(&self, transcript: &str) -> ServiceResult<AnalysisResponse> {
        validate_transcript(transcript)?;
        let analysis = self.executor.analyze(transcript).await?;
        self.persist(analysis)
    }

    /// Blocking twin of [`analyze`](Self::analyze). Must not be called from
    /// inside an async runtime.
    pub fn analyze_blocking(&self, transcript: &str) -> ServiceResult<AnalysisResponse> {
        validate_transcript(transcript)?;
        let analysis = self.executor.analyze_blocking(transcript)?;
        self.persist(analysis)
    }

    /// Look up a previously stored analysis.
    pub fn fetch(&self, id: &ObjectId) -> ServiceResult<AnalysisResponse> {
        match self.store.load(id) {
            Outcome::Success {
                id,
                data: Some(analysis),
            } => Ok(AnalysisResponse::new(id, analysis)),
            Outcome::NotFound { id } => Err(ServiceError::NotFound(id)),
            other => {
                let message = other.message().unwrap_or("Internal error").to_string();
                warn!(id = %other.id(), error = %message, "load failed");
                Err(ServiceError::Load(message))
            }
        }
    }

    /// Analyze many transcripts concurrently, reporting every position.
    ///
    /// An empty list is rejected before anything runs.
    pub async fn batch(&self, transcripts: Vec<String>) -> ServiceResult<BatchReport> {
        if transcripts.is_empty() {
            return Err(ServiceError::Validation(EMPTY_BATCH.into()));
        }
        Ok(self.orchestrator.run(transcripts).await)
    }

    fn persist(&self, analysis: TranscriptAnalysis) -> ServiceResult<AnalysisResponse> {
        match self.store.store(analysis.clone()) {
            Outcome::Success { id, .. } => {
                info!(id = %id, "analysis stored");
                Ok(AnalysisResponse::new(id, analysis))
            }
            other => {
                let message = other
                    .message()
                    .unwrap_or("Failed to store analysis")
                    .to_string();
                warn!(error = %message, "store failed");
                Err(ServiceError::Store(message))
            }
        }
    }
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("executor", &self.executor)
            .finish()
    }
}

fn validate_transcript(transcript: &str) -> ServiceResult<()> {
    if transcript.trim().is_empty() {
        return Err(ServiceError::Validation(EMPTY_TRANSCRIPT.into()));
    }
    Ok(())
}
