use thiserror::Error;

use scribe_llm::LlmError;
use scribe_types::ObjectId;

/// Failures of a single executor invocation.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The completion backend failed.
    #[error("completion failed: {0}")]
    Upstream(#[from] LlmError),

    /// The response could not be parsed into the requested shape.
    #[error("response does not match {shape}: {reason}")]
    MalformedResponse { shape: String, reason: String },

    /// The blocking variant could not start its runtime.
    #[error("failed to start blocking runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// The blocking variant was called from inside an async runtime.
    #[error("blocking invocation attempted inside an async runtime")]
    BlockingInAsync,
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Errors surfaced by [`AnalysisService`](crate::AnalysisService).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("Failed to store analysis: {0}")]
    Store(String),

    /// The store could not answer a lookup.
    #[error("{0}")]
    Load(String),

    #[error("analysis not found: {0}")]
    NotFound(ObjectId),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
