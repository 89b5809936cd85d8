//! Transcript analysis for Scribe.
//!
//! Wires a completion backend to the result store:
//!
//! - [`AnalysisExecutor`] runs one completion and parses it into a typed result
//! - [`BatchOrchestrator`] fans a list of transcripts out to concurrent
//!   executor calls, stores every success, and gathers per-item outcomes
//! - [`AnalysisService`] is the entry point used by the HTTP layer and CLI

pub mod batch;
pub mod error;
pub mod executor;
pub mod prompt;
pub mod service;

use std::sync::Arc;

use scribe_store::ResultStore;
use scribe_types::TranscriptAnalysis;

pub use batch::{BatchError, BatchOrchestrator, BatchReport, ItemFailure, ItemOutcome, ItemState};
pub use error::{ExecutorError, ExecutorResult, ServiceError, ServiceResult};
pub use executor::AnalysisExecutor;
pub use service::AnalysisService;

// Re-export key types
pub use scribe_types::{AnalysisResponse, ObjectId};

/// The process-wide analysis store shared by every request.
pub type SharedStore = Arc<dyn ResultStore<TranscriptAnalysis>>;
