use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

/// Structured analysis of a single transcript.
///
/// This is the payload the completion backend is asked to produce and the
/// value held by the result store. It is never mutated after insertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptAnalysis {
    pub summary: String,
    pub next_actions: Vec<String>,
}

impl TranscriptAnalysis {
    pub fn new(summary: impl Into<String>, next_actions: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            next_actions,
        }
    }
}

/// Wire shape returned for a stored analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub id: String,
    pub summary: String,
    pub next_actions: Vec<String>,
}

impl AnalysisResponse {
    pub fn new(id: ObjectId, analysis: TranscriptAnalysis) -> Self {
        Self {
            id: id.into_string(),
            summary: analysis.summary,
            next_actions: analysis.next_actions,
        }
    }

    /// The stored payload without its id.
    pub fn analysis(&self) -> TranscriptAnalysis {
        TranscriptAnalysis::new(self.summary.clone(), self.next_actions.clone())
    }
}

/// Request body for submitting many transcripts at once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTranscriptRequest {
    pub transcripts: Vec<String>,
}
