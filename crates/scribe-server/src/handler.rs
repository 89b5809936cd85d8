use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use scribe_analysis::BatchReport;
use scribe_types::{AnalysisResponse, BatchTranscriptRequest, ObjectId};

use crate::error::ServerResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub transcript: String,
}

/// One position of a batch report.
#[derive(Debug, Serialize)]
pub struct BatchItemView {
    pub index: usize,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchReportView {
    pub results: Vec<BatchItemView>,
    pub failed: usize,
}

impl From<BatchReport> for BatchReportView {
    fn from(report: BatchReport) -> Self {
        let failed = report.failed_count();
        let results = report
            .into_items()
            .into_iter()
            .map(|item| {
                let status = item.state().to_string();
                match item.result {
                    Ok(analysis) => BatchItemView {
                        index: item.index,
                        status,
                        analysis: Some(analysis),
                        error: None,
                    },
                    Err(failure) => BatchItemView {
                        index: item.index,
                        status,
                        analysis: None,
                        error: Some(failure.to_string()),
                    },
                }
            })
            .collect();
        Self { results, failed }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "scribe-server",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.service.executor().provider(),
    }))
}

/// `GET /transcripts/analyze?transcript=...`
pub async fn analyze_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> ServerResult<Json<AnalysisResponse>> {
    let response = state.service.analyze(&params.transcript).await?;
    Ok(Json(response))
}

/// `GET /transcripts/analysis/:id`
pub async fn get_analysis_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<AnalysisResponse>> {
    let response = state.service.fetch(&ObjectId::from(id))?;
    Ok(Json(response))
}

/// `POST /transcripts/analyze/batch`
///
/// All-or-nothing: any failed item turns the whole response into an error,
/// although every successful item has already been stored.
pub async fn batch_handler(
    State(state): State<AppState>,
    Json(payload): Json<BatchTranscriptRequest>,
) -> ServerResult<Json<Vec<AnalysisResponse>>> {
    let report = state.service.batch(payload.transcripts).await?;
    Ok(Json(report.into_all_or_nothing()?))
}

/// `POST /transcripts/analyze/batch/report`
pub async fn batch_report_handler(
    State(state): State<AppState>,
    Json(payload): Json<BatchTranscriptRequest>,
) -> ServerResult<Json<BatchReportView>> {
    let report = state.service.batch(payload.transcripts).await?;
    Ok(Json(report.into()))
}
