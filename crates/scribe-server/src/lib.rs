//! HTTP server for Scribe.
//!
//! Exposes single-transcript analysis, batch submission, and lookup of
//! stored analyses by id. All routes share one [`AppState`] holding the
//! process-wide analysis service.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::ScribeServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use scribe_analysis::AnalysisService;
    use scribe_llm::{LlmError, ScriptedCompletion};
    use scribe_store::{InMemoryResultStore, Outcome, ResultStore, StoreError};
    use scribe_types::{ObjectId, TranscriptAnalysis};

    /// Echoes the transcript back as the summary; fails on "boom".
    fn completion() -> ScriptedCompletion {
        ScriptedCompletion::new(|_, user| {
            let transcript = user.split("\"\"\"").nth(1).map(str::trim).unwrap_or_default();
            if transcript == "boom" {
                return Err(LlmError::Scripted("upstream exploded".into()));
            }
            Ok(json!({"summary": transcript, "next_actions": ["a", "b"]}).to_string())
        })
    }

    fn app() -> Router {
        let store = Arc::new(InMemoryResultStore::<TranscriptAnalysis>::new());
        let service = AnalysisService::new(Arc::new(completion()), store);
        router::build_router(AppState::new(service), &ServerConfig::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(&app(), get("/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = send(&app(), get("/v1/info")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "scripted");
    }

    // -----------------------------------------------------------------------
    // Single item
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn analyze_then_lookup() {
        let app = app();
        let (status, created) = send(&app, get("/transcripts/analyze?transcript=hello%20world")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["summary"], "hello world");
        assert_eq!(created["next_actions"], json!(["a", "b"]));

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&app, get(&format!("/transcripts/analysis/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn blank_transcript_is_bad_request() {
        let (status, body) = send(&app(), get("/transcripts/analyze?transcript=%20%20")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Transcript cannot be empty");
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let (status, body) = send(&app(), get("/transcripts/analyze?transcript=boom")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["detail"].as_str().unwrap().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (status, body) = send(&app(), get("/transcripts/analysis/nonexistent-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Analysis not found");
    }

    // -----------------------------------------------------------------------
    // Batch
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn batch_returns_results_in_order() {
        let (status, body) = send(
            &app(),
            post_json("/transcripts/analyze/batch", json!({"transcripts": ["one", "two", "three"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        let summaries: Vec<&str> = items.iter().map(|i| i["summary"].as_str().unwrap()).collect();
        assert_eq!(summaries, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn empty_batch_is_bad_request() {
        let (status, body) = send(
            &app(),
            post_json("/transcripts/analyze/batch", json!({"transcripts": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Transcripts list cannot be empty");
    }

    #[tokio::test]
    async fn batch_with_blank_item_fails_but_report_shows_stored_siblings() {
        let app = app();
        let (status, body) = send(
            &app,
            post_json("/transcripts/analyze/batch", json!({"transcripts": ["", "valid transcript"]})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Transcript cannot be empty");

        let (status, report) = send(
            &app,
            post_json(
                "/transcripts/analyze/batch/report",
                json!({"transcripts": ["good1", "", "good2"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["failed"], 1);
        let results = report["results"].as_array().unwrap();
        assert_eq!(results[1]["status"], "execution_failed");
        assert_eq!(results[1]["error"], "Transcript cannot be empty");

        for idx in [0, 2] {
            assert_eq!(results[idx]["status"], "stored");
            let id = results[idx]["analysis"]["id"].as_str().unwrap();
            let (status, fetched) = send(&app, get(&format!("/transcripts/analysis/{id}"))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(fetched, results[idx]["analysis"]);
        }
    }

    #[tokio::test]
    async fn batch_upstream_failure_is_internal_error() {
        let (status, body) = send(
            &app(),
            post_json("/transcripts/analyze/batch", json!({"transcripts": ["ok", "boom"]})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("upstream exploded"));
    }

    /// Stores fine, but every lookup fails.
    struct UnreadableStore;

    impl ResultStore<TranscriptAnalysis> for UnreadableStore {
        fn store(&self, _obj: TranscriptAnalysis) -> Outcome<TranscriptAnalysis> {
            Outcome::stored(ObjectId::generate())
        }

        fn load(&self, id: &ObjectId) -> Outcome<TranscriptAnalysis> {
            Outcome::error(id.clone(), &StoreError::LockPoisoned)
        }
    }

    #[tokio::test]
    async fn lookup_failure_is_internal_error_with_store_message() {
        let service = AnalysisService::new(Arc::new(completion()), Arc::new(UnreadableStore));
        let app = router::build_router(AppState::new(service), &ServerConfig::default());

        let (status, body) = send(&app, get("/transcripts/analysis/some-id")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "storage lock poisoned");
    }
}
