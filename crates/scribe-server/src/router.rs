use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Scribe endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let transcripts = Router::new()
        .route("/analyze", get(handler::analyze_handler))
        .route("/analysis/:id", get(handler::get_analysis_handler))
        .route("/analyze/batch", post(handler::batch_handler))
        .route("/analyze/batch/report", post(handler::batch_report_handler));

    let router = Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .nest("/transcripts", transcripts)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.allow_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
