use scribe_analysis::AnalysisService;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: AnalysisService,
}

impl AppState {
    pub fn new(service: AnalysisService) -> Self {
        Self { service }
    }
}
