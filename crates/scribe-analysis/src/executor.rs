use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use scribe_llm::{AnalysisShape, Completion, SchemaDescriptor};
use scribe_types::TranscriptAnalysis;

use crate::error::{ExecutorError, ExecutorResult};
use crate::prompt::{render_user_prompt, SYSTEM_PROMPT};

/// Adapter between Scribe and a [`Completion`] backend.
///
/// The async and blocking entry points share one parsing routine, so a
/// response accepted by one is accepted by the other. Nothing is retried.
#[derive(Clone)]
pub struct AnalysisExecutor {
    completion: Arc<dyn Completion>,
}

impl AnalysisExecutor {
    pub fn new(completion: Arc<dyn Completion>) -> Self {
        Self { completion }
    }

    /// Name of the underlying provider.
    pub fn provider(&self) -> &'static str {
        self.completion.name()
    }

    /// Run one completion and parse it into `T`.
    #[instrument(skip_all, fields(provider = self.completion.name(), shape = %shape.name))]
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        shape: &SchemaDescriptor,
    ) -> ExecutorResult<T> {
        let raw = self.completion.complete(system, user, shape).await?;
        debug!(bytes = raw.len(), "completion received");
        parse_response(&raw, shape)
    }

    /// Blocking twin of [`invoke`](Self::invoke).
    ///
    /// Drives the call on a private current-thread runtime. Returns
    /// [`ExecutorError::BlockingInAsync`] when called from inside a runtime.
    pub fn invoke_blocking<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        shape: &SchemaDescriptor,
    ) -> ExecutorResult<T> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ExecutorError::BlockingInAsync);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.invoke(system, user, shape))
    }

    /// Analyze one transcript with the standard prompts.
    pub async fn analyze(&self, transcript: &str) -> ExecutorResult<TranscriptAnalysis> {
        let user = render_user_prompt(transcript);
        self.invoke(SYSTEM_PROMPT, &user, &TranscriptAnalysis::schema())
            .await
    }

    pub fn analyze_blocking(&self, transcript: &str) -> ExecutorResult<TranscriptAnalysis> {
        let user = render_user_prompt(transcript);
        self.invoke_blocking(SYSTEM_PROMPT, &user, &TranscriptAnalysis::schema())
    }
}

impl std::fmt::Debug for AnalysisExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisExecutor")
            .field("provider", &self.completion.name())
            .finish()
    }
}

/// Parse raw completion text into `T`.
///
/// Tolerates surrounding whitespace and a single fenced code block, which
/// some models emit even when asked for bare JSON.
pub fn parse_response<T: DeserializeOwned>(
    raw: &str,
    shape: &SchemaDescriptor,
) -> ExecutorResult<T> {
    serde_json::from_str(strip_code_fence(raw)).map_err(|e| ExecutorError::MalformedResponse {
        shape: shape.name.clone(),
        reason: e.to_string(),
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_llm::ScriptedCompletion;

    const GOOD: &str = r#"{"summary": "s", "next_actions": ["a", "b"]}"#;

    fn executor(completion: ScriptedCompletion) -> AnalysisExecutor {
        AnalysisExecutor::new(Arc::new(completion))
    }

    fn expected() -> TranscriptAnalysis {
        TranscriptAnalysis::new("s", vec!["a".into(), "b".into()])
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parses_bare_json() {
        let parsed: TranscriptAnalysis =
            parse_response(GOOD, &TranscriptAnalysis::schema()).unwrap();
        assert_eq!(parsed, expected());
    }

    #[test]
    fn parses_fenced_json() {
        let raw = format!("```json\n{GOOD}\n```\n");
        let parsed: TranscriptAnalysis =
            parse_response(&raw, &TranscriptAnalysis::schema()).unwrap();
        assert_eq!(parsed, expected());
    }

    #[test]
    fn rejects_nonconforming_body() {
        let err = parse_response::<TranscriptAnalysis>(
            r#"{"summary": 3}"#,
            &TranscriptAnalysis::schema(),
        )
        .unwrap_err();
        match err {
            ExecutorError::MalformedResponse { shape, .. } => {
                assert_eq!(shape, "transcript_analysis");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_plain_text() {
        let result =
            parse_response::<TranscriptAnalysis>("Sure! Here you go.", &TranscriptAnalysis::schema());
        assert!(matches!(result, Err(ExecutorError::MalformedResponse { .. })));
    }

    // -----------------------------------------------------------------------
    // Async invocation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn analyze_embeds_transcript_and_parses() {
        let llm = ScriptedCompletion::new(|system, user| {
            assert_eq!(system, SYSTEM_PROMPT);
            assert!(user.contains("hello world"));
            Ok(GOOD.to_string())
        });
        let result = executor(llm).analyze("hello world").await.unwrap();
        assert_eq!(result, expected());
    }

    #[tokio::test]
    async fn upstream_failure_is_not_masked() {
        let llm = ScriptedCompletion::failing("503 from upstream");
        let err = executor(llm.clone()).analyze("x").await.unwrap_err();
        assert!(matches!(err, ExecutorError::Upstream(_)));
        assert!(err.to_string().contains("503 from upstream"));
        assert_eq!(llm.calls(), 1, "no retry expected");
    }

    // -----------------------------------------------------------------------
    // Blocking invocation
    // -----------------------------------------------------------------------

    #[test]
    fn blocking_matches_async_semantics() {
        let exec = executor(ScriptedCompletion::fixed(GOOD));
        assert_eq!(exec.analyze_blocking("hello").unwrap(), expected());

        let exec = executor(ScriptedCompletion::fixed("not json"));
        assert!(matches!(
            exec.analyze_blocking("hello"),
            Err(ExecutorError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn blocking_inside_runtime_is_refused() {
        let exec = executor(ScriptedCompletion::fixed(GOOD));
        assert!(matches!(
            exec.analyze_blocking("hello"),
            Err(ExecutorError::BlockingInAsync)
        ));
    }

    #[test]
    fn debug_names_provider() {
        let exec = executor(ScriptedCompletion::fixed(GOOD));
        assert_eq!(exec.provider(), "scripted");
        assert!(format!("{exec:?}").contains("scripted"));
    }
}
