use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::completion::Completion;
use crate::error::{LlmError, LlmResult};
use crate::schema::SchemaDescriptor;

type Responder = dyn Fn(&str, &str) -> LlmResult<String> + Send + Sync;

/// In-process completion backend driven by a closure.
///
/// The responder receives the system and user instructions. An optional
/// delay simulates network latency so concurrency can be observed; the
/// backend tracks how many calls were in flight at once.
#[derive(Clone)]
pub struct ScriptedCompletion {
    responder: Arc<Responder>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedCompletion {
    pub fn new(responder: impl Fn(&str, &str) -> LlmResult<String> + Send + Sync + 'static) -> Self {
        Self {
            responder: Arc::new(responder),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always answer with the same text.
    pub fn fixed(response: impl Into<String>) -> Self {
        let response = response.into();
        Self::new(move |_, _| Ok(response.clone()))
    }

    /// Always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_, _| Err(LlmError::Scripted(message.clone())))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total completed or in-progress calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for ScriptedCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedCompletion")
            .field("delay", &self.delay)
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl Completion for ScriptedCompletion {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        _shape: &SchemaDescriptor,
    ) -> LlmResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = (self.responder)(system, user);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
