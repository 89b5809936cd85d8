use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LlmResult;
use crate::schema::SchemaDescriptor;

/// A large language model completion backend.
///
/// Implementations must be `Send + Sync`: one instance serves every
/// concurrent analysis in a batch. Failures are returned as-is; nothing in
/// Scribe retries them.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Run one completion and return the raw response content.
    ///
    /// `shape` describes the JSON document the response must conform to.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        shape: &SchemaDescriptor,
    ) -> LlmResult<String>;
}

#[async_trait]
impl<C: Completion + ?Sized> Completion for Arc<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        shape: &SchemaDescriptor,
    ) -> LlmResult<String> {
        (**self).complete(system, user, shape).await
    }
}
