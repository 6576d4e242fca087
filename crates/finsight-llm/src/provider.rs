//! Completion provider trait

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Result;
use async_trait::async_trait;

/// An endpoint that turns a completion request into generated text
///
/// Providers are stateless beyond their HTTP client and credentials; one
/// instance is shared across all agents through a
/// [`CompletionClient`](crate::CompletionClient).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Perform one completion call
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
