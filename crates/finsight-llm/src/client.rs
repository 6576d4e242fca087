//! Shared completion client
//!
//! One [`CompletionClient`] is constructed at process start and passed into
//! every agent, so there is no global provider state and no hidden
//! initialization order. The client owns the retry policy; callers see a
//! single `complete` call.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Result;
use crate::provider::CompletionProvider;
use crate::retry::RetryPolicy;
use std::sync::Arc;
use tracing::debug;

/// Provider handle plus retry policy
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    policy: RetryPolicy,
}

impl CompletionClient {
    /// Create a client around a provider
    pub fn new(provider: Arc<dyn CompletionProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Perform one completion call under the retry policy
    pub async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "dispatching completion"
        );

        self.policy
            .execute("completion", || {
                let provider = Arc::clone(&self.provider);
                let request = request.clone();
                async move { provider.complete(request).await }
            })
            .await
    }
}
