//! Scripted completion providers shared across the crate's tests
//!
//! Tests drive agents and the orchestrator through a real
//! [`CompletionClient`] wrapping a mocked provider, so provider errors take
//! the same path they would in production.

use std::sync::Arc;

use async_trait::async_trait;
use finsight_llm::{
    CompletionClient, CompletionProvider, CompletionRequest, CompletionResponse, FinishReason,
    Message, RetryPolicy, TokenUsage,
};

mockall::mock! {
    pub Provider {}

    #[async_trait]
    impl CompletionProvider for Provider {
        async fn complete(&self, request: CompletionRequest) -> finsight_llm::Result<CompletionResponse>;
        fn name(&self) -> &str;
    }
}

/// A canned assistant response that stopped naturally
pub(crate) fn canned(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        finish_reason: FinishReason::Stop,
        usage: TokenUsage::default(),
    }
}

/// Wrap a scripted provider in a client with retries disabled
pub(crate) fn client_for(mut provider: MockProvider) -> Arc<CompletionClient> {
    provider.expect_name().return_const("scripted".to_string());
    Arc::new(CompletionClient::new(
        Arc::new(provider),
        RetryPolicy::no_retry(),
    ))
}

/// A provider whose `complete` must never be called
pub(crate) fn untouchable_provider() -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_complete().times(0);
    provider
}
