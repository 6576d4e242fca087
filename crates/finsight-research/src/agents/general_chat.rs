//! Conversational fallback agent

use std::sync::Arc;

use async_trait::async_trait;
use finsight_core::{Agent, AgentReply, ContextBundle, Result};
use finsight_llm::{CompletionClient, CompletionRequest, Message};
use serde_json::json;

use crate::config::AssistantConfig;
use crate::prompts::PromptCatalog;

/// Recent exchanges folded into the chat prompt
const HISTORY_WINDOW: usize = 6;

/// Conversational agent for anything the specialists do not cover
///
/// Also the fallback target when classification fails, so it must handle
/// arbitrary input. The last few exchanges ride along as alternating
/// user/assistant messages; replies are plain text with no extraction.
pub struct GeneralChat {
    client: Arc<CompletionClient>,
    config: Arc<AssistantConfig>,
    system_prompt: String,
}

impl GeneralChat {
    /// Create a chat agent sharing the process-wide client
    pub fn new(
        client: Arc<CompletionClient>,
        config: Arc<AssistantConfig>,
        catalog: &PromptCatalog,
    ) -> Result<Self> {
        let system_prompt = catalog.render("chat.system", &json!({}))?;
        Ok(Self {
            client,
            config,
            system_prompt,
        })
    }
}

#[async_trait]
impl Agent for GeneralChat {
    async fn process(&self, query: &str, ctx: &ContextBundle) -> Result<AgentReply> {
        let mut messages = Vec::new();
        for exchange in ctx.recent(HISTORY_WINDOW) {
            messages.push(Message::user(exchange.user.clone()));
            messages.push(Message::assistant(exchange.assistant.clone()));
        }
        messages.push(Message::user(query));

        let request = CompletionRequest::builder(&self.config.model)
            .system(self.system_prompt.clone())
            .messages(messages)
            .max_tokens(self.config.answer_max_tokens)
            .temperature(self.config.answer_temperature)
            .build();

        let response = self.client.complete(request).await?;

        Ok(AgentReply::text(response.text()))
    }

    fn name(&self) -> &str {
        "general-chat"
    }
}
