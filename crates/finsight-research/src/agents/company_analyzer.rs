//! Company performance analysis agent

use std::sync::Arc;

use async_trait::async_trait;
use finsight_core::{Agent, AgentReply, ContextBundle, Result};
use finsight_llm::{CompletionClient, CompletionRequest, Message};
use serde_json::json;
use tracing::debug;

use crate::config::AssistantConfig;
use crate::extract;
use crate::prompts::PromptCatalog;

/// Agent specialized in company performance and valuation questions
///
/// One completion call per request. The system prompt asks the model to
/// close with a `Recommendation: BUY|HOLD|SELL` line; post-processing lifts
/// that stance into the reply, with `Unknown` standing in whenever the text
/// carries no single unambiguous token.
pub struct CompanyAnalyzer {
    client: Arc<CompletionClient>,
    config: Arc<AssistantConfig>,
    catalog: PromptCatalog,
    system_prompt: String,
}

impl CompanyAnalyzer {
    /// Create a company analyzer sharing the process-wide client
    pub fn new(
        client: Arc<CompletionClient>,
        config: Arc<AssistantConfig>,
        catalog: &PromptCatalog,
    ) -> Result<Self> {
        let system_prompt = catalog.render("company.system", &json!({}))?;
        Ok(Self {
            client,
            config,
            catalog: catalog.clone(),
            system_prompt,
        })
    }
}

#[async_trait]
impl Agent for CompanyAnalyzer {
    async fn process(&self, query: &str, _ctx: &ContextBundle) -> Result<AgentReply> {
        let user_prompt = self.catalog.render("company.user", &json!({ "query": query }))?;

        let request = CompletionRequest::builder(&self.config.model)
            .system(self.system_prompt.clone())
            .add_message(Message::user(user_prompt))
            .max_tokens(self.config.answer_max_tokens)
            .temperature(self.config.answer_temperature)
            .build();

        let response = self.client.complete(request).await?;
        let text = response.text().to_string();

        let recommendation = extract::recommendation(&text);
        debug!(recommendation = recommendation.as_str(), "company analysis complete");

        Ok(AgentReply::text(text).with_recommendation(recommendation))
    }

    fn name(&self) -> &str {
        "company-analyzer"
    }
}
