//! Research planning and recommendation agent

use std::sync::Arc;

use async_trait::async_trait;
use finsight_core::{Agent, AgentReply, ContextBundle, Result};
use finsight_llm::{CompletionClient, CompletionRequest, Message};
use serde_json::json;

use crate::config::AssistantConfig;
use crate::prompts::PromptCatalog;

/// Agent specialized in research prioritization and sourcing advice
///
/// The system prompt tells the model whether live web search is wired up,
/// so an instance built without the capability steers the user toward
/// sources to consult instead of claiming it searched. The stance is fixed
/// at construction; changing the capability means rebuilding the agent.
pub struct ResearchRecommender {
    client: Arc<CompletionClient>,
    config: Arc<AssistantConfig>,
    catalog: PromptCatalog,
    system_prompt: String,
}

impl ResearchRecommender {
    /// Create a research recommender sharing the process-wide client
    pub fn new(
        client: Arc<CompletionClient>,
        config: Arc<AssistantConfig>,
        catalog: &PromptCatalog,
    ) -> Result<Self> {
        let system_prompt = catalog.render(
            "research.system",
            &json!({ "search_available": config.search.is_available() }),
        )?;
        Ok(Self {
            client,
            config,
            catalog: catalog.clone(),
            system_prompt,
        })
    }
}

#[async_trait]
impl Agent for ResearchRecommender {
    async fn process(&self, query: &str, _ctx: &ContextBundle) -> Result<AgentReply> {
        let user_prompt = self.catalog.render("research.user", &json!({ "query": query }))?;

        let request = CompletionRequest::builder(&self.config.model)
            .system(self.system_prompt.clone())
            .add_message(Message::user(user_prompt))
            .max_tokens(self.config.answer_max_tokens)
            .temperature(self.config.answer_temperature)
            .build();

        let response = self.client.complete(request).await?;

        Ok(AgentReply::text(response.text()))
    }

    fn name(&self) -> &str {
        "research-recommender"
    }
}
