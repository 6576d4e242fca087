//! Financial document analysis agent

use std::sync::Arc;

use async_trait::async_trait;
use finsight_core::{Agent, AgentReply, ContextBundle, Error, Result};
use finsight_llm::{CompletionClient, CompletionRequest, Message};
use serde_json::json;
use tracing::debug;

use crate::config::AssistantConfig;
use crate::extract;
use crate::prompts::PromptCatalog;

/// Agent specialized in analyzing a loaded financial document
///
/// Requires a non-empty document in the context bundle and fails with
/// [`Error::MissingContext`] before any completion call when there is none.
/// Document text is truncated to the configured character limit on the way
/// into the prompt. Post-processing pulls headline metrics (the fenced JSON
/// block the prompt asks for, prose figures as fallback) and the
/// recommendation stance out of the response.
pub struct PdfAnalyzer {
    client: Arc<CompletionClient>,
    config: Arc<AssistantConfig>,
    catalog: PromptCatalog,
    system_prompt: String,
}

impl PdfAnalyzer {
    /// Create a document analyzer sharing the process-wide client
    pub fn new(
        client: Arc<CompletionClient>,
        config: Arc<AssistantConfig>,
        catalog: &PromptCatalog,
    ) -> Result<Self> {
        let system_prompt = catalog.render("pdf.system", &json!({}))?;
        Ok(Self {
            client,
            config,
            catalog: catalog.clone(),
            system_prompt,
        })
    }
}

#[async_trait]
impl Agent for PdfAnalyzer {
    async fn process(&self, query: &str, ctx: &ContextBundle) -> Result<AgentReply> {
        let document = ctx
            .document()
            .filter(|document| !document.is_empty())
            .ok_or_else(|| {
                Error::MissingContext("document analysis needs a loaded PDF".to_string())
            })?;

        let body = extract::truncate_chars(&document.text, self.config.pdf_char_limit);
        if body.len() < document.text.len() {
            debug!(
                name = %document.name,
                limit = self.config.pdf_char_limit,
                "document truncated for prompt"
            );
        }

        let user_prompt = self.catalog.render(
            "pdf.user",
            &json!({
                "name": document.name,
                "text": body,
                "query": query,
            }),
        )?;

        let request = CompletionRequest::builder(&self.config.model)
            .system(self.system_prompt.clone())
            .add_message(Message::user(user_prompt))
            .max_tokens(self.config.answer_max_tokens)
            .temperature(self.config.answer_temperature)
            .build();

        let response = self.client.complete(request).await?;
        let text = response.text().to_string();

        let metrics = extract::document_metrics(&text);
        let recommendation = extract::recommendation(&text);
        debug!(
            metrics = metrics.len(),
            recommendation = recommendation.as_str(),
            "document analysis complete"
        );

        Ok(AgentReply::text(text)
            .with_metrics(metrics)
            .with_recommendation(recommendation))
    }

    fn name(&self) -> &str {
        "pdf-analyzer"
    }
}
