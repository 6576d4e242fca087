//! Query orchestration: classification, dispatch, and the response cache
//!
//! One [`Orchestrator`] owns the four specialist agents, the prompt
//! catalog, and the response cache. Every query flows through
//! [`Orchestrator::respond`]: cache lookup first, then label resolution
//! (a forced mode or one constrained classifier call), exactly one agent
//! invocation, and cache insertion on success. Classification failures
//! never surface; they resolve to the general-chat fallback.

use std::sync::Arc;

use finsight_core::{Agent, AgentReply, ContextBundle, Error, Result};
use finsight_llm::{CompletionClient, CompletionRequest, Message};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::agents::{CompanyAnalyzer, GeneralChat, PdfAnalyzer, ResearchRecommender};
use crate::cache::{CachedReply, Fingerprint, ResponseCache};
use crate::config::AssistantConfig;
use crate::extract;
use crate::intent::IntentLabel;
use crate::prompts::PromptCatalog;

/// Sampling temperature for the classifier call. Label selection must be
/// deterministic, not creative.
const CLASSIFIER_TEMPERATURE: f32 = 0.0;

/// Result of routing one query
#[derive(Debug, Clone)]
pub struct Routed {
    /// Label the query resolved to
    pub label: IntentLabel,

    /// The reply produced (or replayed) for the query
    pub reply: AgentReply,

    /// Whether the reply came from the cache without any completion call
    pub from_cache: bool,
}

/// Routes each query to exactly one specialist agent
pub struct Orchestrator {
    client: Arc<CompletionClient>,
    config: Arc<AssistantConfig>,
    catalog: PromptCatalog,
    company: Arc<dyn Agent>,
    pdf: Arc<dyn Agent>,
    research: Arc<dyn Agent>,
    chat: Arc<dyn Agent>,
    cache: ResponseCache,
}

impl Orchestrator {
    /// Build the orchestrator and its four agents
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Prompt`] if any agent's system template fails to render.
    pub fn new(client: Arc<CompletionClient>, config: Arc<AssistantConfig>) -> Result<Self> {
        config.validate()?;

        let catalog = PromptCatalog::new();
        let company = Arc::new(CompanyAnalyzer::new(
            Arc::clone(&client),
            Arc::clone(&config),
            &catalog,
        )?);
        let pdf = Arc::new(PdfAnalyzer::new(
            Arc::clone(&client),
            Arc::clone(&config),
            &catalog,
        )?);
        let research = Arc::new(ResearchRecommender::new(
            Arc::clone(&client),
            Arc::clone(&config),
            &catalog,
        )?);
        let chat = Arc::new(GeneralChat::new(
            Arc::clone(&client),
            Arc::clone(&config),
            &catalog,
        )?);
        let cache = ResponseCache::new(config.cache_ttl);

        Ok(Self {
            client,
            config,
            catalog,
            company,
            pdf,
            research,
            chat,
            cache,
        })
    }

    /// Classify a query into an intent label
    ///
    /// Total by construction: any failure (service error, refusal, or an
    /// answer with no recognizable token) resolves to the general-chat
    /// fallback instead of surfacing.
    #[instrument(skip_all)]
    pub async fn classify(&self, query: &str) -> IntentLabel {
        match self.classify_inner(query).await {
            Ok(label) => {
                debug!(label = %label, "query classified");
                label
            }
            Err(err) => {
                warn!(error = %err, "classification failed, falling back to general chat");
                IntentLabel::default()
            }
        }
    }

    async fn classify_inner(&self, query: &str) -> Result<IntentLabel> {
        let system = self.catalog.render("classifier.system", &json!({}))?;
        let user = self.catalog.render("classifier.user", &json!({ "query": query }))?;

        let request = CompletionRequest::builder(&self.config.model)
            .system(system)
            .add_message(Message::user(user))
            .max_tokens(self.config.classifier_max_tokens)
            .temperature(CLASSIFIER_TEMPERATURE)
            .build();

        let response = self.client.complete(request).await?;

        extract::first_label_token(response.text()).ok_or_else(|| {
            Error::AmbiguousIntent(format!("no label in classifier reply: {}", response.text()))
        })
    }

    /// The agent responsible for a label
    ///
    /// Every label maps to an agent; there is no reject path.
    pub fn agent_for(&self, label: IntentLabel) -> &Arc<dyn Agent> {
        match label {
            IntentLabel::CompanyAnalysis => &self.company,
            IntentLabel::PdfAnalysis => &self.pdf,
            IntentLabel::ResearchRecommendation => &self.research,
            IntentLabel::GeneralChat => &self.chat,
        }
    }

    /// Respond to one query
    ///
    /// A cache hit replays the stored reply with no completion call.
    /// Otherwise the query is classified (unless `forced` pins a label),
    /// dispatched to the matching agent, and the reply cached on success.
    /// A missing-context failure comes back as an instructional reply, not
    /// an error, and is never cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] or [`Error::ContentPolicy`] when the
    /// dispatched agent's completion call fails, and [`Error::Prompt`] if
    /// a template fails to render.
    #[instrument(skip(self, query, ctx), fields(forced = ?forced))]
    pub async fn respond(
        &self,
        query: &str,
        ctx: &ContextBundle,
        forced: Option<IntentLabel>,
    ) -> Result<Routed> {
        let fingerprint = Fingerprint::new(query, ctx);
        if let Some(hit) = self.cache.get(&fingerprint).await {
            debug!(label = %hit.label, "cache hit, replaying stored reply");
            return Ok(Routed {
                label: hit.label,
                reply: hit.reply,
                from_cache: true,
            });
        }

        let label = match forced {
            Some(label) => label,
            None => self.classify(query).await,
        };
        let agent = self.agent_for(label);
        info!(label = %label, agent = agent.name(), "dispatching query");

        match agent.process(query, ctx).await {
            Ok(reply) => {
                self.cache
                    .insert(fingerprint, CachedReply::new(label, reply.clone()))
                    .await;
                Ok(Routed {
                    label,
                    reply,
                    from_cache: false,
                })
            }
            Err(Error::MissingContext(detail)) => {
                info!(%detail, "request needs context, replying with instructions");
                let reply =
                    AgentReply::text(format!("{detail}. Load one with `/load <path>`, then ask again."));
                Ok(Routed {
                    label,
                    reply,
                    from_cache: false,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// The response cache, for stats and manual clearing
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}
