//! Financial research assistant
//!
//! This crate assembles the research assistant around a single pipeline:
//! classify, dispatch, post-process, cache. It includes:
//!
//! - Intent classification via one constrained completion call
//! - Four specialist agents (company analysis, PDF report analysis,
//!   research recommendations, general chat)
//! - Prompt templates rendered from a shared catalog
//! - Response post-processing (BUY/HOLD/SELL stance, headline metrics)
//! - PDF text extraction for document-grounded questions
//! - A TTL response cache keyed by normalized query and session context
//! - An interactive terminal shell
//!
//! # Architecture
//!
//! The [`Orchestrator`] routes every query to exactly one agent. A forced
//! routing mode pins the agent; otherwise a classifier call picks the
//! [`IntentLabel`], falling back to general chat when classification
//! fails. Agents make one completion call each through the shared
//! [`CompletionClient`](finsight_llm::CompletionClient) and never talk to
//! the provider directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight_llm::providers::GroqProvider;
//! use finsight_llm::CompletionClient;
//! use finsight_research::{AssistantConfig, Orchestrator, Shell};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AssistantConfig::default().with_env_model();
//!     let provider = GroqProvider::from_env()?;
//!     let client = Arc::new(CompletionClient::new(
//!         Arc::new(provider),
//!         config.retry_policy(),
//!     ));
//!
//!     let orchestrator = Orchestrator::new(client, Arc::new(config))?;
//!     let mut shell = Shell::new(orchestrator);
//!
//!     let outcome = shell.handle_line("How is Apple performing?").await;
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod cache;
pub mod config;
pub mod extract;
pub mod intent;
pub mod orchestrator;
pub mod pdf;
pub mod prompts;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use agents::{CompanyAnalyzer, GeneralChat, PdfAnalyzer, ResearchRecommender};
pub use cache::{CachedReply, Fingerprint, ResponseCache};
pub use config::{AssistantConfig, SearchCapability};
pub use intent::IntentLabel;
pub use orchestrator::{Orchestrator, Routed};
pub use prompts::PromptCatalog;
pub use shell::{Outcome, RoutingMode, Shell};

// Re-export the core reply types agents produce
pub use finsight_core::{Agent, AgentReply, ContextBundle, Recommendation};
