//! The four specialist research agents
//!
//! Each agent renders its prompts from the shared catalog, makes exactly
//! one completion call per request, and post-processes the raw response
//! text into an [`AgentReply`](finsight_core::AgentReply). System prompts
//! render once at construction, so a broken template fails agent setup
//! instead of the first user query.

pub mod company_analyzer;
pub mod general_chat;
pub mod pdf_analyzer;
pub mod research_recommender;

pub use company_analyzer::CompanyAnalyzer;
pub use general_chat::GeneralChat;
pub use pdf_analyzer::PdfAnalyzer;
pub use research_recommender::ResearchRecommender;
