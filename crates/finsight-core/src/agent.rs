//! Agent trait definition

use crate::context::ContextBundle;
use crate::error::Result;
use crate::reply::AgentReply;
use async_trait::async_trait;

/// A specialist that turns one query into one reply
///
/// Implementations format a domain prompt, make exactly one completion call,
/// and post-process the response text. Agents never mutate the context and
/// never call the completion service more than once per `process` invocation.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process a query against the session context
    async fn process(&self, query: &str, ctx: &ContextBundle) -> Result<AgentReply>;

    /// Agent name, used in logs and the presentation layer's label badge
    fn name(&self) -> &str;
}
