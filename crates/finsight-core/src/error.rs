//! Error types shared by agents and the orchestrator

use thiserror::Error;

/// Result type alias for finsight-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for one request through the assistant
///
/// `Service` and `ContentPolicy` reach the presentation layer as failure
/// text. `MissingContext` is converted to an instructional reply at the
/// orchestrator boundary. `AmbiguousIntent` never leaves classification;
/// it is resolved by falling back to general chat.
#[derive(Error, Debug)]
pub enum Error {
    /// The completion service failed: network error, timeout, non-success
    /// status, or a malformed response
    #[error("Completion service failure: {0}")]
    Service(String),

    /// The completion service refused the request
    #[error("Request refused by the completion service: {0}")]
    ContentPolicy(String),

    /// An agent was invoked without context it requires
    #[error("Missing context: {0}")]
    MissingContext(String),

    /// Intent classification produced no usable label
    #[error("Ambiguous intent: {0}")]
    AmbiguousIntent(String),

    /// A prompt template failed to render
    #[error("Prompt rendering failed: {0}")]
    Prompt(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error may be shown to the user as-is
    ///
    /// Internal markers stay internal; everything else already carries a
    /// user-presentable message.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::AmbiguousIntent(_))
    }
}
