//! Error types for completion operations

use thiserror::Error;

/// Result type for completion operations
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Errors that can occur while calling the completion service
///
/// Transport failures are mapped into these variants at the provider
/// boundary, so the rest of the workspace never sees HTTP-library error
/// types.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Request failed with a non-success status or a transport error
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service refused the request
    #[error("Request refused by content policy: {0}")]
    ContentPolicy(String),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<CompletionError> for finsight_core::Error {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::ContentPolicy(msg) => finsight_core::Error::ContentPolicy(msg),
            other => finsight_core::Error::Service(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_policy_maps_to_content_policy() {
        let err: finsight_core::Error =
            CompletionError::ContentPolicy("refused".to_string()).into();
        assert!(matches!(err, finsight_core::Error::ContentPolicy(msg) if msg == "refused"));
    }

    #[test]
    fn test_everything_else_maps_to_service() {
        let cases = vec![
            CompletionError::RequestFailed("boom".to_string()),
            CompletionError::Timeout(60),
            CompletionError::AuthenticationFailed,
            CompletionError::RateLimitExceeded("slow down".to_string()),
            CompletionError::InvalidRequest("bad".to_string()),
            CompletionError::UnexpectedResponse("garbled".to_string()),
            CompletionError::ConfigurationError("missing".to_string()),
        ];
        for case in cases {
            let err: finsight_core::Error = case.into();
            assert!(matches!(err, finsight_core::Error::Service(_)));
        }
    }

    #[test]
    fn test_timeout_message_carries_seconds() {
        assert_eq!(
            CompletionError::Timeout(60).to_string(),
            "Request timed out after 60s"
        );
    }
}
