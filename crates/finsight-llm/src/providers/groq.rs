//! Groq provider implementation
//!
//! Talks to Groq's OpenAI-compatible chat completions endpoint. The provider
//! owns its HTTP client and maps every transport and status failure onto
//! [`CompletionError`], so callers never see a raw HTTP error. A request that
//! exceeds the configured timeout surfaces as [`CompletionError::Timeout`].

use crate::completion::{CompletionRequest, CompletionResponse, FinishReason, TokenUsage};
use crate::error::{CompletionError, Result};
use crate::messages::Message;
use crate::provider::CompletionProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Default Groq API base URL
pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Groq provider configuration
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for API requests
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GroqConfig {
    /// Create a new configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from environment variables
    ///
    /// Reads the API key from `GROQ_API_KEY` (required) and the base URL
    /// from `GROQ_API_BASE` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            CompletionError::ConfigurationError(
                "GROQ_API_KEY environment variable not set".to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        if let Ok(api_base) = std::env::var("GROQ_API_BASE") {
            config.api_base = api_base;
        }
        Ok(config)
    }

    /// Set a custom API base URL
    ///
    /// Useful for proxies or other OpenAI-compatible endpoints.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_GROQ_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Groq completion provider
///
/// Supports Groq-hosted open models such as `llama-3.3-70b-versatile`,
/// and any OpenAI-compatible endpoint through a custom base URL.
pub struct GroqProvider {
    client: Client,
    config: GroqConfig,
}

impl GroqProvider {
    /// Create a provider with custom configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use finsight_llm::providers::{GroqConfig, GroqProvider};
    ///
    /// let config = GroqConfig::new("gsk_...")
    ///     .with_timeout(30);
    /// let provider = GroqProvider::with_config(config)?;
    /// # Ok::<(), finsight_llm::CompletionError>(())
    /// ```
    pub fn with_config(config: GroqConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CompletionError::ConfigurationError(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Create a provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GroqConfig::new(api_key))
    }

    /// Create a provider from environment variables
    ///
    /// See [`GroqConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self> {
        let config = GroqConfig::from_env()?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    /// Map a transport-level error onto the completion error taxonomy
    ///
    /// Timeouts get their own variant so callers can tell a slow service
    /// apart from an unreachable one.
    fn transport_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout(self.config.timeout_secs)
        } else {
            CompletionError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to Groq API at {}", self.config.api_base);

        // System prompt goes into the messages array for OpenAI-compatible APIs
        let wire_messages = build_wire_messages(request.system.clone(), request.messages);

        let groq_request = GroqRequest {
            model: request.model.clone(),
            messages: wire_messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| self.transport_error(e))?;

            return Err(match status.as_u16() {
                401 => CompletionError::AuthenticationFailed,
                429 => CompletionError::RateLimitExceeded(error_text),
                400 => classify_bad_request(error_text),
                _ => CompletionError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let groq_response: GroqResponse = response.json().await.map_err(|e| {
            CompletionError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = groq_response.choices.into_iter().next().ok_or_else(|| {
            CompletionError::UnexpectedResponse("No choices in response".to_string())
        })?;

        debug!(
            "Received response - finish_reason: {}, tokens: {}/{}",
            choice.finish_reason,
            groq_response.usage.prompt_tokens,
            groq_response.usage.completion_tokens
        );

        let finish_reason = map_finish_reason(&choice.finish_reason);
        if finish_reason == FinishReason::ContentFilter {
            return Err(CompletionError::ContentPolicy(
                "completion was suppressed by the provider's content filter".to_string(),
            ));
        }

        let content = choice.message.content.unwrap_or_default();

        Ok(CompletionResponse {
            message: Message::assistant(content),
            finish_reason,
            usage: TokenUsage {
                input_tokens: groq_response.usage.prompt_tokens,
                output_tokens: groq_response.usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &str {
        "groq"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: GroqUsage,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqChoiceMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct GroqChoiceMessage {
    // Null for some finish reasons, so keep it optional
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GroqUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the wire message array, folding the system prompt in as the
/// first message.
fn build_wire_messages(system: Option<String>, messages: Vec<Message>) -> Vec<Message> {
    let mut wire = Vec::with_capacity(messages.len() + 1);
    if let Some(system) = system {
        wire.push(Message::system(system));
    }
    wire.extend(messages);
    wire
}

fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        other => {
            debug!("Unknown finish_reason: {other}");
            FinishReason::Stop
        }
    }
}

/// Classify an HTTP 400 body
///
/// Content policy refusals arrive as 400s with a distinguishing error code,
/// and must not be lumped in with malformed-request errors because they are
/// never retried.
fn classify_bad_request(body: String) -> CompletionError {
    if let Ok(parsed) = serde_json::from_str::<GroqErrorBody>(&body) {
        let code = parsed.error.code.as_deref().unwrap_or("");
        let kind = parsed.error.kind.as_deref().unwrap_or("");
        if code == "content_filter"
            || code == "content_policy_violation"
            || kind == "content_filter"
        {
            return CompletionError::ContentPolicy(parsed.error.message);
        }
        return CompletionError::InvalidRequest(parsed.error.message);
    }
    CompletionError::InvalidRequest(body)
}
