//! Configuration for the research assistant

use finsight_core::{Error, Result};
use finsight_llm::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default completion model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Whether a live web-search tool is wired into this deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchCapability {
    /// A live search tool is available for agents to cite
    Available,
    /// No live search; prompts must not imply access to current data
    Unavailable,
}

impl Default for SearchCapability {
    fn default() -> Self {
        Self::Unavailable
    }
}

impl SearchCapability {
    /// True when a live search tool is available
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Configuration for the research assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model identifier sent with every completion request
    pub model: String,

    /// Sampling temperature for agent answers
    pub answer_temperature: f32,

    /// Token budget for agent answers
    pub answer_max_tokens: usize,

    /// Token cap for the classifier call, sized for one label token
    pub classifier_max_tokens: usize,

    /// Maximum completion attempts, including the first
    pub max_attempts: u32,

    /// Initial retry backoff
    pub retry_backoff_base: Duration,

    /// Upper bound on a single retry backoff
    pub retry_backoff_cap: Duration,

    /// HTTP request timeout
    pub request_timeout: Duration,

    /// Response cache lifetime
    pub cache_ttl: Duration,

    /// Truncation limit for extracted document text, in characters
    pub pdf_char_limit: usize,

    /// Live web-search availability
    pub search: SearchCapability,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            answer_temperature: 0.7,
            answer_max_tokens: 2048,
            classifier_max_tokens: 16,
            max_attempts: 3,
            retry_backoff_base: Duration::from_millis(500),
            retry_backoff_cap: Duration::from_secs(8),
            request_timeout: Duration::from_secs(60),
            cache_ttl: Duration::from_secs(24 * 60 * 60), // 24 hours
            pdf_char_limit: 50_000,
            search: SearchCapability::Unavailable,
        }
    }
}

impl AssistantConfig {
    /// Create a new configuration builder
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Load a model override from the `RESEARCH_MODEL` environment variable
    ///
    /// Blank values are ignored so an empty export cannot wipe the default.
    pub fn with_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("RESEARCH_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Config("model must not be empty".to_string()));
        }

        if self.answer_max_tokens == 0 {
            return Err(Error::Config(
                "answer_max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.classifier_max_tokens == 0 {
            return Err(Error::Config(
                "classifier_max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(Error::Config(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        if self.pdf_char_limit == 0 {
            return Err(Error::Config(
                "pdf_char_limit must be greater than 0".to_string(),
            ));
        }

        if self.retry_backoff_cap < self.retry_backoff_base {
            return Err(Error::Config(
                "retry_backoff_cap must be at least retry_backoff_base".to_string(),
            ));
        }

        Ok(())
    }

    /// Derive the retry policy for the completion client
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            self.retry_backoff_base,
            self.retry_backoff_cap,
            2.0,
        )
    }
}

/// Builder for [`AssistantConfig`]
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    model: Option<String>,
    answer_temperature: Option<f32>,
    answer_max_tokens: Option<usize>,
    classifier_max_tokens: Option<usize>,
    max_attempts: Option<u32>,
    retry_backoff_base: Option<Duration>,
    retry_backoff_cap: Option<Duration>,
    request_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    pdf_char_limit: Option<usize>,
    search: Option<SearchCapability>,
}

impl AssistantConfigBuilder {
    /// Set the completion model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature for agent answers
    pub fn answer_temperature(mut self, temperature: f32) -> Self {
        self.answer_temperature = Some(temperature);
        self
    }

    /// Set the token budget for agent answers
    pub fn answer_max_tokens(mut self, max_tokens: usize) -> Self {
        self.answer_max_tokens = Some(max_tokens);
        self
    }

    /// Set the token cap for the classifier call
    pub fn classifier_max_tokens(mut self, max_tokens: usize) -> Self {
        self.classifier_max_tokens = Some(max_tokens);
        self
    }

    /// Set the maximum completion attempts
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Set the initial retry backoff
    pub fn retry_backoff_base(mut self, duration: Duration) -> Self {
        self.retry_backoff_base = Some(duration);
        self
    }

    /// Set the upper bound on a single retry backoff
    pub fn retry_backoff_cap(mut self, duration: Duration) -> Self {
        self.retry_backoff_cap = Some(duration);
        self
    }

    /// Set the HTTP request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the response cache lifetime
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set the truncation limit for document text
    pub fn pdf_char_limit(mut self, chars: usize) -> Self {
        self.pdf_char_limit = Some(chars);
        self
    }

    /// Set the live web-search availability
    pub fn search(mut self, search: SearchCapability) -> Self {
        self.search = Some(search);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the assembled configuration fails
    /// validation.
    pub fn build(self) -> Result<AssistantConfig> {
        let defaults = AssistantConfig::default();

        let config = AssistantConfig {
            model: self.model.unwrap_or(defaults.model),
            answer_temperature: self.answer_temperature.unwrap_or(defaults.answer_temperature),
            answer_max_tokens: self.answer_max_tokens.unwrap_or(defaults.answer_max_tokens),
            classifier_max_tokens: self
                .classifier_max_tokens
                .unwrap_or(defaults.classifier_max_tokens),
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            retry_backoff_base: self.retry_backoff_base.unwrap_or(defaults.retry_backoff_base),
            retry_backoff_cap: self.retry_backoff_cap.unwrap_or(defaults.retry_backoff_cap),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            pdf_char_limit: self.pdf_char_limit.unwrap_or(defaults.pdf_char_limit),
            search: self.search.unwrap_or(defaults.search),
        };

        config.validate()?;
        Ok(config)
    }
}
