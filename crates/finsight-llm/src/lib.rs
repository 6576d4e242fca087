//! Completion service client layer for finsight-rs
//!
//! This crate provides provider-agnostic plumbing for single-shot chat
//! completions. It includes:
//!
//! - Message and completion request/response types
//! - Provider trait for completion services
//! - A client handle that wraps any provider with bounded retry
//! - Concrete provider implementations (behind feature flags)
//!
//! Requests are assembled with a builder:
//!
//! ```
//! use finsight_llm::{CompletionRequest, Message};
//!
//! let request = CompletionRequest::builder("llama-3.3-70b-versatile")
//!     .system("You are a financial research assistant.")
//!     .add_message(Message::user("What does a rising P/E ratio signal?"))
//!     .max_tokens(512)
//!     .temperature(0.7)
//!     .build();
//! assert_eq!(request.max_tokens, 512);
//! ```

pub mod client;
pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod retry;

// Re-export main types
pub use client::CompletionClient;
pub use completion::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, FinishReason, TokenUsage,
};
pub use error::{CompletionError, Result};
pub use messages::{Message, Role};
pub use provider::CompletionProvider;
pub use retry::RetryPolicy;

// Provider implementations (feature-gated)
#[cfg(feature = "groq")]
pub mod providers;
