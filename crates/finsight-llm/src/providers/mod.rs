//! Concrete completion provider implementations
//!
//! This module contains implementations of the CompletionProvider trait
//! for hosted inference services.

#[cfg(feature = "groq")]
pub mod groq;

#[cfg(feature = "groq")]
pub use groq::{GroqConfig, GroqProvider};
