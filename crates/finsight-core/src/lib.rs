//! Core abstractions for the FinSight research assistant
//!
//! This crate defines the types shared by every part of the assistant: the
//! [`Agent`] trait implemented by each specialist, the [`ContextBundle`]
//! carrying per-session context into agent calls, the [`AgentReply`] returned
//! to the presentation layer, and the [`Error`] taxonomy used across crates.

pub mod agent;
pub mod context;
pub mod error;
pub mod reply;

pub use agent::Agent;
pub use context::{ContextBundle, DocumentContext, Exchange};
pub use error::{Error, Result};
pub use reply::{AgentReply, Recommendation};
