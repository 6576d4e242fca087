//! Per-session context passed into agent calls
//!
//! The presentation layer owns one [`ContextBundle`] per session and mutates
//! it between requests (loading a document, recording exchanges). Agents and
//! the orchestrator receive it by shared reference for the duration of a
//! single request and never mutate it.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Maximum exchanges retained in the conversation history
const MAX_HISTORY: usize = 20;

/// Extracted text of a loaded document
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Display name, usually the file name
    pub name: String,

    /// Extracted plain text
    pub text: String,
}

impl DocumentContext {
    /// Create a document context from extracted text
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Whether the extracted text is blank
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One completed user/assistant exchange
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
    pub at: DateTime<Utc>,
}

/// Session context: an optional loaded document plus recent conversation
#[derive(Debug, Clone, Default)]
pub struct ContextBundle {
    document: Option<DocumentContext>,
    history: VecDeque<Exchange>,
}

impl ContextBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded document
    pub fn set_document(&mut self, document: DocumentContext) {
        self.document = Some(document);
    }

    /// Drop the loaded document
    pub fn clear_document(&mut self) {
        self.document = None;
    }

    /// The loaded document, if any
    pub fn document(&self) -> Option<&DocumentContext> {
        self.document.as_ref()
    }

    /// Whether a document is loaded
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Record a completed exchange, trimming the oldest entries beyond the
    /// history bound
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.history.push_back(Exchange {
            user: user.into(),
            assistant: assistant.into(),
            at: Utc::now(),
        });
        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }

    /// The most recent `n` exchanges, oldest first
    pub fn recent(&self, n: usize) -> Vec<&Exchange> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).collect()
    }

    /// Number of recorded exchanges
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear the conversation history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Deterministic token identifying the attached context
    ///
    /// Cache fingerprints combine this with the normalized query. Two
    /// bundles with the same loaded document produce the same token within
    /// one process; conversation history does not participate, so a
    /// repeated query still hits the cache.
    pub fn identity_token(&self) -> String {
        match &self.document {
            Some(doc) => {
                let mut hasher = DefaultHasher::new();
                doc.text.hash(&mut hasher);
                format!("doc:{}:{:016x}", doc.name, hasher.finish())
            }
            None => "none".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bundle() {
        let ctx = ContextBundle::new();
        assert!(!ctx.has_document());
        assert_eq!(ctx.history_len(), 0);
        assert_eq!(ctx.identity_token(), "none");
    }

    #[test]
    fn test_set_and_clear_document() {
        let mut ctx = ContextBundle::new();
        ctx.set_document(DocumentContext::new("q3.pdf", "Revenue grew 8%"));
        assert!(ctx.has_document());
        assert_eq!(ctx.document().map(|d| d.name.as_str()), Some("q3.pdf"));

        ctx.clear_document();
        assert!(!ctx.has_document());
    }

    #[test]
    fn test_blank_document_is_empty() {
        let doc = DocumentContext::new("blank.pdf", "   \n\t  ");
        assert!(doc.is_empty());

        let doc = DocumentContext::new("q3.pdf", "Revenue grew 8%");
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_history_trims_to_bound() {
        let mut ctx = ContextBundle::new();
        for i in 0..(MAX_HISTORY + 5) {
            ctx.record_exchange(format!("q{i}"), format!("a{i}"));
        }
        assert_eq!(ctx.history_len(), MAX_HISTORY);

        // Oldest entries dropped first
        let recent = ctx.recent(MAX_HISTORY);
        assert_eq!(recent[0].user, "q5");
    }

    #[test]
    fn test_recent_returns_oldest_first() {
        let mut ctx = ContextBundle::new();
        ctx.record_exchange("first", "r1");
        ctx.record_exchange("second", "r2");
        ctx.record_exchange("third", "r3");

        let recent = ctx.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].user, "second");
        assert_eq!(recent[1].user, "third");
    }

    #[test]
    fn test_identity_token_tracks_document() {
        let mut a = ContextBundle::new();
        let mut b = ContextBundle::new();

        a.set_document(DocumentContext::new("q3.pdf", "Revenue grew 8%"));
        b.set_document(DocumentContext::new("q3.pdf", "Revenue grew 8%"));
        assert_eq!(a.identity_token(), b.identity_token());

        b.set_document(DocumentContext::new("q3.pdf", "Revenue fell 3%"));
        assert_ne!(a.identity_token(), b.identity_token());
    }

    #[test]
    fn test_identity_token_ignores_history() {
        let mut ctx = ContextBundle::new();
        let before = ctx.identity_token();
        ctx.record_exchange("hello", "hi");
        assert_eq!(ctx.identity_token(), before);
    }
}
