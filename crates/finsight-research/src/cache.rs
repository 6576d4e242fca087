//! Response cache keyed by query and context fingerprints
//!
//! A repeated question against the same loaded context is answered from
//! here without touching the completion service. Only successful replies
//! are ever inserted; failures leave the cache untouched so a transient
//! error is retried on the next ask.

use crate::intent::IntentLabel;
use cached::{Cached, TimedCache};
use chrono::{DateTime, Utc};
use finsight_core::{AgentReply, ContextBundle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for one request
///
/// The query is normalized (trimmed, lowercased, inner whitespace
/// collapsed) so trivially restated questions share an entry. The context
/// component comes from [`ContextBundle::identity_token`], so loading a
/// different document changes the key while conversation history does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Normalized query text
    pub query: String,
    /// Context identity token
    pub context: String,
}

impl Fingerprint {
    /// Create a fingerprint for a raw query against the session context
    pub fn new(query: &str, ctx: &ContextBundle) -> Self {
        Self {
            query: normalize_query(query),
            context: ctx.identity_token(),
        }
    }
}

fn normalize_query(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A successful reply stored for replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedReply {
    /// Label the request was routed under
    pub label: IntentLabel,
    /// The reply as the agent produced it
    pub reply: AgentReply,
    /// When the entry was stored
    pub stored_at: DateTime<Utc>,
}

impl CachedReply {
    /// Wrap a reply for storage, stamped with the current time
    pub fn new(label: IntentLabel, reply: AgentReply) -> Self {
        Self {
            label,
            reply,
            stored_at: Utc::now(),
        }
    }
}

/// Thread-safe timed cache of successful replies
pub struct ResponseCache {
    cache: Arc<RwLock<TimedCache<Fingerprint, CachedReply>>>,
}

impl ResponseCache {
    /// Create a new cache with the specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a stored reply, if one is present and unexpired
    pub async fn get(&self, key: &Fingerprint) -> Option<CachedReply> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a reply
    pub async fn insert(&self, key: Fingerprint, value: CachedReply) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Whether the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for ResponseCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::DocumentContext;

    #[test]
    fn test_fingerprint_normalizes_query() {
        let ctx = ContextBundle::new();
        let a = Fingerprint::new("  What is  Apple's   outlook? ", &ctx);
        let b = Fingerprint::new("what is apple's outlook?", &ctx);

        assert_eq!(a, b);
        assert_eq!(a.query, "what is apple's outlook?");
        assert_eq!(a.context, "none");
    }

    #[test]
    fn test_fingerprint_changes_with_document() {
        let bare = ContextBundle::new();
        let mut loaded = ContextBundle::new();
        loaded.set_document(DocumentContext::new("q3.pdf", "Revenue grew 8%"));

        let a = Fingerprint::new("summarize", &bare);
        let b = Fingerprint::new("summarize", &loaded);

        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_ignores_history() {
        let mut quiet = ContextBundle::new();
        let mut chatty = ContextBundle::new();
        chatty.record_exchange("hi", "hello");
        chatty.record_exchange("thanks", "any time");
        quiet.record_exchange("different", "exchange");

        let a = Fingerprint::new("what is a P/E ratio?", &quiet);
        let b = Fingerprint::new("what is a P/E ratio?", &chatty);

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = Fingerprint::new("is AAPL a buy?", &ContextBundle::new());
        let value = CachedReply::new(
            IntentLabel::CompanyAnalysis,
            AgentReply::text("Recommendation: HOLD"),
        );

        cache.insert(key.clone(), value.clone()).await;

        let retrieved = cache.get(&key).await;
        assert_eq!(retrieved, Some(value));
    }

    #[tokio::test]
    async fn test_cache_miss_for_different_context() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let bare = ContextBundle::new();
        let mut loaded = ContextBundle::new();
        loaded.set_document(DocumentContext::new("q3.pdf", "Revenue grew 8%"));

        cache
            .insert(
                Fingerprint::new("summarize", &bare),
                CachedReply::new(IntentLabel::GeneralChat, AgentReply::text("summary")),
            )
            .await;

        assert!(cache.get(&Fingerprint::new("summarize", &loaded)).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_expiry() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        let key = Fingerprint::new("short lived", &ContextBundle::new());

        cache
            .insert(
                key.clone(),
                CachedReply::new(IntentLabel::GeneralChat, AgentReply::text("gone soon")),
            )
            .await;
        assert!(cache.get(&key).await.is_some());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let ctx = ContextBundle::new();

        for i in 0..5 {
            let key = Fingerprint::new(&format!("question {i}"), &ctx);
            cache
                .insert(
                    key,
                    CachedReply::new(IntentLabel::GeneralChat, AgentReply::text("answer")),
                )
                .await;
        }

        assert_eq!(cache.len().await, 5);

        cache.clear().await;
        assert_eq!(cache.len().await, 0);
        assert!(cache.is_empty().await);
    }
}
