//! Agent reply types
//!
//! An [`AgentReply`] is the complete result of one agent invocation: the
//! response text plus whatever post-processing surfaced from it. A reply is
//! never partially constructed; a request produces either a complete reply
//! or an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Investment recommendation extracted from response text
///
/// `Unknown` is the explicit sentinel for extraction that found no token or
/// found conflicting tokens; callers must not treat it as a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
    Unknown,
}

impl Recommendation {
    /// Canonical uppercase token
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// True for `Buy`, `Hold`, and `Sell`
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one agent invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    /// Response text shown to the user
    pub text: String,

    /// Numeric metrics extracted for rendering, keyed by metric name.
    /// Empty when the agent does no numeric post-processing or extraction
    /// found nothing.
    pub metrics: BTreeMap<String, f64>,

    /// Recommendation extracted from the text, when the agent looks for one
    pub recommendation: Option<Recommendation>,
}

impl AgentReply {
    /// Create a plain text reply with no extracted fields
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metrics: BTreeMap::new(),
            recommendation: None,
        }
    }

    /// Attach extracted metrics
    pub fn with_metrics(mut self, metrics: BTreeMap<String, f64>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Attach an extracted recommendation
    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendation = Some(recommendation);
        self
    }

    /// Whether any metrics were extracted
    pub fn has_metrics(&self) -> bool {
        !self.metrics.is_empty()
    }
}
