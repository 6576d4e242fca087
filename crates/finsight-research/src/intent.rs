//! Intent labels for query routing
//!
//! Every incoming query resolves to exactly one of these labels, either by
//! the classifier or by a user-forced mode. Routing is total: the
//! orchestrator maps each label to exactly one agent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Intent category of a user query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    /// Company performance and valuation questions with a stance
    CompanyAnalysis,

    /// Questions about a loaded earnings-report document
    PdfAnalysis,

    /// Where-to-research and due-diligence guidance
    ResearchRecommendation,

    /// Everything else: definitions, explanations, small talk
    GeneralChat,
}

impl IntentLabel {
    /// Canonical token for this label, as the classifier emits it
    pub fn as_str(self) -> &'static str {
        match self {
            IntentLabel::CompanyAnalysis => "company_analysis",
            IntentLabel::PdfAnalysis => "pdf_analysis",
            IntentLabel::ResearchRecommendation => "research_recommendation",
            IntentLabel::GeneralChat => "general_chat",
        }
    }

    /// All labels, in the order the classifier prompt lists them
    pub fn all() -> [IntentLabel; 4] {
        [
            IntentLabel::PdfAnalysis,
            IntentLabel::CompanyAnalysis,
            IntentLabel::ResearchRecommendation,
            IntentLabel::GeneralChat,
        ]
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for IntentLabel {
    /// The classification fallback
    fn default() -> Self {
        IntentLabel::GeneralChat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tokens() {
        assert_eq!(IntentLabel::CompanyAnalysis.as_str(), "company_analysis");
        assert_eq!(IntentLabel::PdfAnalysis.as_str(), "pdf_analysis");
        assert_eq!(
            IntentLabel::ResearchRecommendation.as_str(),
            "research_recommendation"
        );
        assert_eq!(IntentLabel::GeneralChat.as_str(), "general_chat");
    }

    #[test]
    fn test_all_covers_every_label() {
        let all = IntentLabel::all();
        assert_eq!(all.len(), 4);
        for label in [
            IntentLabel::CompanyAnalysis,
            IntentLabel::PdfAnalysis,
            IntentLabel::ResearchRecommendation,
            IntentLabel::GeneralChat,
        ] {
            assert!(all.contains(&label));
        }
    }

    #[test]
    fn test_default_is_general_chat() {
        assert_eq!(IntentLabel::default(), IntentLabel::GeneralChat);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&IntentLabel::PdfAnalysis).unwrap();
        assert_eq!(json, "\"pdf_analysis\"");

        let label: IntentLabel = serde_json::from_str("\"company_analysis\"").unwrap();
        assert_eq!(label, IntentLabel::CompanyAnalysis);
    }
}
