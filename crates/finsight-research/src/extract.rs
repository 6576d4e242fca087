//! Post-processing extraction over model output
//!
//! All regex and text scraping over completion text lives here, so the
//! agents and orchestrator never parse prose themselves. Every function is
//! total over arbitrary input: absence is a typed result (`None`, an empty
//! map, or [`Recommendation::Unknown`]), never a panic and never a silent
//! wrong value.

use crate::intent::IntentLabel;
use finsight_core::Recommendation;
use regex::Regex;
use std::collections::BTreeMap;

/// Metric name and the pattern that captures its value (group 1) and an
/// optional magnitude suffix (group 2)
const METRIC_PATTERNS: [(&str, &str); 4] = [
    (
        "revenue",
        r"(?i)\b(?:total\s+)?revenue[^0-9$\n]{0,16}\$?([0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?)(?:\s*(billion|million|B|M)\b)?",
    ),
    (
        "net_income",
        r"(?i)\bnet\s+income[^0-9$\n]{0,16}\$?([0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?)(?:\s*(billion|million|B|M)\b)?",
    ),
    (
        "eps",
        r"(?i)\beps[^0-9$\n]{0,8}\$?([0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?)",
    ),
    (
        "profit_margin",
        r"(?i)\b(?:net|profit)(?:\s+profit)?\s+margin[^0-9%\n]{0,16}([0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?)\s*%",
    ),
];

/// Find the earliest canonical intent token in classifier output
///
/// Matching is case-insensitive and ignores any text around the token, so
/// a chatty classifier response still resolves as long as exactly the
/// expected vocabulary appears somewhere in it. `None` means the output
/// contained no known token and the caller must fall back.
pub fn first_label_token(text: &str) -> Option<IntentLabel> {
    let haystack = text.to_lowercase();
    IntentLabel::all()
        .into_iter()
        .filter_map(|label| haystack.find(label.as_str()).map(|pos| (pos, label)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, label)| label)
}

/// Extract a BUY/HOLD/SELL stance from response text
///
/// Counts the distinct uppercase whole-word tokens present. Exactly one
/// distinct token maps to its variant; zero or several distinct tokens map
/// to [`Recommendation::Unknown`]. Matching is case-sensitive: prose like
/// "I would not buy here" must not read as a stance.
pub fn recommendation(text: &str) -> Recommendation {
    let mut found: Vec<&str> = Vec::new();
    if let Ok(re) = Regex::new(r"\b(BUY|HOLD|SELL)\b") {
        for token in re.find_iter(text) {
            let token = token.as_str();
            if !found.contains(&token) {
                found.push(token);
            }
        }
    }

    match found.as_slice() {
        ["BUY"] => Recommendation::Buy,
        ["HOLD"] => Recommendation::Hold,
        ["SELL"] => Recommendation::Sell,
        _ => Recommendation::Unknown,
    }
}

/// Scrape headline financial metrics out of analysis prose
///
/// Money values normalize to millions: a `B`/`billion` suffix multiplies
/// by 1000, `M`/`million` and unsuffixed values pass through. EPS stays in
/// currency units and margins in percent. Only the first occurrence of
/// each metric counts. Text with no recognizable figures yields an empty
/// map.
pub fn metric_set(text: &str) -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();

    for (name, pattern) in METRIC_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(text) {
                if let Some(raw) = caps.get(1) {
                    if let Ok(mut value) = raw.as_str().replace(',', "").parse::<f64>() {
                        let billions = caps.get(2).is_some_and(|unit| {
                            unit.as_str().eq_ignore_ascii_case("b")
                                || unit.as_str().eq_ignore_ascii_case("billion")
                        });
                        if billions {
                            value *= 1000.0;
                        }
                        metrics.insert(name.to_string(), value);
                    }
                }
            }
        }
    }

    metrics
}

/// Headline metrics from a document analysis response
///
/// The document prompt asks for a fenced JSON block of figures; its
/// top-level numeric fields win when present. When no block parses, or the
/// block holds no numbers, the prose patterns of [`metric_set`] are the
/// fallback. Either path may yield nothing.
pub fn document_metrics(text: &str) -> BTreeMap<String, f64> {
    if let Some(serde_json::Value::Object(map)) = json_block(text) {
        let numeric: BTreeMap<String, f64> = map
            .into_iter()
            .filter_map(|(key, value)| value.as_f64().map(|v| (key, v)))
            .collect();
        if !numeric.is_empty() {
            return numeric;
        }
    }

    metric_set(text)
}

/// Extract structured JSON from response text
///
/// Prefers the first fenced ```json block; otherwise tries the outermost
/// brace-delimited span. `None` when neither parses.
pub fn json_block(text: &str) -> Option<serde_json::Value> {
    if let Ok(re) = Regex::new(r"(?s)```json\s*(.*?)\s*```") {
        if let Some(caps) = re.captures(text) {
            if let Some(block) = caps.get(1) {
                if let Ok(value) = serde_json::from_str(block.as_str()) {
                    return Some(value);
                }
            }
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Character-boundary-safe prefix of at most `limit` characters
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- intent token ---

    #[test]
    fn test_label_exact_token() {
        assert_eq!(
            first_label_token("company_analysis"),
            Some(IntentLabel::CompanyAnalysis)
        );
        assert_eq!(
            first_label_token("  general_chat\n"),
            Some(IntentLabel::GeneralChat)
        );
    }

    #[test]
    fn test_label_embedded_in_prose() {
        assert_eq!(
            first_label_token("The intent here is pdf_analysis."),
            Some(IntentLabel::PdfAnalysis)
        );
    }

    #[test]
    fn test_label_case_insensitive() {
        assert_eq!(
            first_label_token("RESEARCH_RECOMMENDATION"),
            Some(IntentLabel::ResearchRecommendation)
        );
        assert_eq!(
            first_label_token("Company_Analysis"),
            Some(IntentLabel::CompanyAnalysis)
        );
    }

    #[test]
    fn test_label_earliest_wins() {
        let text = "pdf_analysis or maybe company_analysis";
        assert_eq!(first_label_token(text), Some(IntentLabel::PdfAnalysis));

        let text = "company_analysis or maybe pdf_analysis";
        assert_eq!(first_label_token(text), Some(IntentLabel::CompanyAnalysis));
    }

    #[test]
    fn test_label_absent() {
        assert_eq!(first_label_token("I am not sure what you mean"), None);
        assert_eq!(first_label_token(""), None);
    }

    // --- recommendation ---

    #[test]
    fn test_recommendation_single_token() {
        assert_eq!(
            recommendation("Recommendation: BUY\nStrong quarter."),
            Recommendation::Buy
        );
        assert_eq!(recommendation("My stance is HOLD."), Recommendation::Hold);
        assert_eq!(recommendation("SELL"), Recommendation::Sell);
    }

    #[test]
    fn test_recommendation_repeated_token_is_one_distinct() {
        let text = "BUY. To repeat: BUY, and once more BUY.";
        assert_eq!(recommendation(text), Recommendation::Buy);
    }

    #[test]
    fn test_recommendation_absent() {
        assert_eq!(
            recommendation("A balanced view with no stance."),
            Recommendation::Unknown
        );
        assert_eq!(recommendation(""), Recommendation::Unknown);
    }

    #[test]
    fn test_recommendation_conflicting_tokens() {
        let text = "Recommendation: BUY, though some would SELL.";
        assert_eq!(recommendation(text), Recommendation::Unknown);
    }

    #[test]
    fn test_recommendation_ignores_lowercase() {
        assert_eq!(
            recommendation("I would not buy at these prices"),
            Recommendation::Unknown
        );
        // The uppercase token still wins next to lowercase prose
        assert_eq!(
            recommendation("Do not buy more. Recommendation: HOLD"),
            Recommendation::Hold
        );
    }

    #[test]
    fn test_recommendation_respects_word_boundaries() {
        assert_eq!(recommendation("BUYING pressure is up"), Recommendation::Unknown);
        assert_eq!(recommendation("SELLOFF continues"), Recommendation::Unknown);
    }

    // --- metrics ---

    #[test]
    fn test_metrics_billion_suffix_normalizes_to_millions() {
        let text = "Total Revenue: $94.9B (up 6% YoY)";
        let metrics = metric_set(text);
        assert_eq!(metrics.get("revenue"), Some(&94_900.0));
    }

    #[test]
    fn test_metrics_million_suffix_passes_through() {
        let text = "Net Income: $24,160M";
        let metrics = metric_set(text);
        assert_eq!(metrics.get("net_income"), Some(&24_160.0));
    }

    #[test]
    fn test_metrics_prose_forms() {
        let text = "Revenue of $394.3 billion, with net income of 97 billion. \
                    EPS: $6.13. Net margin of 25.3% held steady.";
        let metrics = metric_set(text);
        assert_eq!(metrics.get("revenue"), Some(&394_300.0));
        assert_eq!(metrics.get("net_income"), Some(&97_000.0));
        assert_eq!(metrics.get("eps"), Some(&6.13));
        assert_eq!(metrics.get("profit_margin"), Some(&25.3));
    }

    #[test]
    fn test_metrics_first_occurrence_wins() {
        let text = "Revenue: $10B this year versus revenue of $8B last year";
        let metrics = metric_set(text);
        assert_eq!(metrics.get("revenue"), Some(&10_000.0));
    }

    #[test]
    fn test_metrics_empty_on_unrelated_text() {
        assert!(metric_set("Nothing quantitative to see here.").is_empty());
        assert!(metric_set("").is_empty());
    }

    #[test]
    fn test_metrics_comma_thousands() {
        let metrics = metric_set("Revenue: $1,234.5M");
        assert_eq!(metrics.get("revenue"), Some(&1_234.5));
    }

    // --- json block ---

    #[test]
    fn test_json_fenced_block() {
        let text = "Here are the figures:\n```json\n{\"revenue\": 94900, \"eps\": 1.64}\n```\nDone.";
        let value = json_block(text).unwrap();
        assert_eq!(value["revenue"], 94_900);
        assert_eq!(value["eps"], 1.64);
    }

    #[test]
    fn test_json_bare_braces_fallback() {
        let text = "Metrics follow. {\"eps\": 2.5} That is all.";
        let value = json_block(text).unwrap();
        assert_eq!(value["eps"], 2.5);
    }

    #[test]
    fn test_json_absent() {
        assert!(json_block("no json anywhere").is_none());
        assert!(json_block("").is_none());
    }

    #[test]
    fn test_json_malformed() {
        assert!(json_block("```json\n{not valid}\n```").is_none());
        assert!(json_block("{truncated").is_none());
    }

    // --- document metrics ---

    #[test]
    fn test_document_metrics_prefers_json_block() {
        let text = "Revenue: $1B in prose.\n\
                    ```json\n{\"revenue\": 94900, \"eps\": 1.64}\n```";
        let metrics = document_metrics(text);
        assert_eq!(metrics.get("revenue"), Some(&94_900.0));
        assert_eq!(metrics.get("eps"), Some(&1.64));
    }

    #[test]
    fn test_document_metrics_skips_non_numeric_json_fields() {
        let text = "```json\n{\"revenue\": 500, \"summary\": \"solid quarter\"}\n```";
        let metrics = document_metrics(text);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics.get("revenue"), Some(&500.0));
    }

    #[test]
    fn test_document_metrics_falls_back_to_prose() {
        let text = "No block this time. Revenue: $94.9B and EPS: $1.64.";
        let metrics = document_metrics(text);
        assert_eq!(metrics.get("revenue"), Some(&94_900.0));
        assert_eq!(metrics.get("eps"), Some(&1.64));
    }

    #[test]
    fn test_document_metrics_all_string_json_falls_back() {
        // A block with nothing numeric does not mask figures in the prose
        let text = "Net Income: $24,160M\n```json\n{\"note\": \"see prose\"}\n```";
        let metrics = document_metrics(text);
        assert_eq!(metrics.get("net_income"), Some(&24_160.0));
    }

    #[test]
    fn test_document_metrics_empty_when_nothing_found() {
        assert!(document_metrics("A purely qualitative summary.").is_empty());
    }

    // --- truncation ---

    #[test]
    fn test_truncate_identity_below_limit() {
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_exact_cut() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abcdef", 0), "");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let text = "répété ça 重复重复";
        let cut = truncate_chars(text, 8);
        assert_eq!(cut.chars().count(), 8);
        assert!(text.starts_with(cut));

        // Counting characters, not bytes
        assert_eq!(truncate_chars("数数数数", 2), "数数");
    }
}
