//! Terminal rendering for routed replies
//!
//! Output is plain text: a label badge, the reply body, a metrics table
//! when extraction found figures, and the recommendation stance when the
//! agent looked for one.

use std::collections::BTreeMap;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use finsight_core::Recommendation;

use crate::orchestrator::Routed;

/// Render one routed reply for the terminal
pub fn routed_reply(routed: &Routed) -> String {
    let mut out = String::new();

    out.push('[');
    out.push_str(routed.label.as_str());
    out.push(']');
    if routed.from_cache {
        out.push_str(" (cached)");
    }
    out.push_str("\n\n");
    out.push_str(routed.reply.text.trim_end());
    out.push('\n');

    if routed.reply.has_metrics() {
        out.push('\n');
        out.push_str(&metrics_table(&routed.reply.metrics).to_string());
        out.push('\n');
    }

    if let Some(recommendation) = routed.reply.recommendation {
        out.push('\n');
        out.push_str(&stance_line(recommendation));
        out.push('\n');
    }

    out
}

/// Extracted metrics as a two-column table
pub fn metrics_table(metrics: &BTreeMap<String, f64>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    for (key, value) in metrics {
        table.add_row(vec![
            Cell::new(metric_label(key)),
            Cell::new(format_value(*value)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn stance_line(recommendation: Recommendation) -> String {
    if recommendation.is_known() {
        format!("Recommendation: {recommendation}")
    } else {
        "Recommendation: none stated in the analysis".to_string()
    }
}

/// Display name for a metric key, with units for the well-known figures
fn metric_label(key: &str) -> String {
    match key {
        "revenue" => "Revenue ($M)".to_string(),
        "net_income" => "Net Income ($M)".to_string(),
        "eps" => "EPS ($)".to_string(),
        "profit_margin" => "Profit Margin (%)".to_string(),
        other => {
            // Unrecognized keys from the JSON block: title-case the words
            let words: Vec<String> = other
                .split('_')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect();
            words.join(" ")
        }
    }
}

/// Whole numbers render bare, everything else with two decimals
fn format_value(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentLabel;
    use finsight_core::AgentReply;

    fn routed(reply: AgentReply) -> Routed {
        Routed {
            label: IntentLabel::CompanyAnalysis,
            reply,
            from_cache: false,
        }
    }

    #[test]
    fn test_badge_and_body() {
        let out = routed_reply(&routed(AgentReply::text("Solid quarter.")));
        assert!(out.starts_with("[company_analysis]\n"));
        assert!(out.contains("Solid quarter."));
        assert!(!out.contains("(cached)"));
    }

    #[test]
    fn test_cached_marker() {
        let mut r = routed(AgentReply::text("Replayed."));
        r.from_cache = true;
        let out = routed_reply(&r);
        assert!(out.contains("[company_analysis] (cached)"));
    }

    #[test]
    fn test_metrics_render_as_table() {
        let mut metrics = BTreeMap::new();
        metrics.insert("revenue".to_string(), 94_900.0);
        metrics.insert("eps".to_string(), 1.64);

        let out = routed_reply(&routed(AgentReply::text("Figures below.").with_metrics(metrics)));
        assert!(out.contains("Revenue ($M)"));
        assert!(out.contains("94900"));
        assert!(out.contains("EPS ($)"));
        assert!(out.contains("1.64"));
    }

    #[test]
    fn test_no_table_without_metrics() {
        let out = routed_reply(&routed(AgentReply::text("Qualitative only.")));
        assert!(!out.contains("Metric"));
    }

    #[test]
    fn test_recommendation_lines() {
        let out = routed_reply(&routed(
            AgentReply::text("Bullish case.").with_recommendation(Recommendation::Buy),
        ));
        assert!(out.contains("Recommendation: BUY"));

        let out = routed_reply(&routed(
            AgentReply::text("No stance.").with_recommendation(Recommendation::Unknown),
        ));
        assert!(out.contains("Recommendation: none stated"));
    }

    #[test]
    fn test_metric_labels() {
        assert_eq!(metric_label("profit_margin"), "Profit Margin (%)");
        assert_eq!(metric_label("free_cash_flow"), "Free Cash Flow");
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(94_900.0), "94900");
        assert_eq!(format_value(1.64), "1.64");
        assert_eq!(format_value(25.3), "25.30");
    }
}
