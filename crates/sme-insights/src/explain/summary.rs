use sme_core::{AnalysisResult, InsightKind, TrendDirection};

use super::explain_predictions;

/// Assemble the overall analysis paragraph.
///
/// Clauses appear in a fixed order and only when their data is present:
/// data quality, trend majority, forecast, strengths, areas for improvement.
#[must_use]
pub fn generate_overall_summary(result: &AnalysisResult) -> String {
    let mut parts: Vec<String> = vec!["\u{1f4ca} **Analysis Summary**\n".to_string()];

    let positive = result.insights.iter().filter(|i| i.score > 0.7).count();
    let concerns = result.insights.iter().filter(|i| i.score < 0.5).count();

    if let Some(quality) = result
        .insights
        .iter()
        .find(|i| i.kind == InsightKind::DataQuality)
    {
        let clause = if quality.score > 0.9 {
            "Your data is comprehensive and reliable, providing a solid foundation for analysis."
        } else if quality.score > 0.7 {
            "Your data is in good shape with minor gaps that don't significantly impact the analysis."
        } else {
            "Your data has some quality issues that may affect accuracy. Consider improving data collection."
        };
        parts.push(clause.to_string());
    }

    let trend_count = result.trends.len();
    if trend_count > 0 {
        let increasing = result
            .trends
            .values()
            .filter(|t| t.direction == TrendDirection::Increasing)
            .count();
        let decreasing = result
            .trends
            .values()
            .filter(|t| t.direction == TrendDirection::Decreasing)
            .count();

        let clause = match increasing.cmp(&decreasing) {
            std::cmp::Ordering::Greater => format!(
                "\n\u{1f4c8} **Positive Momentum**: Most of your key metrics ({increasing} out of {trend_count}) are showing growth, which is a good sign for business health."
            ),
            std::cmp::Ordering::Less => format!(
                "\n\u{1f4c9} **Attention Needed**: Several metrics ({decreasing} out of {trend_count}) are declining. This warrants investigation and possible intervention."
            ),
            std::cmp::Ordering::Equal => "\n\u{1f4ca} **Mixed Signals**: Your metrics show a balanced mix of increases and decreases, suggesting a transitional period.".to_string(),
        };
        parts.push(clause);
    }

    if !result.predictions.is_empty() {
        let forecast = explain_predictions(&result.predictions, None);
        parts.push(format!("\n\u{1f52e} **Forecast**: {}", forecast.plain));
    }

    if positive > 0 {
        parts.push(format!(
            "\n\u{2705} **Strengths**: We identified {positive} positive indicators in your data."
        ));
    }
    if concerns > 0 {
        parts.push(format!(
            "\n\u{26a0}\u{fe0f} **Areas for Improvement**: {concerns} areas need attention to optimize performance."
        ));
    }

    parts.push(
        "\n\n\u{1f4a1} **Next Steps**: Review the detailed insights below and focus on the areas marked for attention. The predictions can help you plan for the upcoming period.".to_string(),
    );

    parts.join(" ")
}
