use serde::Serialize;
use sme_core::{InsightKind, InsightRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightExplanation {
    /// The service's original message.
    pub technical: String,
    pub plain: String,
    pub actionable: String,
}

/// Explain one ML insight according to its kind and score.
#[must_use]
pub fn explain_insight(insight: &InsightRecord) -> InsightExplanation {
    let score = insight.score;
    let message = insight.message.as_str();

    let (plain, actionable): (String, &str) = match &insight.kind {
        InsightKind::DataQuality => {
            if score > 0.9 {
                (
                    "Your data is excellent quality with very few missing values. This gives us high confidence in the analysis.".into(),
                    "\u{2705} Maintain your current data collection processes.",
                )
            } else if score > 0.7 {
                (
                    "Your data has good quality overall, though some information is missing. The analysis is still reliable.".into(),
                    "\u{1f4a1} Consider reviewing data entry processes to capture more complete information.",
                )
            } else {
                (
                    "Your data has some quality concerns with missing information. This may affect the accuracy of predictions.".into(),
                    "\u{26a0}\u{fe0f} Prioritize improving data collection to get more accurate insights.",
                )
            }
        }
        InsightKind::Correlation => {
            if score > 0.7 {
                (
                    "We found a strong connection between some of your metrics. When one changes, the other tends to change in a predictable way.".into(),
                    "\u{1f517} Use these relationships to forecast one metric based on another, or identify leading indicators.",
                )
            } else if score > 0.4 {
                (
                    "There's a moderate relationship between some of your data points. They influence each other to some degree.".into(),
                    "\u{1f4ca} Monitor these related metrics together to spot patterns early.",
                )
            } else {
                (
                    "Your metrics show weak connections, suggesting they operate independently.".into(),
                    "\u{1f4cc} Track these metrics separately as they don't significantly influence each other.",
                )
            }
        }
        InsightKind::Anomaly => {
            let outlier_percentage = (1.0 - score) * 10.0;
            if outlier_percentage > 5.0 {
                (
                    format!(
                        "We detected some unusual values in your data ({outlier_percentage:.1}% outliers). These could be errors, special events, or important exceptions."
                    ),
                    "\u{1f50d} Review these unusual values to determine if they're errors that need correction or genuine exceptional cases that need attention.",
                )
            } else {
                (
                    "Your data shows normal patterns with very few outliers. This suggests consistent operations.".into(),
                    "\u{2705} Continue monitoring for any emerging anomalies.",
                )
            }
        }
        InsightKind::Business => {
            let actionable = if message.to_lowercase().contains("revenue") {
                "\u{1f4b0} Track this metric closely as it directly impacts business performance."
            } else {
                "\u{1f4c8} Use this insight to inform strategic decisions."
            };
            (message.to_string(), actionable)
        }
        InsightKind::Other(_) => {
            let actionable = if score > 0.7 {
                "\u{2705} This is a positive indicator for your business."
            } else {
                "\u{1f4a1} Consider investigating this further."
            };
            (message.to_string(), actionable)
        }
    };

    InsightExplanation {
        technical: message.to_string(),
        plain,
        actionable: actionable.to_string(),
    }
}
