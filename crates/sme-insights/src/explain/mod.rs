//! Plain-language explanations of ML analysis output.
//!
//! Each explainer turns numeric signals into parallel text registers: a
//! technical line for analysts, a plain sentence for owners, and an
//! actionable or insight line. All functions are total; degenerate input
//! produces a fixed fallback sentence instead of an error.

mod insight;
mod prediction;
mod stats;
mod summary;
mod trend;

pub use insight::{explain_insight, InsightExplanation};
pub use prediction::{explain_predictions, series_stats, PredictionExplanation, SeriesStats};
pub use stats::explain_summary_stats;
pub use summary::generate_overall_summary;
pub use trend::{explain_trend, TrendExplanation};

/// Humanize a raw column key: `marketing_spend` → `Marketing Spend`,
/// `avgCheck` → `Avg Check`.
#[must_use]
pub fn format_column_name(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '_' => spaced.push(' '),
            c if c.is_ascii_uppercase() => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
