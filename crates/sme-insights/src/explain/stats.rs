use sme_core::SummaryStats;

use super::format_column_name;

/// Describe a column's typical value and spread in one or two sentences.
///
/// Spread is judged by the coefficient of variation (`std / mean × 100`),
/// treated as 0 when the mean is 0.
#[must_use]
pub fn explain_summary_stats(column_name: &str, stats: &SummaryStats) -> String {
    let column = format_column_name(column_name);
    let cv = if stats.mean == 0.0 {
        0.0
    } else {
        stats.std / stats.mean * 100.0
    };
    let (min, max, median) = (stats.min, stats.max, stats.p50);

    let spread = if cv > 50.0 {
        format!(
            ", but varies widely from {min:.0} to {max:.0}. This high variation suggests diverse scenarios or changing conditions."
        )
    } else if cv > 25.0 {
        format!(
            ", with moderate variation (range: {min:.0} to {max:.0}). Some fluctuation is normal for this metric."
        )
    } else {
        format!(
            ", with consistent values (range: {min:.0} to {max:.0}). This stability indicates predictable patterns."
        )
    };

    format!("**{column}**: Typically around {median:.0}{spread}")
}
