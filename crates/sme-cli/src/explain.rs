//! `sme explain`: plain-language reading of an analysis result.

use sme_core::AnalysisResult;
use sme_insights::{
    explain_insight, explain_predictions, explain_summary_stats, explain_trend,
    format_column_name, generate_overall_summary,
};

/// Print every explanation for `analysis`. `technical` adds the analyst-facing
/// lines next to the plain ones.
pub(crate) fn print_explanation(analysis: &AnalysisResult, technical: bool) {
    println!("{}", generate_overall_summary(analysis));

    if !analysis.trends.is_empty() {
        println!();
        println!("Trends");
        for (column, trend) in &analysis.trends {
            let e = explain_trend(column, trend);
            println!("- {}: {}", format_column_name(column), e.plain);
            if technical {
                println!("  {}", e.technical);
            }
            println!("  {}", e.insight);
        }
    }

    if !analysis.predictions.is_empty() {
        let e = explain_predictions(&analysis.predictions, None);
        println!();
        println!("Forecast");
        println!("{}", e.plain);
        if technical {
            println!("{}", e.technical);
        }
        println!("{}", e.business_impact);
    }

    if !analysis.insights.is_empty() {
        println!();
        println!("Insights");
        for insight in &analysis.insights {
            let e = explain_insight(insight);
            println!("- {}: {}", insight.title, e.plain);
            if technical && e.technical != e.plain {
                println!("  {}", e.technical);
            }
            println!("  {}", e.actionable);
        }
    }

    if !analysis.summary_stats.is_empty() {
        println!();
        println!("Columns");
        for (column, stats) in &analysis.summary_stats {
            println!("{}", explain_summary_stats(column, stats));
        }
    }
}
