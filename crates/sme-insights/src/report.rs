//! Exportable reports built from an analysis and its ROI scenarios.

use std::fmt::Write as _;

use sme_core::AnalysisResult;

use crate::explain::{explain_insight, explain_trend, format_column_name, generate_overall_summary};
use crate::roi::RoiScenario;

const CSV_HEADER: [&str; 4] = ["Section", "Item", "Value", "Detail"];

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn push_row(out: &mut String, fields: [&str; 4]) {
    let line = fields.map(csv_field).join(",");
    out.push_str(&line);
    out.push('\n');
}

/// Flatten an analysis into a four-column CSV document.
///
/// Sections appear in a fixed order: trends, summary statistics, forecast,
/// insights, ROI scenarios. Empty sections are omitted.
#[must_use]
pub fn export_report_csv(result: &AnalysisResult, scenarios: &[RoiScenario]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER);

    for (column, trend) in &result.trends {
        let detail = format!("{}; volatility {:.1}%", trend.direction, trend.volatility);
        push_row(
            &mut out,
            ["Trend", column, &format!("{:.1}", trend.change_percent), &detail],
        );
    }

    for (column, stats) in &result.summary_stats {
        let detail = format!(
            "median {:.2}; min {:.2}; max {:.2}; std {:.2}",
            stats.p50, stats.min, stats.max, stats.std
        );
        push_row(
            &mut out,
            ["Statistic", column, &format!("{:.2}", stats.mean), &detail],
        );
    }

    for (i, value) in result.predictions.iter().enumerate() {
        push_row(
            &mut out,
            ["Forecast", &format!("Period {}", i + 1), &format!("{value:.2}"), ""],
        );
    }

    for insight in &result.insights {
        push_row(
            &mut out,
            ["Insight", &insight.title, &format!("{:.2}", insight.score), &insight.message],
        );
    }

    for scenario in scenarios {
        let detail = format!(
            "investment {:.2}; monthly gross profit {:.2}; margin {:.0}%; investment ratio {:.0}%",
            scenario.investment_required,
            scenario.incremental_gross_profit,
            scenario.gross_margin_percent,
            scenario.investment_ratio_percent,
        );
        push_row(
            &mut out,
            ["ROI", &scenario.label.to_string(), &scenario.payback_display(), &detail],
        );
    }

    out
}

/// Render the plain-text body used for e-mailed reports.
#[must_use]
pub fn render_text_report(result: &AnalysisResult, scenarios: &[RoiScenario]) -> String {
    let mut out = generate_overall_summary(result);

    if !result.trends.is_empty() {
        out.push_str("\n\nTrends\n");
        for (column, trend) in &result.trends {
            let explained = explain_trend(column, trend);
            let _ = writeln!(out, "- {}: {}", format_column_name(column), explained.plain);
        }
    }

    if !result.insights.is_empty() {
        out.push_str("\nInsights\n");
        for insight in &result.insights {
            let explained = explain_insight(insight);
            let _ = writeln!(out, "- {}: {}", insight.title, explained.plain);
            let _ = writeln!(out, "  {}", explained.actionable);
        }
    }

    if !scenarios.is_empty() {
        out.push_str("\nROI Scenarios\n");
        let _ = writeln!(
            out,
            "{:<13} {:>14} {:>14} {:>10}",
            "Scenario", "Investment", "Gross profit", "Payback"
        );
        for s in scenarios {
            let _ = writeln!(
                out,
                "{:<13} {:>14.2} {:>14.2} {:>10}",
                s.label.to_string(),
                s.investment_required,
                s.incremental_gross_profit,
                s.payback_display()
            );
        }
    }

    out
}
