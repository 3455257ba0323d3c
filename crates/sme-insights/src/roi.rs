//! Payback projections for scaling on predicted growth.
//!
//! One baseline (monthly revenue, growth rate, gross margin, investment ratio)
//! fans out into three sensitivity scenarios. Only margin and investment ratio
//! are perturbed; the incremental revenue is shared by all three.

use std::fmt;

use serde::Serialize;
use sme_core::AnalysisResult;

use crate::explain::series_stats;

/// Baseline assumptions for a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiScenarioInput {
    /// Monthly revenue in currency units.
    pub baseline_revenue: f64,
    /// Expected growth for the next month, in percent (signed).
    pub growth_percent: f64,
    /// Share of revenue that is gross profit, in percent.
    pub gross_margin_percent: f64,
    /// Upfront investment as a percent of incremental revenue.
    pub investment_ratio_percent: f64,
}

/// Adjustable assumptions a user starts from before tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiAssumptions {
    pub gross_margin_percent: f64,
    pub investment_ratio_percent: f64,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            gross_margin_percent: 40.0,
            investment_ratio_percent: 30.0,
        }
    }
}

impl RoiScenarioInput {
    /// Derive a baseline from an analysis forecast.
    ///
    /// The baseline revenue is the mean forecast value and the growth rate is
    /// the first-to-last change across the forecast. Returns `None` when the
    /// analysis carries no forecast.
    #[must_use]
    pub fn from_analysis(result: &AnalysisResult, assumptions: RoiAssumptions) -> Option<Self> {
        let stats = series_stats(&result.predictions)?;
        Some(Self {
            baseline_revenue: stats.mean,
            growth_percent: stats.percent_change,
            gross_margin_percent: assumptions.gross_margin_percent,
            investment_ratio_percent: assumptions.investment_ratio_percent,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScenarioLabel {
    Conservative,
    Expected,
    Optimistic,
}

impl fmt::Display for ScenarioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conservative => f.write_str("Conservative"),
            Self::Expected => f.write_str("Expected"),
            Self::Optimistic => f.write_str("Optimistic"),
        }
    }
}

/// One projected outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiScenario {
    pub label: ScenarioLabel,
    pub investment_required: f64,
    /// Monthly revenue gained from growth.
    pub incremental_revenue: f64,
    /// Monthly gross profit on the incremental revenue.
    pub incremental_gross_profit: f64,
    pub gross_margin_percent: f64,
    pub investment_ratio_percent: f64,
    /// Months to recover the investment; `f64::INFINITY` when there is no
    /// positive profit to recover it from.
    pub payback_months: f64,
}

impl RoiScenario {
    /// Payback with two decimals, or an em dash when it never pays back.
    #[must_use]
    pub fn payback_display(&self) -> String {
        if self.payback_months.is_finite() {
            format!("{:.2}", self.payback_months)
        } else {
            "\u{2014}".to_string()
        }
    }
}

/// `(label, margin adjustment, investment ratio adjustment)` in percentage points.
const ADJUSTMENTS: [(ScenarioLabel, f64, f64); 3] = [
    (ScenarioLabel::Conservative, -5.0, 10.0),
    (ScenarioLabel::Expected, 0.0, 0.0),
    (ScenarioLabel::Optimistic, 5.0, -10.0),
];

/// Compute the Conservative, Expected and Optimistic scenarios, in that order.
///
/// Never panics: degenerate inputs yield zero amounts or an infinite payback.
#[must_use]
pub fn compute_roi_scenarios(input: &RoiScenarioInput) -> [RoiScenario; 3] {
    let incremental_revenue = input.baseline_revenue * (input.growth_percent / 100.0);

    ADJUSTMENTS.map(|(label, margin_adj, invest_adj)| {
        let margin = clamp_percent(input.gross_margin_percent + margin_adj);
        let invest_ratio = clamp_percent(input.investment_ratio_percent + invest_adj);
        let incremental_gross_profit = incremental_revenue * (margin / 100.0);
        let investment_required = incremental_revenue * (invest_ratio / 100.0);
        let payback_months = if incremental_gross_profit > 0.0 {
            investment_required / incremental_gross_profit
        } else {
            f64::INFINITY
        };

        RoiScenario {
            label,
            investment_required,
            incremental_revenue,
            incremental_gross_profit,
            gross_margin_percent: margin,
            investment_ratio_percent: invest_ratio,
            payback_months,
        }
    })
}

/// Saturate into `[0, 100]`; non-finite values map to 0.
#[must_use]
pub fn clamp_percent(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
