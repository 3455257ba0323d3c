//! `sme roi`: payback scenarios for scaling on predicted growth.

use std::path::PathBuf;

use clap::Args;
use sme_core::AppConfig;
use sme_insights::{compute_roi_scenarios, RoiAssumptions, RoiScenario, RoiScenarioInput};

use crate::context::load_analysis;

#[derive(Debug, Args)]
pub struct RoiArgs {
    /// Monthly baseline revenue; derived from the forecast when omitted
    #[arg(long, requires = "growth")]
    pub baseline: Option<f64>,
    /// Expected growth in percent; derived from the forecast when omitted
    #[arg(long, allow_negative_numbers = true, requires = "baseline")]
    pub growth: Option<f64>,
    /// Gross margin in percent
    #[arg(long, default_value_t = 40.0)]
    pub margin: f64,
    /// Upfront investment as a percent of incremental revenue
    #[arg(long, default_value_t = 30.0)]
    pub investment_ratio: f64,
    /// Analysis JSON to derive the baseline from (defaults to the cached analysis)
    #[arg(long)]
    pub analysis: Option<PathBuf>,
    /// Print scenarios as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resolve the scenario input from explicit flags or the forecast.
///
/// # Errors
///
/// Returns an error if no baseline is given and no forecast is available.
pub(crate) fn resolve_input(config: &AppConfig, args: &RoiArgs) -> anyhow::Result<RoiScenarioInput> {
    if let (Some(baseline_revenue), Some(growth_percent)) = (args.baseline, args.growth) {
        return Ok(RoiScenarioInput {
            baseline_revenue,
            growth_percent,
            gross_margin_percent: args.margin,
            investment_ratio_percent: args.investment_ratio,
        });
    }

    let analysis = load_analysis(config, args.analysis.as_deref())?;
    let assumptions = RoiAssumptions {
        gross_margin_percent: args.margin,
        investment_ratio_percent: args.investment_ratio,
    };
    RoiScenarioInput::from_analysis(&analysis, assumptions).ok_or_else(|| {
        anyhow::anyhow!("analysis has no forecast; pass --baseline and --growth instead")
    })
}

/// # Errors
///
/// Returns an error if the input cannot be resolved.
pub(crate) fn run_roi(config: &AppConfig, args: &RoiArgs) -> anyhow::Result<()> {
    let input = resolve_input(config, args)?;
    let scenarios = compute_roi_scenarios(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scenarios)?);
        return Ok(());
    }

    println!(
        "Baseline revenue {:.2}/month, growth {:.1}%",
        input.baseline_revenue, input.growth_percent
    );
    println!();
    print_scenarios(&scenarios);
    Ok(())
}

pub(crate) fn print_scenarios(scenarios: &[RoiScenario]) {
    println!(
        "{:<14}{:>9}{:>12}{:>14}{:>16}{:>18}{:>10}",
        "SCENARIO", "MARGIN", "INVEST %", "INVESTMENT", "INCR. REVENUE", "INCR. GROSS PROFIT", "PAYBACK"
    );
    for s in scenarios {
        println!(
            "{:<14}{:>8.1}%{:>11.1}%{:>14.2}{:>16.2}{:>18.2}{:>10}",
            s.label.to_string(),
            s.gross_margin_percent,
            s.investment_ratio_percent,
            s.investment_required,
            s.incremental_revenue,
            s.incremental_gross_profit,
            s.payback_display()
        );
    }
}
