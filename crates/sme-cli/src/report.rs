//! `sme report`: export or e-mail the current analysis.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Subcommand;
use sme_core::{AnalysisResult, AppConfig, EmailReportRequest};
use sme_insights::{
    compute_roi_scenarios, export_report_csv, render_text_report, RoiAssumptions, RoiScenario,
    RoiScenarioInput,
};

use crate::context::{backend_client, load_analysis};

/// Sub-commands available under `report`.
#[derive(Debug, Subcommand)]
pub enum ReportCommands {
    /// Write the analysis and ROI scenarios as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Analysis JSON to export (defaults to the cached analysis)
        #[arg(long)]
        analysis: Option<PathBuf>,
    },
    /// E-mail a plain-text report through the backend
    Email {
        /// Recipient address
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "analysis")]
        report_type: String,
        /// Analysis JSON to send (defaults to the cached analysis)
        #[arg(long)]
        analysis: Option<PathBuf>,
    },
}

/// Scenarios at the default assumptions, or none when there is no forecast.
fn default_scenarios(analysis: &AnalysisResult) -> Vec<RoiScenario> {
    RoiScenarioInput::from_analysis(analysis, RoiAssumptions::default())
        .map(|input| compute_roi_scenarios(&input).to_vec())
        .unwrap_or_default()
}

/// # Errors
///
/// Returns an error if no analysis is available, the output cannot be
/// written, or the backend rejects the e-mail.
pub(crate) async fn run_report(config: &AppConfig, command: &ReportCommands) -> anyhow::Result<()> {
    match command {
        ReportCommands::Export { output, analysis } => {
            let analysis = load_analysis(config, analysis.as_deref())?;
            let csv = export_report_csv(&analysis, &default_scenarios(&analysis));
            match output {
                Some(path) => {
                    std::fs::write(path, csv)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("report written to {}", path.display());
                }
                None => print!("{csv}"),
            }
        }
        ReportCommands::Email {
            to,
            report_type,
            analysis,
        } => {
            let analysis = load_analysis(config, analysis.as_deref())?;
            let request = EmailReportRequest {
                email: to.clone(),
                report_data: render_text_report(&analysis, &default_scenarios(&analysis)),
                report_type: report_type.clone(),
            };
            let ack = backend_client(config)?.send_report_email(&request).await?;
            println!(
                "{}",
                ack.message
                    .unwrap_or_else(|| format!("report sent to {to}"))
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenarios_need_a_forecast() {
        assert!(default_scenarios(&AnalysisResult::default()).is_empty());
        let analysis = AnalysisResult {
            predictions: vec![100.0, 120.0],
            ..AnalysisResult::default()
        };
        assert_eq!(default_scenarios(&analysis).len(), 3);
    }
}
