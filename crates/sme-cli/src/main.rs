mod analyze;
mod chat;
mod context;
mod explain;
mod report;
mod roi;
mod schedules;
mod session;
mod template;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chat::ChatCommands;
use report::ReportCommands;
use roi::RoiArgs;
use schedules::ScheduleCommands;
use session::SessionCommands;
use template::TemplateCommands;

#[derive(Debug, Parser)]
#[command(name = "sme")]
#[command(about = "Sales analytics, forecasts and ROI planning for small businesses")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Payback scenarios for scaling on predicted growth
    Roi(RoiArgs),
    /// Starter CSV templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Explain an analysis result in plain language
    Explain {
        /// Analysis JSON (defaults to the cached analysis)
        path: Option<PathBuf>,
        /// Include the analyst-facing explanations
        #[arg(long)]
        technical: bool,
    },
    /// Upload a data file and run the ML analysis
    Analyze {
        file: PathBuf,
        #[arg(long)]
        analysis_type: Option<String>,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forecast a series of values
    Predict {
        /// Comma-separated observations, oldest first
        #[arg(value_delimiter = ',', allow_negative_numbers = true, required = true)]
        values: Vec<f64>,
        #[arg(long, default_value = "patchtst")]
        model: String,
        #[arg(long, default_value_t = 7)]
        horizon: u32,
    },
    /// Check that the backend and ML service are reachable
    Health,
    /// Cached session state
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Scheduled comparison reports
    Schedules {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Export or e-mail reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Conversations about uploaded data
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = sme_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Roi(args)) => roi::run_roi(&config, &args)?,
        Some(Commands::Template { command }) => template::run_template(&command)?,
        Some(Commands::Explain { path, technical }) => {
            let analysis = context::load_analysis(&config, path.as_deref())?;
            explain::print_explanation(&analysis, technical);
        }
        Some(Commands::Analyze {
            file,
            analysis_type,
            json,
        }) => analyze::run_analyze(&config, &file, analysis_type.as_deref(), json).await?,
        Some(Commands::Predict {
            values,
            model,
            horizon,
        }) => analyze::run_predict(&config, values, &model, horizon).await?,
        Some(Commands::Health) => analyze::run_health(&config).await?,
        Some(Commands::Session { command }) => session::run_session(&config, &command).await?,
        Some(Commands::Schedules { command }) => {
            schedules::run_schedules(&config, command).await?;
        }
        Some(Commands::Report { command }) => report::run_report(&config, &command).await?,
        Some(Commands::Chat { command }) => chat::run_chat(&config, &command).await?,
        None => println!("sme: no command given, run `sme --help` for usage"),
    }

    Ok(())
}
