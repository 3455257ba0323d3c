//! `sme session`: inspect or reset the cached session.

use clap::Subcommand;
use sme_client::restore_session;
use sme_core::AppConfig;

use crate::context::{backend_client, session_store};

/// Sub-commands available under `session`.
#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// Restore and show the cached session
    Show,
    /// Forget cached uploads, analysis and session id
    Clear,
}

/// # Errors
///
/// Returns an error if the session file cannot be read or written.
pub(crate) async fn run_session(config: &AppConfig, command: &SessionCommands) -> anyhow::Result<()> {
    let mut store = session_store(config)?;
    match command {
        SessionCommands::Show => {
            let backend = backend_client(config)?;
            let restored = restore_session(&mut store, &backend).await?;
            if !restored.restored {
                println!("no saved session; run `sme analyze <file>` to start one");
                return Ok(());
            }
            println!("{:<38}{:<30}{:>8}{:>9}", "SESSION", "FILE", "ROWS", "COLUMNS");
            for file in &restored.uploaded_files {
                println!(
                    "{:<38}{:<30}{:>8}{:>9}",
                    file.session_id, file.file_name, file.row_count, file.column_count
                );
            }
            match &restored.analysis {
                Some(analysis) => println!(
                    "\ncached analysis: {} trends, {} forecast values, {} insights",
                    analysis.trends.len(),
                    analysis.predictions.len(),
                    analysis.insights.len()
                ),
                None => println!("\nno cached analysis"),
            }
        }
        SessionCommands::Clear => {
            store.clear()?;
            println!("session cleared ({})", config.session_path.display());
        }
    }
    Ok(())
}
