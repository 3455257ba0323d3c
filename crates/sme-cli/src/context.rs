//! Shared setup for command handlers: clients, the session store, and
//! locating an analysis to work from.

use std::path::Path;

use anyhow::Context as _;
use sme_client::{BackendClient, ClientConfig, JsonFileStore, MlClient, SessionStore};
use sme_core::{AnalysisResult, AppConfig};

pub(crate) fn backend_client(config: &AppConfig) -> anyhow::Result<BackendClient> {
    Ok(BackendClient::new(&ClientConfig::from_app_config(config))?)
}

pub(crate) fn ml_client(config: &AppConfig) -> anyhow::Result<MlClient> {
    Ok(MlClient::new(&ClientConfig::from_app_config(config))?)
}

pub(crate) fn session_store(config: &AppConfig) -> anyhow::Result<SessionStore<JsonFileStore>> {
    let store = JsonFileStore::open(&config.session_path)?;
    Ok(SessionStore::new(store))
}

/// Reads an analysis from `path`, or falls back to the one cached by the
/// last `sme analyze`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if no path is
/// given and nothing is cached.
pub(crate) fn load_analysis(
    config: &AppConfig,
    path: Option<&Path>,
) -> anyhow::Result<AnalysisResult> {
    if let Some(path) = path {
        return read_analysis_file(path);
    }
    session_store(config)?.analysis()?.ok_or_else(|| {
        anyhow::anyhow!(
            "no analysis available; run `sme analyze <file>` first or pass an analysis JSON file"
        )
    })
}

pub(crate) fn read_analysis_file(path: &Path) -> anyhow::Result<AnalysisResult> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid analysis result", path.display()))
}
