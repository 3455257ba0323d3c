//! Service-backed commands: `analyze`, `predict` and `health`.

use std::path::Path;

use anyhow::Context as _;
use sme_core::{AppConfig, PredictionRequest};
use sme_insights::explain_predictions;

use crate::context::{backend_client, ml_client, session_store};
use crate::explain::print_explanation;

/// Upload `file` to the backend, run the ML analysis on its contents, cache
/// both, and print the explanation.
///
/// # Errors
///
/// Returns an error if the file cannot be read, either service call fails,
/// or the session cannot be saved.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    file: &Path,
    analysis_type: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let backend = backend_client(config)?;
    let ml = ml_client(config)?;

    let upload = backend.upload_file(file).await?;
    tracing::info!(
        session_id = %upload.session_id,
        rows = upload.row_count,
        columns = upload.column_count,
        "file uploaded"
    );

    let csv = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let analysis_type = analysis_type.unwrap_or(&upload.analysis_type);
    let analysis = ml.analyze(&csv, analysis_type).await?;

    let mut store = session_store(config)?;
    let mut files = store.uploaded_files()?;
    files.push(upload.clone());
    store.save_uploaded_files(&files)?;
    store.save_session_id(&upload.session_id)?;
    store.save_analysis(&analysis)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!(
        "{}: {} rows, {} columns (session {})",
        upload.file_name, upload.row_count, upload.column_count, upload.session_id
    );
    println!();
    print_explanation(&analysis, false);
    Ok(())
}

/// # Errors
///
/// Returns an error if the ML service call fails.
pub(crate) async fn run_predict(
    config: &AppConfig,
    values: Vec<f64>,
    model: &str,
    horizon: u32,
) -> anyhow::Result<()> {
    let request = PredictionRequest {
        data: values,
        model_type: model.to_owned(),
        horizon,
    };
    let response = ml_client(config)?.predict(&request).await?;

    println!(
        "model {} (confidence {:.0}%)",
        response.model_used,
        response.confidence * 100.0
    );
    for (i, value) in response.predictions.iter().enumerate() {
        println!("{:>4}  {value:.2}", i + 1);
    }
    let e = explain_predictions(&response.predictions, None);
    println!();
    println!("{}", e.plain);
    println!("{}", e.business_impact);
    Ok(())
}

/// # Errors
///
/// Returns an error if either service is unreachable.
pub(crate) async fn run_health(config: &AppConfig) -> anyhow::Result<()> {
    let backend = backend_client(config)?;
    let ml = ml_client(config)?;
    let (backend_ok, ml_ok) = tokio::join!(backend.health(), ml.health());

    let status = |ok: bool| if ok { "up" } else { "down" };
    println!("backend     {:<5} {}", status(backend_ok), config.backend_url);
    println!("ml-service  {:<5} {}", status(ml_ok), config.ml_service_url);

    if !(backend_ok && ml_ok) {
        anyhow::bail!("one or more services are unavailable");
    }
    Ok(())
}
