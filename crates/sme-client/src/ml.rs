//! Client for the ML service (`/analyze`, `/predict`, `/health`).

use serde::Serialize;
use sme_core::{AnalysisResult, PredictionRequest, PredictionResponse};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{decode, HttpTransport};

pub struct MlClient {
    http: HttpTransport,
}

#[derive(Serialize)]
struct AnalyzeBody<'a> {
    data: &'a str,
    analysis_type: &'a str,
}

impl MlClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if `config.ml_service_url` is not an
    /// http(s) URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpTransport::new(config, &config.ml_service_url)?,
        })
    }

    /// # Errors
    ///
    /// Same as [`MlClient::new`].
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&ClientConfig::for_base_url(base_url))
    }

    /// Runs the full analysis on raw CSV text. `analysis_type` is usually
    /// `"auto"`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an unexpected body.
    pub async fn analyze(
        &self,
        csv: &str,
        analysis_type: &str,
    ) -> Result<AnalysisResult, ClientError> {
        let url = self.http.url("analyze");
        let body = AnalyzeBody {
            data: csv,
            analysis_type,
        };
        tracing::info!(bytes = csv.len(), analysis_type, "requesting ML analysis");
        let value = self
            .http
            .execute("analyze", |client| client.post(&url).json(&body))
            .await?;
        decode(value, "analyze")
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty series, otherwise any
    /// transport error or an unexpected body.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ClientError> {
        if request.data.is_empty() {
            return Err(sme_core::CoreError::Validation {
                field: "data",
                reason: "at least one value is required".to_owned(),
            }
            .into());
        }
        let url = self.http.url("predict");
        let value = self
            .http
            .execute("predict", |client| client.post(&url).json(request))
            .await?;
        decode(
            value,
            &format!("predict(model={}, horizon={})", request.model_type, request.horizon),
        )
    }

    pub async fn health(&self) -> bool {
        self.http.is_healthy("health").await
    }
}
