//! Client for the analytics backend REST API.
//!
//! Covers data upload and session lookup under `/api/v1/data`, comparison
//! schedules under `/api/schedules`, and e-mailed reports under
//! `/api/reports`. Chat endpoints live in [`crate::chat`].

use std::path::Path;

use reqwest::multipart::{Form, Part};
use sme_core::validate::require_upload;
use sme_core::{
    ApiAck, ComparisonSchedule, DataInsight, EmailReportRequest, FileAnalysisResponse,
    ScheduleRequest,
};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{decode, decode_field, HttpTransport};

pub struct BackendClient {
    pub(crate) http: HttpTransport,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if `config.backend_url` is not an
    /// http(s) URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpTransport::new(config, &config.backend_url)?,
        })
    }

    /// Creates a client with default settings and a custom base URL (for
    /// testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::new`].
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&ClientConfig::for_base_url(base_url))
    }

    /// Uploads a data file as multipart field `file` and returns the backend's
    /// first-pass analysis. Sent once, never retried.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Io`] if the file cannot be read.
    /// - [`ClientError::Validation`] before reading if the file is not
    ///   csv/xlsx/xls or is larger than 50 MB.
    /// - [`ClientError::Api`] if the backend rejects the file.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on
    ///   transport failure.
    pub async fn upload_file(&self, path: &Path) -> Result<FileAnalysisResponse, ClientError> {
        let io_error = |source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
        require_upload(&file_name, metadata.len())?;

        let bytes = tokio::fs::read(path).await.map_err(io_error)?;
        let url = self.http.url("api/v1/data/upload");
        tracing::info!(file = %file_name, bytes = bytes.len(), "uploading data file");

        let value = self
            .http
            .execute_once("uploadFile", |client| {
                let part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                client.post(&url).multipart(Form::new().part("file", part))
            })
            .await?;
        decode(value, &format!("uploadFile({file_name})"))
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an unexpected body.
    pub async fn get_insights(&self, session_id: &str) -> Result<Vec<DataInsight>, ClientError> {
        let url = self.http.url(&format!("api/v1/data/insights/{session_id}"));
        let value = self
            .http
            .execute("getInsights", |client| client.get(&url))
            .await?;
        decode(value, &format!("getInsights({session_id})"))
    }

    /// Fetches a stored upload session; `Ok(None)` when the backend no longer
    /// knows the id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] for any failure other than a 404.
    pub async fn get_session(
        &self,
        session_id: &str,
    ) -> Result<Option<FileAnalysisResponse>, ClientError> {
        let url = self.http.url(&format!("api/v1/data/session/{session_id}"));
        match self.http.execute("getSession", |client| client.get(&url)).await {
            Ok(value) => decode(value, &format!("getSession({session_id})")).map(Some),
            Err(ClientError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn health(&self) -> bool {
        self.http.is_healthy("api/v1/data/health").await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an unexpected body.
    pub async fn list_schedules(
        &self,
        active_only: bool,
    ) -> Result<Vec<ComparisonSchedule>, ClientError> {
        let url = self.http.url("api/schedules");
        let flag = if active_only { "true" } else { "false" };
        let value = self
            .http
            .execute("listSchedules", |client| {
                client.get(&url).query(&[("activeOnly", flag)])
            })
            .await?;
        decode(value, "listSchedules")
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] for any failure other than a 404.
    pub async fn get_schedule(&self, id: i64) -> Result<Option<ComparisonSchedule>, ClientError> {
        let url = self.http.url(&format!("api/schedules/{id}"));
        match self.http.execute("getSchedule", |client| client.get(&url)).await {
            Ok(value) => decode(value, &format!("getSchedule({id})")).map(Some),
            Err(ClientError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before sending if the request is
    /// incomplete, otherwise any transport or API error.
    pub async fn create_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ComparisonSchedule, ClientError> {
        request.validate()?;
        let url = self.http.url("api/schedules");
        let value = self
            .http
            .execute_once("createSchedule", |client| client.post(&url).json(request))
            .await?;
        let schedule: ComparisonSchedule = decode_field(value, "schedule", "createSchedule")?;
        tracing::info!(id = schedule.id, name = %schedule.name, "schedule created");
        Ok(schedule)
    }

    /// # Errors
    ///
    /// Same as [`BackendClient::create_schedule`].
    pub async fn update_schedule(
        &self,
        id: i64,
        request: &ScheduleRequest,
    ) -> Result<ComparisonSchedule, ClientError> {
        request.validate()?;
        let url = self.http.url(&format!("api/schedules/{id}"));
        let value = self
            .http
            .execute("updateSchedule", |client| client.put(&url).json(request))
            .await?;
        decode_field(value, "schedule", &format!("updateSchedule({id})"))
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    pub async fn delete_schedule(&self, id: i64) -> Result<ApiAck, ClientError> {
        let url = self.http.url(&format!("api/schedules/{id}"));
        let value = self
            .http
            .execute("deleteSchedule", |client| client.delete(&url))
            .await?;
        decode(value, &format!("deleteSchedule({id})"))
    }

    /// Flips a schedule between active and paused.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    pub async fn toggle_schedule(&self, id: i64) -> Result<ComparisonSchedule, ClientError> {
        let url = self.http.url(&format!("api/schedules/{id}/toggle"));
        let value = self
            .http
            .execute_once("toggleSchedule", |client| client.post(&url))
            .await?;
        decode_field(value, "schedule", &format!("toggleSchedule({id})"))
    }

    /// Runs a schedule immediately, outside its cadence.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    pub async fn execute_schedule(&self, id: i64) -> Result<ApiAck, ClientError> {
        let url = self.http.url(&format!("api/schedules/{id}/execute"));
        let value = self
            .http
            .execute_once("executeSchedule", |client| client.post(&url))
            .await?;
        decode(value, &format!("executeSchedule({id})"))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before sending if the address or
    /// body is invalid, otherwise any transport or API error.
    pub async fn send_report_email(
        &self,
        request: &EmailReportRequest,
    ) -> Result<ApiAck, ClientError> {
        request.validate()?;
        let url = self.http.url("api/reports/email");
        tracing::info!(email = %request.email, report_type = %request.report_type, "sending report e-mail");
        let value = self
            .http
            .execute_once("sendReportEmail", |client| client.post(&url).json(request))
            .await?;
        decode(value, "sendReportEmail")
    }
}
