//! Records exchanged with the analytics backend (uploads, reports).
//!
//! The backend serializes with camelCase field names.

use serde::{Deserialize, Serialize};

use crate::validate::{require_email, require_non_blank};
use crate::CoreError;

/// Response of the upload and session endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysisResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub session_id: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub row_count: u64,
    #[serde(default)]
    pub column_count: u64,
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub basic_statistics: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub insights: Vec<DataInsight>,
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
}

fn default_analysis_type() -> String {
    "auto".to_string()
}

/// Rule-based insight computed by the backend at upload time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataInsight {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub confidence: f64,
}

/// Request body for e-mailing a rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReportRequest {
    pub email: String,
    pub report_data: String,
    pub report_type: String,
}

impl EmailReportRequest {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the address is invalid or the
    /// report body or type is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_email("email", &self.email)?;
        require_non_blank("reportData", &self.report_data)?;
        require_non_blank("reportType", &self.report_type)
    }
}

/// `{ "success": bool, "message": "..." }` acknowledgement used by several
/// write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
