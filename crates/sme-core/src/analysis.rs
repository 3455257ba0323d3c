//! Records returned by the ML analysis service.
//!
//! The service is written against a loosely typed JSON contract; these types
//! pin it down. Unknown trend directions and insight kinds are preserved
//! verbatim instead of failing deserialization.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Full response of the ML service's `/analyze` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Per-column trend records keyed by the raw column name.
    #[serde(default)]
    pub trends: BTreeMap<String, TrendRecord>,
    /// Forecast values for the next N periods, in order.
    #[serde(default)]
    pub predictions: Vec<f64>,
    #[serde(default)]
    pub insights: Vec<InsightRecord>,
    /// Chart payloads are rendered by a UI, never inspected here.
    #[serde(default)]
    pub charts_data: serde_json::Value,
    #[serde(default)]
    pub summary_stats: BTreeMap<String, SummaryStats>,
}

/// Direction label attached to a trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    /// Any other label the service emits (e.g. `"stable"`).
    Other(String),
}

impl From<String> for TrendDirection {
    fn from(value: String) -> Self {
        match value.as_str() {
            "increasing" => Self::Increasing,
            "decreasing" => Self::Decreasing,
            _ => Self::Other(value),
        }
    }
}

impl From<TrendDirection> for String {
    fn from(value: TrendDirection) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increasing => f.write_str("increasing"),
            Self::Decreasing => f.write_str("decreasing"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Trend summary for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub direction: TrendDirection,
    /// Signed percent change across the observed window.
    pub change_percent: f64,
    /// Coefficient of variation of the column, in percent.
    #[serde(default)]
    pub volatility: f64,
}

/// Category tag of an ML insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InsightKind {
    DataQuality,
    Correlation,
    Anomaly,
    Business,
    Other(String),
}

impl From<String> for InsightKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "data_quality" => Self::DataQuality,
            "correlation" => Self::Correlation,
            "anomaly" => Self::Anomaly,
            "business" => Self::Business,
            _ => Self::Other(value),
        }
    }
}

impl From<InsightKind> for String {
    fn from(value: InsightKind) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataQuality => f.write_str("data_quality"),
            Self::Correlation => f.write_str("correlation"),
            Self::Anomaly => f.write_str("anomaly"),
            Self::Business => f.write_str("business"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// A single insight produced by the ML service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    /// Confidence or quality score in `[0, 1]`.
    pub score: f64,
    #[serde(default)]
    pub category: String,
}

/// Descriptive statistics for one column, as produced by pandas `describe()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: f64,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

/// Body of the ML service's `/predict` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub data: Vec<f64>,
    pub model_type: String,
    pub horizon: u32,
}

impl PredictionRequest {
    pub const DEFAULT_MODEL: &'static str = "patchtst";
    pub const DEFAULT_HORIZON: u32 = 7;

    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data,
            model_type: Self::DEFAULT_MODEL.to_string(),
            horizon: Self::DEFAULT_HORIZON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<f64>,
    pub confidence: f64,
    pub model_used: String,
}
