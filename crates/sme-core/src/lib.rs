//! Shared configuration, wire types, and validation for the SME analytics
//! toolkit.
//!
//! Everything here is plain data: the records exchanged with the backend and
//! ML services, the application config loaded from the environment, and the
//! small amount of domain logic that belongs with those records (schedule
//! timing, request validation).

pub mod analysis;
pub mod app_config;
pub mod backend;
pub mod chat;
pub mod config;
pub mod schedules;
pub mod validate;

use thiserror::Error;

pub use analysis::{
    AnalysisResult, InsightKind, InsightRecord, PredictionRequest, PredictionResponse,
    SummaryStats, TrendDirection, TrendRecord,
};
pub use app_config::{AppConfig, Environment};
pub use backend::{ApiAck, DataInsight, EmailReportRequest, FileAnalysisResponse};
pub use chat::{ChatMessage, Conversation, CreateConversationRequest, MessageMetadata, SenderType};
pub use config::{load_app_config, load_app_config_from_env};
pub use schedules::{ComparisonSchedule, ScheduleFrequency, ScheduleRequest};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}
