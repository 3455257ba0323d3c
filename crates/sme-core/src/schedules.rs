//! Scheduled comparison reports managed by the backend.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::validate::{require_email, require_non_blank};
use crate::CoreError;

/// Hour of day (local to the backend) at which scheduled reports run.
pub const RUN_HOUR: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ScheduleFrequency {
    /// Next run time after `now`, mirroring the backend's scheduling rule.
    ///
    /// Daily and weekly runs land one day or one week out at 09:00; monthly
    /// runs land on the first day of the following month at 09:00.
    #[must_use]
    pub fn next_run_after(self, now: NaiveDateTime) -> NaiveDateTime {
        let run_time = NaiveTime::from_hms_opt(RUN_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
        let date = now.date();
        let next_date = match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Monthly => date
                .checked_add_months(Months::new(1))
                .and_then(|d| d.with_day(1)),
        };
        next_date.unwrap_or(date).and_time(run_time)
    }
}

impl fmt::Display for ScheduleFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("DAILY"),
            Self::Weekly => f.write_str("WEEKLY"),
            Self::Monthly => f.write_str("MONTHLY"),
        }
    }
}

impl FromStr for ScheduleFrequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(CoreError::Validation {
                field: "frequency",
                reason: format!("expected daily, weekly or monthly, got '{other}'"),
            }),
        }
    }
}

/// A stored schedule as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSchedule {
    pub id: i64,
    pub name: String,
    pub recipient_email: String,
    pub frequency: ScheduleFrequency,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub last_run_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub next_run_at: Option<NaiveDateTime>,
    /// Free-form JSON describing which data sources the report compares.
    #[serde(default)]
    pub data_source_config: Option<String>,
    /// Which report sections to include.
    #[serde(default)]
    pub report_template: Option<String>,
}

/// Body for creating or replacing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub name: String,
    pub recipient_email: String,
    pub frequency: ScheduleFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source_config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_template: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ScheduleRequest {
    #[must_use]
    pub fn new(name: &str, recipient_email: &str, frequency: ScheduleFrequency) -> Self {
        Self {
            name: name.to_string(),
            recipient_email: recipient_email.to_string(),
            frequency,
            data_source_config: None,
            report_template: None,
            active: true,
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name is blank or the
    /// recipient address is invalid.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank("name", &self.name)?;
        require_email("recipientEmail", &self.recipient_email)
    }
}

impl From<&ComparisonSchedule> for ScheduleRequest {
    fn from(s: &ComparisonSchedule) -> Self {
        Self {
            name: s.name.clone(),
            recipient_email: s.recipient_email.clone(),
            frequency: s.frequency,
            data_source_config: s.data_source_config.clone(),
            report_template: s.report_template.clone(),
            active: s.active,
        }
    }
}

#[cfg(test)]
#[path = "schedules_test.rs"]
mod tests;
