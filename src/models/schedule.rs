//! Maintenance schedule models (calendar entries and job tasks)

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{filter::Searchable, workflow::Workflow};

// ---------------------------------------------------------------------------
// Status / priority
// ---------------------------------------------------------------------------

/// Schedule status, shared with the job-task view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    Pending,
    InProgress,
    Completed,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::InProgress => "in-progress",
            ScheduleStatus::Completed => "completed",
        }
    }

    /// Label used in maintenance-log reports
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "Pending",
            ScheduleStatus::InProgress => "In Progress",
            ScheduleStatus::Completed => "Completed",
        }
    }

    /// `pending -> in-progress -> completed`
    pub fn workflow() -> &'static Workflow<ScheduleStatus> {
        static WORKFLOW: OnceLock<Workflow<ScheduleStatus>> = OnceLock::new();
        WORKFLOW.get_or_init(|| {
            Workflow::linear(&[
                ScheduleStatus::Pending,
                ScheduleStatus::InProgress,
                ScheduleStatus::Completed,
            ])
        })
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SchedulePriority {
    Low,
    Medium,
    High,
}

impl SchedulePriority {
    pub fn label(&self) -> &'static str {
        match self {
            SchedulePriority::Low => "Low",
            SchedulePriority::Medium => "Medium",
            SchedulePriority::High => "High",
        }
    }
}

// ---------------------------------------------------------------------------
// MaintenanceSchedule
// ---------------------------------------------------------------------------

/// A scheduled maintenance window against one asset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceSchedule {
    pub id: i32,
    pub title: String,
    pub asset_id: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Staff member (user) doing the work
    pub assignee_id: i32,
    pub notes: String,
    pub status: ScheduleStatus,
    pub priority: SchedulePriority,
    pub completed_at: Option<DateTime<Utc>>,
    pub completion_notes: Option<String>,
}

/// Schedule with asset and staff resolved at read time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleDetails {
    #[serde(flatten)]
    pub schedule: MaintenanceSchedule,
    pub asset_name: Option<String>,
    pub asset_tag: Option<String>,
    pub asset_location: Option<String>,
    pub assignee_name: Option<String>,
}

impl Searchable for ScheduleDetails {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.schedule.title.as_str()];
        fields.extend(self.asset_name.as_deref());
        fields.extend(self.asset_tag.as_deref());
        fields.extend(self.assignee_name.as_deref());
        fields
    }
}

/// Schedule list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ScheduleQuery {
    /// Matches title, asset or staff member
    pub search: Option<String>,
    /// Status (any case), or "all"
    pub status: Option<String>,
}

/// Create schedule request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSchedule {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub asset_id: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub assignee_id: i32,
    #[serde(default)]
    pub notes: String,
    pub priority: Option<SchedulePriority>,
}

/// Explicit status change from the maintenance calendar
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateScheduleStatus {
    pub status: ScheduleStatus,
}

/// Completion report for a job task
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CompleteJobTask {
    pub notes: Option<String>,
}
