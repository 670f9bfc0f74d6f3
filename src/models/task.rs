//! Maintenance task model and related types

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{filter::Searchable, workflow::Workflow};

/// Maintenance task status, advanced one step at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TaskStatus {
    Created,
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Verified,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Created => "Created",
            TaskStatus::Assigned => "Assigned",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Verified => "Verified",
        }
    }

    /// `Created -> Assigned -> In Progress -> Completed -> Verified`
    pub fn workflow() -> &'static Workflow<TaskStatus> {
        static WORKFLOW: OnceLock<Workflow<TaskStatus>> = OnceLock::new();
        WORKFLOW.get_or_init(|| {
            Workflow::linear(&[
                TaskStatus::Created,
                TaskStatus::Assigned,
                TaskStatus::InProgress,
                TaskStatus::Completed,
                TaskStatus::Verified,
            ])
        })
    }

    /// Completed and verified tasks are never overdue
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Verified)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

/// Stored maintenance task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceTask {
    pub id: i32,
    pub name: String,
    pub asset_id: i32,
    /// Technician (user) responsible for the task
    pub assignee_id: i32,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Task with asset and technician resolved at read time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskDetails {
    #[serde(flatten)]
    pub task: MaintenanceTask,
    /// "TAG (Location)" as shown in task lists
    pub asset: Option<String>,
    pub asset_name: Option<String>,
    pub assignee_name: Option<String>,
    /// Status the task would move to next, absent once verified
    pub next_status: Option<TaskStatus>,
}

impl Searchable for TaskDetails {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.task.name.as_str()];
        fields.extend(self.asset.as_deref());
        fields.extend(self.asset_name.as_deref());
        fields.extend(self.assignee_name.as_deref());
        fields
    }
}

/// Task list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct TaskQuery {
    /// Matches task name, asset or technician
    pub search: Option<String>,
    /// Status (any case), or "all"
    pub status: Option<String>,
}

/// Create task request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, message = "Task name is required"))]
    pub name: String,
    pub asset_id: i32,
    pub assignee_id: i32,
    pub priority: Option<TaskPriority>,
    pub due_date: NaiveDate,
    #[validate(length(min = 1, message = "Task description is required"))]
    pub description: String,
}

/// Task counters for the maintenance-tasks page header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskStats {
    pub total: i64,
    pub in_progress: i64,
    pub completed: i64,
    /// Due before today and neither completed nor verified
    pub overdue: i64,
}
