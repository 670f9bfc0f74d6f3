//! Maintenance schedules repository

use chrono::Utc;

use super::{shared_table, SharedTable};
use crate::{
    error::{AppError, AppResult},
    models::schedule::{
        CreateSchedule, MaintenanceSchedule, SchedulePriority, ScheduleStatus,
    },
};

#[derive(Clone)]
pub struct SchedulesRepository {
    table: SharedTable<MaintenanceSchedule>,
}

impl SchedulesRepository {
    pub fn new() -> Self {
        Self {
            table: shared_table(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceSchedule>> {
        Ok(self.table.read().await.to_vec())
    }

    /// Schedules assigned to one staff member
    pub async fn list_for_assignee(&self, user_id: i32) -> AppResult<Vec<MaintenanceSchedule>> {
        Ok(self
            .table
            .read()
            .await
            .iter()
            .filter(|s| s.assignee_id == user_id)
            .cloned()
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceSchedule> {
        self.table
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    pub async fn insert(&self, mut schedule: MaintenanceSchedule) -> AppResult<MaintenanceSchedule> {
        let mut table = self.table.write().await;
        schedule.id = table.allocate_id();
        table.push(schedule.id, schedule.clone());
        Ok(schedule)
    }

    /// Create a pending schedule
    pub async fn create(&self, data: &CreateSchedule) -> AppResult<MaintenanceSchedule> {
        self.insert(MaintenanceSchedule {
            id: 0,
            title: data.title.clone(),
            asset_id: data.asset_id,
            start: data.start,
            end: data.end,
            assignee_id: data.assignee_id,
            notes: data.notes.clone(),
            status: ScheduleStatus::Pending,
            priority: data.priority.unwrap_or(SchedulePriority::Medium),
            completed_at: None,
            completion_notes: None,
        })
        .await
    }

    /// Overwrite the status; reaching `completed` stamps the completion time
    pub async fn set_status(
        &self,
        id: i32,
        status: ScheduleStatus,
        completion_notes: Option<String>,
    ) -> AppResult<MaintenanceSchedule> {
        let mut table = self.table.write().await;
        let schedule = table
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))?;

        schedule.status = status;
        if status == ScheduleStatus::Completed {
            schedule.completed_at.get_or_insert_with(Utc::now);
            if completion_notes.is_some() {
                schedule.completion_notes = completion_notes;
            }
        } else {
            schedule.completed_at = None;
        }
        Ok(schedule.clone())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.table
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }
}

impl Default for SchedulesRepository {
    fn default() -> Self {
        Self::new()
    }
}
