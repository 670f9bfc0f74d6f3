//! Maintenance tasks repository

use chrono::Utc;

use super::{shared_table, SharedTable};
use crate::{
    error::{AppError, AppResult},
    models::task::{CreateTask, MaintenanceTask, TaskPriority, TaskStatus},
};

#[derive(Clone)]
pub struct TasksRepository {
    table: SharedTable<MaintenanceTask>,
}

impl TasksRepository {
    pub fn new() -> Self {
        Self {
            table: shared_table(),
        }
    }

    /// List tasks, newest first
    pub async fn list(&self) -> AppResult<Vec<MaintenanceTask>> {
        Ok(self.table.read().await.to_vec())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTask> {
        self.table
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))
    }

    /// Append a fully built task (seeding keeps the sample order)
    pub async fn insert(&self, mut task: MaintenanceTask) -> AppResult<MaintenanceTask> {
        let mut table = self.table.write().await;
        task.id = table.allocate_id();
        table.push(task.id, task.clone());
        Ok(task)
    }

    /// Create a task in the `Created` state, listed ahead of older tasks
    pub async fn create(&self, data: &CreateTask) -> AppResult<MaintenanceTask> {
        let mut table = self.table.write().await;
        let task = MaintenanceTask {
            id: table.allocate_id(),
            name: data.name.clone(),
            asset_id: data.asset_id,
            assignee_id: data.assignee_id,
            status: TaskStatus::Created,
            priority: data.priority.unwrap_or(TaskPriority::Medium),
            due_date: data.due_date,
            description: Some(data.description.clone()),
            created_at: Utc::now(),
        };
        table.push_front(task.id, task.clone());
        Ok(task)
    }

    /// Overwrite a task's status in place
    pub async fn set_status(&self, id: i32, status: TaskStatus) -> AppResult<MaintenanceTask> {
        let mut table = self.table.write().await;
        let task = table
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;
        task.status = status;
        Ok(task.clone())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.table
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))
    }
}

impl Default for TasksRepository {
    fn default() -> Self {
        Self::new()
    }
}
