//! Maintenance task service

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    filter::RecordFilter,
    models::task::{CreateTask, MaintenanceTask, TaskDetails, TaskQuery, TaskStats, TaskStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct TasksService {
    repository: Repository,
}

impl TasksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Filtered task list, newest first
    pub async fn list(&self, query: &TaskQuery) -> AppResult<Vec<TaskDetails>> {
        let tasks = self.details(self.repository.tasks.list().await?).await?;
        Ok(RecordFilter::new(query.search.as_deref())
            .ignore_case(query.status.as_deref(), |t: &TaskDetails| t.task.status.as_str())
            .apply(tasks))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<TaskDetails> {
        let task = self.repository.tasks.get_by_id(id).await?;
        Ok(self.details(vec![task]).await?.remove(0))
    }

    pub async fn create(&self, data: &CreateTask) -> AppResult<TaskDetails> {
        self.repository
            .assets
            .get_by_id(data.asset_id)
            .await
            .map_err(|_| AppError::Validation(format!("Asset {} does not exist", data.asset_id)))?;
        self.repository
            .users
            .get_by_id(data.assignee_id)
            .await
            .map_err(|_| {
                AppError::Validation(format!("Technician {} does not exist", data.assignee_id))
            })?;

        let task = self.repository.tasks.create(data).await?;
        tracing::info!(task_id = task.id, "Maintenance task created");
        self.get_by_id(task.id).await
    }

    /// Move a task one step along its workflow
    pub async fn advance(&self, id: i32) -> AppResult<TaskDetails> {
        let task = self.repository.tasks.get_by_id(id).await?;
        let next = TaskStatus::workflow().advance(task.status)?;
        self.repository.tasks.set_status(id, next).await?;
        tracing::info!(task_id = id, from = %task.status, to = %next, "Task advanced");
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.tasks.delete(id).await?;
        tracing::info!(task_id = id, "Maintenance task deleted");
        Ok(())
    }

    pub async fn stats(&self) -> AppResult<TaskStats> {
        let tasks = self.repository.tasks.list().await?;
        Ok(task_stats(&tasks, Utc::now().date_naive()))
    }

    async fn details(&self, tasks: Vec<MaintenanceTask>) -> AppResult<Vec<TaskDetails>> {
        let assets: HashMap<_, _> = self
            .repository
            .assets
            .list()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        let users: HashMap<_, _> = self
            .repository
            .users
            .list()
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(tasks
            .into_iter()
            .map(|task| {
                let asset = assets.get(&task.asset_id);
                TaskDetails {
                    asset: asset.map(|a| format!("{} ({})", a.asset_tag, a.location)),
                    asset_name: asset.map(|a| a.name.clone()),
                    assignee_name: users.get(&task.assignee_id).cloned(),
                    next_status: TaskStatus::workflow().next(task.status),
                    task,
                }
            })
            .collect())
    }
}

/// Header counters; overdue means due before `today` and not done
pub fn task_stats(tasks: &[MaintenanceTask], today: NaiveDate) -> TaskStats {
    let count = |pred: &dyn Fn(&MaintenanceTask) -> bool| tasks.iter().filter(|t| pred(t)).count() as i64;
    TaskStats {
        total: tasks.len() as i64,
        in_progress: count(&|t| t.status == TaskStatus::InProgress),
        completed: count(&|t| t.status == TaskStatus::Completed),
        overdue: count(&|t| t.due_date < today && !t.status.is_done()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::TaskPriority;
    use crate::repository::seed::seed_sample_data;

    async fn service() -> TasksService {
        let repository = Repository::new();
        seed_sample_data(&repository, "hash").await.unwrap();
        TasksService::new(repository)
    }

    #[tokio::test]
    async fn test_advance_until_terminal() {
        let service = service().await;
        let created = service
            .create(&CreateTask {
                name: "Lobby Light Replacement".to_string(),
                asset_id: 1,
                assignee_id: 9,
                priority: Some(TaskPriority::Low),
                due_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                description: "Replace lobby bulbs".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.task.status, TaskStatus::Created);
        assert_eq!(created.asset.as_deref(), Some("RH-TV-001 (Room 101)"));

        let listed = service.list(&TaskQuery::default()).await.unwrap();
        assert_eq!(listed[0].task.id, created.task.id);

        let mut seen = vec![created.task.status];
        while service.get_by_id(created.task.id).await.unwrap().next_status.is_some() {
            seen.push(service.advance(created.task.id).await.unwrap().task.status);
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(*seen.last().unwrap(), TaskStatus::Verified);
        assert!(matches!(
            service.advance(created.task.id).await,
            Err(AppError::BusinessRule(_))
        ));
    }

    #[tokio::test]
    async fn test_filter_by_status_and_search() {
        let service = service().await;
        let query = TaskQuery {
            search: Some("ahmad".to_string()),
            status: Some("verified".to_string()),
        };
        let tasks = service.list(&query).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task.name, "Fire Alarm Check");

        let query = TaskQuery {
            search: Some("swimming pool".to_string()),
            status: None,
        };
        assert_eq!(service.list(&query).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stats_overdue() {
        let service = service().await;
        let tasks = service.repository.tasks.list().await.unwrap();
        let stats = task_stats(&tasks, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
        assert_eq!(
            stats,
            TaskStats {
                total: 5,
                in_progress: 1,
                completed: 1,
                overdue: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_asset_rejected() {
        let service = service().await;
        let err = service
            .create(&CreateTask {
                name: "Ghost".to_string(),
                asset_id: 999,
                assignee_id: 1,
                priority: None,
                due_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                description: "None".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
