//! Maintenance schedule service, including the job-task view of schedules

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    filter::RecordFilter,
    models::schedule::{
        CreateSchedule, MaintenanceSchedule, ScheduleDetails, ScheduleQuery, ScheduleStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<ScheduleDetails>> {
        let schedules = self.details(self.repository.schedules.list().await?).await?;
        Ok(RecordFilter::new(query.search.as_deref())
            .ignore_case(query.status.as_deref(), |s: &ScheduleDetails| s.schedule.status.as_str())
            .apply(schedules))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ScheduleDetails> {
        let schedule = self.repository.schedules.get_by_id(id).await?;
        Ok(self.details(vec![schedule]).await?.remove(0))
    }

    pub async fn create(&self, data: &CreateSchedule) -> AppResult<ScheduleDetails> {
        if data.end <= data.start {
            return Err(AppError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
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
                AppError::Validation(format!("Staff member {} does not exist", data.assignee_id))
            })?;

        let schedule = self.repository.schedules.create(data).await?;
        tracing::info!(schedule_id = schedule.id, "Maintenance scheduled");
        self.get_by_id(schedule.id).await
    }

    /// Set any status directly (maintenance calendar)
    pub async fn set_status(&self, id: i32, status: ScheduleStatus) -> AppResult<ScheduleDetails> {
        self.repository.schedules.set_status(id, status, None).await?;
        tracing::info!(schedule_id = id, status = %status, "Schedule status updated");
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.schedules.delete(id).await?;
        tracing::info!(schedule_id = id, "Schedule deleted");
        Ok(())
    }

    // ---- Job tasks ----

    /// Schedules assigned to the given staff member
    pub async fn job_tasks(&self, user_id: i32) -> AppResult<Vec<ScheduleDetails>> {
        let schedules = self.repository.schedules.list_for_assignee(user_id).await?;
        self.details(schedules).await
    }

    /// `pending -> in-progress`
    pub async fn start_job(&self, id: i32, user_id: i32) -> AppResult<ScheduleDetails> {
        self.step_job(id, user_id, ScheduleStatus::Pending, None).await
    }

    /// `in-progress -> completed`, recording completion notes
    pub async fn complete_job(
        &self,
        id: i32,
        user_id: i32,
        notes: Option<String>,
    ) -> AppResult<ScheduleDetails> {
        let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        self.step_job(id, user_id, ScheduleStatus::InProgress, notes).await
    }

    async fn step_job(
        &self,
        id: i32,
        user_id: i32,
        expected: ScheduleStatus,
        notes: Option<String>,
    ) -> AppResult<ScheduleDetails> {
        let schedule = self.repository.schedules.get_by_id(id).await?;
        if schedule.assignee_id != user_id {
            return Err(AppError::Authorization(
                "This job task is not assigned to you".to_string(),
            ));
        }
        if schedule.status != expected {
            return Err(AppError::BusinessRule(format!(
                "Job task is {}, expected {}",
                schedule.status.label(),
                expected.label()
            )));
        }

        let next = ScheduleStatus::workflow().advance(schedule.status)?;
        self.repository.schedules.set_status(id, next, notes).await?;
        tracing::info!(schedule_id = id, user_id, status = %next, "Job task updated");
        self.get_by_id(id).await
    }

    async fn details(&self, schedules: Vec<MaintenanceSchedule>) -> AppResult<Vec<ScheduleDetails>> {
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

        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let asset = assets.get(&schedule.asset_id);
                ScheduleDetails {
                    asset_name: asset.map(|a| a.name.clone()),
                    asset_tag: asset.map(|a| a.asset_tag.clone()),
                    asset_location: asset.map(|a| a.location.clone()),
                    assignee_name: users.get(&schedule.assignee_id).cloned(),
                    schedule,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed::seed_sample_data;
    use chrono::{Duration, Utc};

    async fn service() -> SchedulesService {
        let repository = Repository::new();
        seed_sample_data(&repository, "hash").await.unwrap();
        SchedulesService::new(repository)
    }

    const JOHN: i32 = 5;

    #[tokio::test]
    async fn test_job_task_lifecycle() {
        let service = service().await;
        let jobs = service.job_tasks(JOHN).await.unwrap();
        assert_eq!(jobs.len(), 3);

        let pending = jobs
            .iter()
            .find(|j| j.schedule.status == ScheduleStatus::Pending)
            .unwrap()
            .schedule
            .id;

        let err = service.complete_job(pending, JOHN, None).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        let started = service.start_job(pending, JOHN).await.unwrap();
        assert_eq!(started.schedule.status, ScheduleStatus::InProgress);

        let done = service
            .complete_job(pending, JOHN, Some("Filter cleaned".to_string()))
            .await
            .unwrap();
        assert_eq!(done.schedule.status, ScheduleStatus::Completed);
        assert!(done.schedule.completed_at.is_some());
        assert_eq!(done.schedule.completion_notes.as_deref(), Some("Filter cleaned"));
    }

    #[tokio::test]
    async fn test_job_task_requires_assignee() {
        let service = service().await;
        let err = service.start_job(1, JOHN + 1).await.unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_search_schedules() {
        let service = service().await;
        let query = ScheduleQuery {
            search: Some("rh-ref".to_string()),
            status: Some("In-Progress".to_string()),
        };
        let found = service.list(&query).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| s.asset_tag.as_deref() == Some("RH-REF-004")));
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_window() {
        let service = service().await;
        let start = Utc::now();
        let data = CreateSchedule {
            title: "Carpet Cleaning".to_string(),
            asset_id: 3,
            start,
            end: start - Duration::hours(1),
            assignee_id: JOHN,
            notes: String::new(),
            priority: None,
        };
        assert!(matches!(service.create(&data).await, Err(AppError::Validation(_))));

        let data = CreateSchedule {
            end: start + Duration::hours(1),
            ..data
        };
        let created = service.create(&data).await.unwrap();
        assert_eq!(created.schedule.status, ScheduleStatus::Pending);
        assert_eq!(created.asset_name.as_deref(), Some("King Size Bed"));
    }
}
