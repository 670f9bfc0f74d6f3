//! Record sources for report generation

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::sample;
use crate::{
    error::AppResult,
    models::report::{AssetHistoryRecord, MaintenanceLogRecord},
    repository::Repository,
};

/// Supplies the tables a report is filtered from
#[async_trait]
pub trait ReportDataSource: Send + Sync {
    async fn asset_history(&self) -> AppResult<Vec<AssetHistoryRecord>>;
    async fn maintenance_logs(&self) -> AppResult<Vec<MaintenanceLogRecord>>;
}

/// The fixed sample tables
#[derive(Debug, Clone, Default)]
pub struct SampleReportSource;

#[async_trait]
impl ReportDataSource for SampleReportSource {
    async fn asset_history(&self) -> AppResult<Vec<AssetHistoryRecord>> {
        Ok(sample::asset_history())
    }

    async fn maintenance_logs(&self) -> AppResult<Vec<MaintenanceLogRecord>> {
        Ok(sample::maintenance_logs())
    }
}

/// Projection of the live asset and schedule tables
#[derive(Clone)]
pub struct LiveReportSource {
    repository: Repository,
}

impl LiveReportSource {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ReportDataSource for LiveReportSource {
    async fn asset_history(&self) -> AppResult<Vec<AssetHistoryRecord>> {
        let schedules = self.repository.schedules.list().await?;
        let mut last_maintenance: HashMap<i32, NaiveDate> = HashMap::new();
        for schedule in &schedules {
            if let Some(done) = schedule.completed_at {
                let date = done.date_naive();
                last_maintenance
                    .entry(schedule.asset_id)
                    .and_modify(|d| *d = (*d).max(date))
                    .or_insert(date);
            }
        }

        let assets = self.repository.assets.list().await?;
        Ok(assets
            .into_iter()
            .map(|a| AssetHistoryRecord {
                last_maintenance: last_maintenance.get(&a.id).copied(),
                asset_tag: a.asset_tag,
                asset_name: a.name,
                category: a.category,
                location: a.location,
                status: a.status.label().to_string(),
                purchase_date: a.purchase_date,
                value: a.value,
            })
            .collect())
    }

    async fn maintenance_logs(&self) -> AppResult<Vec<MaintenanceLogRecord>> {
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

        let schedules = self.repository.schedules.list().await?;
        Ok(schedules
            .into_iter()
            .map(|s| {
                let asset = assets.get(&s.asset_id);
                MaintenanceLogRecord {
                    date: s.start.date_naive(),
                    asset_tag: asset.map(|a| a.asset_tag.clone()).unwrap_or_default(),
                    asset_name: asset.map(|a| a.name.clone()).unwrap_or_default(),
                    task_title: s.title,
                    assigned_staff: users.get(&s.assignee_id).cloned().unwrap_or_default(),
                    status: s.status.label().to_string(),
                    priority: s.priority.label().to_string(),
                    completion_notes: s.completion_notes,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed::seed_sample_data;

    #[tokio::test]
    async fn test_live_source_projects_store() {
        let repository = Repository::new();
        seed_sample_data(&repository, "hash").await.unwrap();
        let source = LiveReportSource::new(repository);

        let history = source.asset_history().await.unwrap();
        let tv = history.iter().find(|r| r.asset_tag == "RH-TV-001").unwrap();
        assert_eq!(tv.status, "Active");
        assert_eq!(tv.last_maintenance, NaiveDate::from_ymd_opt(2024, 12, 26));

        let logs = source.maintenance_logs().await.unwrap();
        let servicing = logs.iter().find(|l| l.task_title == "AC Unit Servicing").unwrap();
        assert_eq!(servicing.asset_tag, "RH-AC-002");
        assert_eq!(servicing.assigned_staff, "John Smith");
        assert_eq!(servicing.status, "Pending");
        assert_eq!(servicing.priority, "Medium");
    }
}
