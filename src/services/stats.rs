//! Dashboard statistics service

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::{
    api::stats::{CategoryCount, DashboardStats, MonthlyMaintenance},
    error::AppResult,
    models::{asset::AssetStatus, schedule::ScheduleStatus},
    repository::Repository,
    services::tasks::task_stats,
};

/// Window for "upcoming" schedules
const UPCOMING_DAYS: i64 = 7;

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_stats(&self) -> AppResult<DashboardStats> {
        self.stats_at(Utc::now()).await
    }

    /// Statistics as seen at `now`
    pub async fn stats_at(&self, now: DateTime<Utc>) -> AppResult<DashboardStats> {
        let assets = self.repository.assets.list().await?;
        let schedules = self.repository.schedules.list().await?;
        let tasks = self.repository.tasks.list().await?;

        let mut by_category: Vec<CategoryCount> = Vec::new();
        for asset in &assets {
            match by_category.iter_mut().find(|c| c.name == asset.category) {
                Some(entry) => entry.value += 1,
                None => by_category.push(CategoryCount {
                    name: asset.category.clone(),
                    value: 1,
                }),
            }
        }
        by_category.sort_by(|a, b| b.value.cmp(&a.value));

        let horizon = now + Duration::days(UPCOMING_DAYS);
        let upcoming_schedules = schedules
            .iter()
            .filter(|s| s.status != ScheduleStatus::Completed && s.start >= now && s.start <= horizon)
            .count() as i64;

        let mut by_month: BTreeMap<String, MonthlyMaintenance> = BTreeMap::new();
        for schedule in &schedules {
            let month = schedule.start.format("%Y-%m").to_string();
            let entry = by_month
                .entry(month.clone())
                .or_insert_with(|| MonthlyMaintenance {
                    month,
                    scheduled: 0,
                    completed: 0,
                });
            entry.scheduled += 1;
            if schedule.status == ScheduleStatus::Completed {
                entry.completed += 1;
            }
        }

        Ok(DashboardStats {
            total_assets: assets.len() as i64,
            assets_in_maintenance: assets
                .iter()
                .filter(|a| a.status == AssetStatus::Maintenance)
                .count() as i64,
            upcoming_schedules,
            reports_generated: self.repository.reports.count().await? as i64,
            assets_by_category: by_category,
            maintenance_over_time: by_month.into_values().collect(),
            tasks: task_stats(&tasks, now.date_naive()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed::seed_sample_data;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_dashboard_counts() {
        let repository = Repository::new();
        seed_sample_data(&repository, "hash").await.unwrap();
        let service = StatsService::new(repository);

        let now = Utc.with_ymd_and_hms(2024, 12, 24, 8, 0, 0).unwrap();
        let stats = service.stats_at(now).await.unwrap();

        assert_eq!(stats.total_assets, 9);
        assert_eq!(stats.assets_in_maintenance, 1);
        // AC servicing, refrigerator repair + check, desk maintenance
        assert_eq!(stats.upcoming_schedules, 4);
        assert_eq!(stats.reports_generated, 0);
        assert_eq!(stats.assets_by_category[0].name, "Building Systems");
        assert_eq!(stats.assets_by_category[0].value, 3);
        assert_eq!(stats.maintenance_over_time.len(), 1);
        assert_eq!(stats.maintenance_over_time[0].scheduled, 6);
        assert_eq!(stats.maintenance_over_time[0].completed, 2);
        assert_eq!(stats.tasks.total, 5);
    }
}
