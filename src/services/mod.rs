//! Business logic services

pub mod assets;
pub mod auth;
pub mod reports;
pub mod schedules;
pub mod session;
pub mod settings;
pub mod stats;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AppConfig, ReportSource},
    reports::{LiveReportSource, ReportDataSource, SampleReportSource},
    repository::Repository,
};

use session::{SessionService, SessionStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub sessions: SessionService,
    pub assets: assets::AssetsService,
    pub tasks: tasks::TasksService,
    pub schedules: schedules::SchedulesService,
    pub users: users::UsersService,
    pub reports: reports::ReportsService,
    pub stats: stats::StatsService,
    pub settings: settings::SettingsService,
}

impl Services {
    /// Create all services over the given repository and session store
    pub fn new(
        repository: Repository,
        config: &AppConfig,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        let sessions = SessionService::new(session_store, repository.clone());
        let report_source: Arc<dyn ReportDataSource> = match config.reports.source {
            ReportSource::Sample => Arc::new(SampleReportSource),
            ReportSource::Live => Arc::new(LiveReportSource::new(repository.clone())),
        };

        Self {
            auth: auth::AuthService::new(repository.clone(), sessions.clone(), config.auth.clone()),
            sessions,
            assets: assets::AssetsService::new(repository.clone()),
            tasks: tasks::TasksService::new(repository.clone()),
            schedules: schedules::SchedulesService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone(), report_source),
            stats: stats::StatsService::new(repository.clone()),
            settings: settings::SettingsService::new(repository),
        }
    }
}
