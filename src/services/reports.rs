//! Report service: generation, history and export

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::report::{ExportFormat, GenerateReport, ReportEntry, ReportSummary},
    reports::{self, ExportedReport, ReportDataSource},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    source: Arc<dyn ReportDataSource>,
}

impl ReportsService {
    pub fn new(repository: Repository, source: Arc<dyn ReportDataSource>) -> Self {
        Self { repository, source }
    }

    /// Generate a report and prepend it to the history
    pub async fn generate(&self, request: &GenerateReport) -> AppResult<ReportEntry> {
        let asset_history = self.source.asset_history().await?;
        let maintenance_logs = self.source.maintenance_logs().await?;
        let entry = reports::generate(request, asset_history, maintenance_logs, Utc::now())?;

        let entry = self.repository.reports.prepend(entry).await?;
        tracing::info!(
            report_id = entry.id,
            report_type = %entry.report_type,
            records = entry.record_count,
            "Report generated"
        );
        Ok(entry)
    }

    /// History, most recent first
    pub async fn list(&self) -> AppResult<Vec<ReportSummary>> {
        let entries = self.repository.reports.list().await?;
        Ok(entries.iter().map(ReportSummary::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ReportEntry> {
        self.repository.reports.get_by_id(id).await
    }

    /// Render a stored report, headed with the configured hotel name
    pub async fn export(&self, id: i32, format: ExportFormat) -> AppResult<ExportedReport> {
        let entry = self.repository.reports.get_by_id(id).await?;
        let settings = self.repository.settings.get().await?;
        let exported = reports::export(&entry, format, &settings.hotel_name, Utc::now().date_naive())?;
        tracing::info!(report_id = id, file = %exported.file_name, "Report exported");
        Ok(exported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::report::ReportType;
    use crate::reports::SampleReportSource;
    use chrono::NaiveDate;

    fn service() -> ReportsService {
        ReportsService::new(Repository::new(), Arc::new(SampleReportSource))
    }

    fn request(start: Option<NaiveDate>) -> GenerateReport {
        GenerateReport {
            report_type: ReportType::MaintenanceLogs,
            start_date: start,
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            category: Some("All Categories".to_string()),
        }
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let service = service();
        let first = service.generate(&request(NaiveDate::from_ymd_opt(2024, 12, 1))).await.unwrap();
        let second = service.generate(&request(NaiveDate::from_ymd_opt(2024, 12, 26))).await.unwrap();

        let history = service.list().await.unwrap();
        let ids: Vec<_> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(history[0].record_count, 2);
        assert_eq!(history[1].record_count, 3);
    }

    #[tokio::test]
    async fn test_failed_generation_leaves_history_unchanged() {
        let service = service();
        let err = service.generate(&request(None)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_names_file_after_report() {
        let service = service();
        let entry = service.generate(&request(NaiveDate::from_ymd_opt(2024, 12, 1))).await.unwrap();
        let csv = service.export(entry.id, ExportFormat::Csv).await.unwrap();
        assert_eq!(csv.file_name, format!("maintenance-logs-report-{}.csv", entry.id));
        assert_eq!(String::from_utf8(csv.bytes).unwrap().lines().count(), 4);

        let pdf = service.export(entry.id, ExportFormat::Pdf).await.unwrap();
        assert_eq!(pdf.content_type, "application/pdf");
        assert!(String::from_utf8_lossy(&pdf.bytes).contains("Ramayana Hotel Makassar"));
    }
}
