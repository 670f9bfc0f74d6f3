//! Report generation and export
//!
//! [`generate`] filters asset-history or maintenance-log records into an
//! immutable [`ReportEntry`]; [`export`] renders an entry as CSV or PDF.
//! Record tables come from a [`ReportDataSource`], either the fixed sample
//! tables or a projection of the live store.

pub mod csv;
pub mod format;
pub mod pdf;
pub mod sample;
pub mod source;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::{
    error::{AppError, AppResult},
    filter::is_pass_through,
    models::report::{
        AssetHistoryRecord, DateRange, ExportFormat, GenerateReport, MaintenanceLogRecord,
        ReportEntry, ReportRecords, ReportType,
    },
};

pub use source::{LiveReportSource, ReportDataSource, SampleReportSource};

use format::{format_date, format_money};

/// Encoder failure while exporting a report
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendered export, ready to be sent as a download
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Build a report from the source tables.
///
/// Asset-history records are filtered by category only; the date range is
/// recorded on the entry but not applied. Maintenance logs are filtered by
/// the inclusive date range and by the category of their asset, looked up by
/// tag in `asset_history`. The returned entry has id 0 until stored.
pub fn generate(
    request: &GenerateReport,
    asset_history: Vec<AssetHistoryRecord>,
    maintenance_logs: Vec<MaintenanceLogRecord>,
    generated_at: DateTime<Utc>,
) -> AppResult<ReportEntry> {
    let (Some(start), Some(end)) = (request.start_date, request.end_date) else {
        return Err(AppError::Validation(
            "Please select both start and end dates".to_string(),
        ));
    };
    let date_range = DateRange { start, end };

    let category = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !is_pass_through(Some(c)));

    let data = match request.report_type {
        ReportType::AssetHistory => ReportRecords::AssetHistory(
            asset_history
                .into_iter()
                .filter(|r| category.map_or(true, |c| r.category == c))
                .collect(),
        ),
        ReportType::MaintenanceLogs => ReportRecords::MaintenanceLogs(
            maintenance_logs
                .into_iter()
                .filter(|log| date_range.contains(log.date))
                .filter(|log| {
                    category.map_or(true, |c| {
                        asset_history
                            .iter()
                            .find(|a| a.asset_tag == log.asset_tag)
                            .is_some_and(|a| a.category == c)
                    })
                })
                .collect(),
        ),
    };

    Ok(ReportEntry {
        id: 0,
        report_type: request.report_type,
        title: title(request.report_type, start, end),
        generated_at,
        date_range,
        category: category.map(str::to_string),
        record_count: data.len(),
        data,
    })
}

/// `Asset History Report - Dec 24, 2024 to Dec 26, 2024`
pub fn title(report_type: ReportType, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{} Report - {} to {}",
        report_type.label(),
        format_date(start),
        format_date(end)
    )
}

/// Display cells per record, in the column order of the report type. Line
/// breaks inside text fields become spaces, so every record is one line of
/// CSV and one row of PDF.
pub fn rows(records: &ReportRecords) -> Vec<Vec<String>> {
    match records {
        ReportRecords::AssetHistory(records) => records
            .iter()
            .map(|r| {
                vec![
                    single_line(&r.asset_tag),
                    single_line(&r.asset_name),
                    single_line(&r.category),
                    single_line(&r.location),
                    single_line(&r.status),
                    format_date(r.purchase_date),
                    format_money(r.value),
                ]
            })
            .collect(),
        ReportRecords::MaintenanceLogs(records) => records
            .iter()
            .map(|r| {
                vec![
                    format_date(r.date),
                    single_line(&r.asset_tag),
                    single_line(&r.asset_name),
                    single_line(&r.task_title),
                    single_line(&r.assigned_staff),
                    single_line(&r.status),
                    single_line(&r.priority),
                ]
            })
            .collect(),
    }
}

fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<type>-report-<id>.<ext>`
pub fn file_name(entry: &ReportEntry, format: ExportFormat) -> String {
    format!(
        "{}-report-{}.{}",
        entry.report_type,
        entry.id,
        format.extension()
    )
}

/// Render a stored report. `organization` heads PDF output.
pub fn export(
    entry: &ReportEntry,
    format: ExportFormat,
    organization: &str,
    generated_on: NaiveDate,
) -> Result<ExportedReport, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => csv::encode(entry)?,
        ExportFormat::Pdf => pdf::encode(entry, organization, generated_on)?,
    };
    Ok(ExportedReport {
        file_name: file_name(entry, format),
        content_type: format.content_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn request(
        report_type: ReportType,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        category: &str,
    ) -> GenerateReport {
        GenerateReport {
            report_type,
            start_date: start,
            end_date: end,
            category: Some(category.to_string()),
        }
    }

    fn run(request: &GenerateReport) -> AppResult<ReportEntry> {
        generate(
            request,
            sample::asset_history(),
            sample::maintenance_logs(),
            Utc::now(),
        )
    }

    #[test]
    fn test_missing_dates_rejected() {
        let req = request(ReportType::AssetHistory, None, Some(d(2024, 12, 26)), "All Categories");
        assert!(matches!(run(&req), Err(AppError::Validation(_))));
        let req = request(ReportType::MaintenanceLogs, Some(d(2024, 12, 24)), None, "All Categories");
        assert!(matches!(run(&req), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_logs_filtered_by_inclusive_range() {
        let req = request(
            ReportType::MaintenanceLogs,
            Some(d(2024, 12, 24)),
            Some(d(2024, 12, 26)),
            "All Categories",
        );
        let entry = run(&req).unwrap();
        assert_eq!(entry.record_count, 2);
        assert_eq!(entry.category, None);
        let ReportRecords::MaintenanceLogs(logs) = &entry.data else {
            panic!("expected maintenance logs");
        };
        let dates: Vec<_> = logs.iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![d(2024, 12, 26), d(2024, 12, 25)]);
    }

    #[test]
    fn test_logs_filtered_by_asset_category() {
        let req = request(
            ReportType::MaintenanceLogs,
            Some(d(2024, 12, 1)),
            Some(d(2024, 12, 31)),
            "Kitchen Equipment",
        );
        let entry = run(&req).unwrap();
        assert_eq!(entry.record_count, 1);
        assert_eq!(entry.category.as_deref(), Some("Kitchen Equipment"));
    }

    #[test]
    fn test_asset_history_ignores_dates() {
        let req = request(
            ReportType::AssetHistory,
            Some(d(1990, 1, 1)),
            Some(d(1990, 1, 2)),
            "Furniture",
        );
        let entry = run(&req).unwrap();
        let expected = sample::asset_history()
            .iter()
            .filter(|r| r.category == "Furniture")
            .count();
        assert_eq!(entry.record_count, expected);

        let req = request(ReportType::AssetHistory, Some(d(1990, 1, 1)), Some(d(1990, 1, 2)), "All Categories");
        assert_eq!(run(&req).unwrap().record_count, 4);
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let req = request(
            ReportType::AssetHistory,
            Some(d(2024, 1, 1)),
            Some(d(2024, 12, 31)),
            "furniture",
        );
        assert_eq!(run(&req).unwrap().record_count, 0);
    }

    #[test]
    fn test_rows_collapse_line_breaks() {
        let mut history = sample::asset_history();
        history[0].asset_name = "Samsung 55\" Smart TV\r\nLobby unit\nspare".to_string();
        let records = ReportRecords::AssetHistory(history);
        let rows = rows(&records);
        assert_eq!(rows[0][1], "Samsung 55\" Smart TV Lobby unit spare");
        assert_eq!(single_line("Room 101"), "Room 101");
    }

    #[test]
    fn test_title_and_file_name() {
        let req = request(
            ReportType::AssetHistory,
            Some(d(2024, 12, 24)),
            Some(d(2024, 12, 26)),
            "All Categories",
        );
        let mut entry = run(&req).unwrap();
        assert_eq!(entry.title, "Asset History Report - Dec 24, 2024 to Dec 26, 2024");
        entry.id = 7;
        assert_eq!(file_name(&entry, ExportFormat::Csv), "asset-history-report-7.csv");
        assert_eq!(file_name(&entry, ExportFormat::Pdf), "asset-history-report-7.pdf");
    }
}
