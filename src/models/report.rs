//! Report models: generation requests, records and the report envelope

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Kind of report, which fixes its record shape and column set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    AssetHistory,
    MaintenanceLogs,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::AssetHistory => "asset-history",
            ReportType::MaintenanceLogs => "maintenance-logs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::AssetHistory => "Asset History",
            ReportType::MaintenanceLogs => "Maintenance Logs",
        }
    }

    /// Export column headers, in order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportType::AssetHistory => &[
                "Asset Tag",
                "Name",
                "Category",
                "Location",
                "Status",
                "Purchase Date",
                "Value",
            ],
            ReportType::MaintenanceLogs => &[
                "Date",
                "Asset Tag",
                "Asset Name",
                "Task",
                "Staff",
                "Status",
                "Priority",
            ],
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One asset row of an asset-history report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssetHistoryRecord {
    pub asset_tag: String,
    pub asset_name: String,
    pub category: String,
    pub location: String,
    pub status: String,
    pub purchase_date: NaiveDate,
    pub last_maintenance: Option<NaiveDate>,
    #[schema(value_type = f64)]
    pub value: Decimal,
}

/// One maintenance event of a maintenance-logs report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceLogRecord {
    pub date: NaiveDate,
    pub asset_tag: String,
    pub asset_name: String,
    pub task_title: String,
    pub assigned_staff: String,
    pub status: String,
    pub priority: String,
    pub completion_notes: Option<String>,
}

/// Report rows, homogeneous per report type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ReportRecords {
    AssetHistory(Vec<AssetHistoryRecord>),
    MaintenanceLogs(Vec<MaintenanceLogRecord>),
}

impl ReportRecords {
    pub fn len(&self) -> usize {
        match self {
            ReportRecords::AssetHistory(rows) => rows.len(),
            ReportRecords::MaintenanceLogs(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Generated report: metadata envelope plus the filtered rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportEntry {
    pub id: i32,
    pub report_type: ReportType,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub date_range: DateRange,
    /// Absent when every category was included
    pub category: Option<String>,
    pub record_count: usize,
    pub data: ReportRecords,
}

/// Report history row (envelope without data)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSummary {
    pub id: i32,
    pub report_type: ReportType,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub date_range: DateRange,
    pub category: Option<String>,
    pub record_count: usize,
}

impl From<&ReportEntry> for ReportSummary {
    fn from(entry: &ReportEntry) -> Self {
        Self {
            id: entry.id,
            report_type: entry.report_type,
            title: entry.title.clone(),
            generated_at: entry.generated_at,
            date_range: entry.date_range,
            category: entry.category.clone(),
            record_count: entry.record_count,
        }
    }
}

/// Generate report request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateReport {
    pub report_type: ReportType,
    /// Start date (YYYY-MM-DD), required
    pub start_date: Option<NaiveDate>,
    /// End date (YYYY-MM-DD), required
    pub end_date: Option<NaiveDate>,
    /// Category, or "All Categories"
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// Export query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ExportQuery {
    pub format: ExportFormat,
}
