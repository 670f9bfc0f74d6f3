//! Data models for the Hotel AMS server

pub mod asset;
pub mod report;
pub mod schedule;
pub mod settings;
pub mod task;
pub mod user;

// Re-export commonly used types
pub use asset::{Asset, AssetDetails, AssetStatus};
pub use report::{ReportEntry, ReportRecords, ReportType};
pub use schedule::{MaintenanceSchedule, ScheduleDetails, ScheduleStatus};
pub use settings::HotelSettings;
pub use task::{MaintenanceTask, TaskDetails, TaskStatus};
pub use user::{Role, User};
