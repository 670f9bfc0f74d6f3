//! Fixed sample tables backing reports when no live data is wired in

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::report::{AssetHistoryRecord, MaintenanceLogRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn asset_history() -> Vec<AssetHistoryRecord> {
    vec![
        AssetHistoryRecord {
            asset_tag: "RH-TV-001".to_string(),
            asset_name: "Samsung 55\" Smart TV".to_string(),
            category: "Electronics".to_string(),
            location: "Room 101".to_string(),
            status: "Active".to_string(),
            purchase_date: date(2023, 1, 15),
            last_maintenance: Some(date(2024, 12, 26)),
            value: Decimal::from(800),
        },
        AssetHistoryRecord {
            asset_tag: "RH-AC-002".to_string(),
            asset_name: "Daikin Split AC Unit".to_string(),
            category: "HVAC Systems".to_string(),
            location: "Room 102".to_string(),
            status: "Maintenance".to_string(),
            purchase_date: date(2022, 8, 20),
            last_maintenance: None,
            value: Decimal::from(1200),
        },
        AssetHistoryRecord {
            asset_tag: "RH-BED-003".to_string(),
            asset_name: "King Size Bed".to_string(),
            category: "Furniture".to_string(),
            location: "Room 103".to_string(),
            status: "Active".to_string(),
            purchase_date: date(2023, 3, 10),
            last_maintenance: None,
            value: Decimal::from(1500),
        },
        AssetHistoryRecord {
            asset_tag: "RH-REF-004".to_string(),
            asset_name: "Mini Refrigerator".to_string(),
            category: "Kitchen Equipment".to_string(),
            location: "Room 104".to_string(),
            status: "Retired".to_string(),
            purchase_date: date(2021, 5, 12),
            last_maintenance: None,
            value: Decimal::from(300),
        },
    ]
}

pub fn maintenance_logs() -> Vec<MaintenanceLogRecord> {
    vec![
        MaintenanceLogRecord {
            date: date(2024, 12, 26),
            asset_tag: "RH-TV-001".to_string(),
            asset_name: "Samsung 55\" Smart TV".to_string(),
            task_title: "TV Software Update".to_string(),
            assigned_staff: "John Smith".to_string(),
            status: "Completed".to_string(),
            priority: "Low".to_string(),
            completion_notes: Some(
                "Updated to latest firmware version. All streaming apps working properly."
                    .to_string(),
            ),
        },
        MaintenanceLogRecord {
            date: date(2024, 12, 25),
            asset_tag: "RH-AC-002".to_string(),
            asset_name: "Daikin Split AC Unit".to_string(),
            task_title: "AC Unit Servicing".to_string(),
            assigned_staff: "John Smith".to_string(),
            status: "Pending".to_string(),
            priority: "Medium".to_string(),
            completion_notes: None,
        },
        MaintenanceLogRecord {
            date: date(2024, 12, 27),
            asset_tag: "RH-REF-004".to_string(),
            asset_name: "Mini Refrigerator".to_string(),
            task_title: "Refrigerator Temperature Check".to_string(),
            assigned_staff: "Sarah Wilson".to_string(),
            status: "In Progress".to_string(),
            priority: "High".to_string(),
            completion_notes: None,
        },
    ]
}
