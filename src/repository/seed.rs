//! Sample hotel data loaded into an empty store on startup

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        asset::{Asset, AssetStatus},
        schedule::{MaintenanceSchedule, SchedulePriority, ScheduleStatus},
        task::{MaintenanceTask, TaskPriority, TaskStatus},
        user::{Role, User},
    },
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

/// Populate every table. Every seeded account gets `password_hash`.
/// Ids follow insertion order, so the store must be empty.
pub async fn seed_sample_data(repository: &Repository, password_hash: &str) -> AppResult<()> {
    let users = [
        ("Abdul Basri", "bas@ramayanahotel.com", Role::Admin, at(2024, 1, 1, 0, 0), Some(at(2024, 12, 26, 0, 0))),
        ("Kiswanto", "kiswanto@ramayanahotel.com", Role::Staff, at(2024, 2, 15, 0, 0), Some(at(2024, 12, 25, 0, 0))),
        ("CrewHotel", "crew@ramayanahotel.com", Role::Staff, at(2024, 3, 10, 0, 0), Some(at(2024, 12, 24, 0, 0))),
        ("viewer", "viewer@ramayanahotel.com", Role::Viewer, at(2024, 4, 5, 0, 0), Some(at(2024, 12, 20, 0, 0))),
        ("John Smith", "john@ramayanahotel.com", Role::Staff, at(2024, 5, 2, 0, 0), None),
        ("Mike Johnson", "mike@ramayanahotel.com", Role::Staff, at(2024, 5, 2, 0, 0), None),
        ("Sarah Wilson", "sarah@ramayanahotel.com", Role::Staff, at(2024, 5, 2, 0, 0), None),
        ("Tom Brown", "tom@ramayanahotel.com", Role::Staff, at(2024, 5, 2, 0, 0), None),
        ("Ahmad Rizki", "ahmad@ramayanahotel.com", Role::Staff, at(2024, 1, 10, 0, 0), None),
        ("Siti Nurhaliza", "siti@ramayanahotel.com", Role::Staff, at(2024, 1, 10, 0, 0), None),
        ("Budi Santoso", "budi@ramayanahotel.com", Role::Staff, at(2024, 1, 10, 0, 0), None),
        ("Maya Sari", "maya@ramayanahotel.com", Role::Staff, at(2024, 1, 10, 0, 0), None),
    ];
    let mut user_ids = Vec::with_capacity(users.len());
    for (name, email, role, created_at, last_login) in users {
        let user = repository
            .users
            .insert(User {
                id: 0,
                name: name.to_string(),
                email: email.to_string(),
                role,
                created_at,
                last_login,
                password: Some(password_hash.to_string()),
            })
            .await?;
        user_ids.push(user.id);
    }
    let user = |name: &str| {
        users
            .iter()
            .position(|u| u.0 == name)
            .map(|i| user_ids[i])
            .unwrap_or_default()
    };

    let assets = [
        ("RH-TV-001", "Samsung 55\" Smart TV", "Electronics", "Room 101", AssetStatus::Active, date(2023, 1, 15), 800, "55-inch Smart TV for guest room entertainment"),
        ("RH-AC-002", "Daikin Split AC Unit", "HVAC Systems", "Room 102", AssetStatus::Maintenance, date(2022, 8, 20), 1200, "2.5 ton split AC unit for room cooling"),
        ("RH-BED-003", "King Size Bed", "Furniture", "Room 103", AssetStatus::Active, date(2023, 3, 10), 1500, "Premium king size bed with memory foam mattress"),
        ("RH-REF-004", "Mini Refrigerator", "Kitchen Equipment", "Room 104", AssetStatus::Retired, date(2021, 5, 12), 300, "Compact mini fridge for guest convenience"),
        ("RH-DESK-005", "Executive Desk", "Furniture", "Business Center", AssetStatus::Active, date(2023, 2, 28), 600, "Wooden executive desk for business center"),
        ("RH-ELV-006", "Passenger Elevator", "Building Systems", "Main Elevator", AssetStatus::Active, date(2019, 6, 1), 45000, "Main passenger elevator serving all floors"),
        ("RH-POOL-007", "Pool Filtration System", "Building Systems", "Swimming Pool", AssetStatus::Active, date(2020, 11, 3), 3500, "Sand filter and pump for the swimming pool"),
        ("RH-GEN-008", "Backup Generator", "Building Systems", "Backup Generator", AssetStatus::Active, date(2018, 9, 14), 18000, "Diesel standby generator"),
        ("RH-FA-009", "Fire Alarm Panel", "Safety Equipment", "Floor 3", AssetStatus::Active, date(2021, 2, 8), 2400, "Addressable fire alarm control panel"),
    ];
    let mut asset_ids = Vec::with_capacity(assets.len());
    for (tag, name, category, location, status, purchase_date, value, description) in assets {
        let asset = repository
            .assets
            .insert(Asset {
                id: 0,
                asset_tag: tag.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                location: location.to_string(),
                status,
                purchase_date,
                value: Decimal::from(value),
                description: Some(description.to_string()),
                assigned_user_id: None,
                created_at: Utc::now(),
                updated_at: None,
            })
            .await?;
        asset_ids.push(asset.id);
    }
    let asset = |tag: &str| {
        assets
            .iter()
            .position(|a| a.0 == tag)
            .map(|i| asset_ids[i])
            .unwrap_or_default()
    };

    let tasks = [
        ("AC Unit Maintenance", "RH-AC-002", "Ahmad Rizki", TaskStatus::InProgress, date(2024, 1, 25), "Regular maintenance check for AC unit", TaskPriority::High, at(2024, 1, 20, 0, 0)),
        ("Elevator Inspection", "RH-ELV-006", "Siti Nurhaliza", TaskStatus::Assigned, date(2024, 1, 28), "Monthly safety inspection", TaskPriority::High, at(2024, 1, 21, 0, 0)),
        ("Pool Filter Cleaning", "RH-POOL-007", "Budi Santoso", TaskStatus::Completed, date(2024, 1, 22), "Weekly pool filter maintenance", TaskPriority::Medium, at(2024, 1, 18, 0, 0)),
        ("Generator Testing", "RH-GEN-008", "Maya Sari", TaskStatus::Created, date(2024, 1, 30), "Monthly generator functionality test", TaskPriority::Medium, at(2024, 1, 22, 0, 0)),
        ("Fire Alarm Check", "RH-FA-009", "Ahmad Rizki", TaskStatus::Verified, date(2024, 1, 20), "Quarterly fire alarm system check", TaskPriority::High, at(2024, 1, 15, 0, 0)),
    ];
    for (name, tag, technician, status, due_date, description, priority, created_at) in tasks {
        repository
            .tasks
            .insert(MaintenanceTask {
                id: 0,
                name: name.to_string(),
                asset_id: asset(tag),
                assignee_id: user(technician),
                status,
                priority,
                due_date,
                description: Some(description.to_string()),
                created_at,
            })
            .await?;
    }

    let schedules = [
        ("AC Unit Servicing", "RH-AC-002", (2024, 12, 25, 9), (2024, 12, 25, 11), "John Smith", "Regular quarterly maintenance check", ScheduleStatus::Pending, SchedulePriority::Medium, None),
        ("TV Inspection", "RH-TV-001", (2024, 12, 26, 14), (2024, 12, 26, 15), "Mike Johnson", "Check for software updates and connectivity", ScheduleStatus::Completed, SchedulePriority::Low, None),
        ("Refrigerator Repair", "RH-REF-004", (2024, 12, 27, 10), (2024, 12, 27, 12), "Sarah Wilson", "Temperature control issue reported", ScheduleStatus::InProgress, SchedulePriority::High, None),
        ("Desk Maintenance", "RH-DESK-005", (2024, 12, 28, 16), (2024, 12, 28, 17), "Tom Brown", "Polish and check for damages", ScheduleStatus::Pending, SchedulePriority::Low, None),
        ("TV Software Update", "RH-TV-001", (2024, 12, 26, 14), (2024, 12, 26, 15), "John Smith", "Check for and install any available software updates", ScheduleStatus::Completed, SchedulePriority::Low, Some("Updated to latest firmware version. All streaming apps working properly.")),
        ("Refrigerator Temperature Check", "RH-REF-004", (2024, 12, 27, 10), (2024, 12, 27, 11), "John Smith", "Monitor and adjust refrigerator temperature", ScheduleStatus::InProgress, SchedulePriority::High, None),
    ];
    for (title, tag, start, end, staff, notes, status, priority, completion_notes) in schedules {
        let completed_at = (status == ScheduleStatus::Completed).then(|| at(start.0, start.1, start.2, start.3, 25));
        repository
            .schedules
            .insert(MaintenanceSchedule {
                id: 0,
                title: title.to_string(),
                asset_id: asset(tag),
                start: at(start.0, start.1, start.2, start.3, 0),
                end: at(end.0, end.1, end.2, end.3, 0),
                assignee_id: user(staff),
                notes: notes.to_string(),
                status,
                priority,
                completed_at,
                completion_notes: completion_notes.map(str::to_string),
            })
            .await?;
    }

    tracing::info!(
        users = user_ids.len(),
        assets = asset_ids.len(),
        "Sample hotel data loaded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_links_references() {
        let repository = Repository::new();
        seed_sample_data(&repository, "hash").await.unwrap();

        let tv = repository.assets.find_by_tag("rh-tv-001").await.unwrap().unwrap();
        assert_eq!(tv.name, "Samsung 55\" Smart TV");

        let tasks = repository.tasks.list().await.unwrap();
        assert_eq!(tasks.len(), 5);
        let ac_task = &tasks[0];
        assert_eq!(ac_task.name, "AC Unit Maintenance");
        let technician = repository.users.get_by_id(ac_task.assignee_id).await.unwrap();
        assert_eq!(technician.name, "Ahmad Rizki");

        let john = repository
            .users
            .get_by_email("JOHN@ramayanahotel.com")
            .await
            .unwrap()
            .unwrap();
        let johns = repository.schedules.list_for_assignee(john.id).await.unwrap();
        assert_eq!(johns.len(), 3);
    }
}
