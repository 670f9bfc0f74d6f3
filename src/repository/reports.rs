//! Report history repository (most recent first, unbounded)

use super::{shared_table, SharedTable};
use crate::{
    error::{AppError, AppResult},
    models::report::ReportEntry,
};

#[derive(Clone)]
pub struct ReportsRepository {
    table: SharedTable<ReportEntry>,
}

impl ReportsRepository {
    pub fn new() -> Self {
        Self {
            table: shared_table(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<ReportEntry>> {
        Ok(self.table.read().await.to_vec())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ReportEntry> {
        self.table
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Prepend a generated report; the entry's id is assigned here
    pub async fn prepend(&self, mut entry: ReportEntry) -> AppResult<ReportEntry> {
        let mut table = self.table.write().await;
        entry.id = table.allocate_id();
        table.push_front(entry.id, entry.clone());
        Ok(entry)
    }

    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.table.read().await.len())
    }
}

impl Default for ReportsRepository {
    fn default() -> Self {
        Self::new()
    }
}
