//! Repository layer: in-memory entity tables
//!
//! Every table hands out increasing integer ids and lists rows in insertion
//! order, except where a table prepends (newest first). Nothing is persisted.

pub mod assets;
pub mod reports;
pub mod schedules;
pub mod seed;
pub mod settings;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Ordered rows keyed by id
#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: IndexMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    pub(crate) fn new() -> Self {
        Self {
            rows: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Reserve the next id
    pub(crate) fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push(&mut self, id: i32, row: T) {
        self.rows.insert(id, row);
    }

    /// Insert ahead of every existing row
    pub(crate) fn push_front(&mut self, id: i32, row: T) {
        self.rows.shift_insert(0, id, row);
    }

    pub(crate) fn get(&self, id: i32) -> Option<&T> {
        self.rows.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    /// Remove keeping the order of the remaining rows
    pub(crate) fn remove(&mut self, id: i32) -> Option<T> {
        self.rows.shift_remove(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

pub(crate) type SharedTable<T> = Arc<RwLock<Table<T>>>;

pub(crate) fn shared_table<T: Clone>() -> SharedTable<T> {
    Arc::new(RwLock::new(Table::new()))
}

/// Main repository struct holding every entity table
#[derive(Clone)]
pub struct Repository {
    pub assets: assets::AssetsRepository,
    pub tasks: tasks::TasksRepository,
    pub schedules: schedules::SchedulesRepository,
    pub users: users::UsersRepository,
    pub reports: reports::ReportsRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            assets: assets::AssetsRepository::new(),
            tasks: tasks::TasksRepository::new(),
            schedules: schedules::SchedulesRepository::new(),
            users: users::UsersRepository::new(),
            reports: reports::ReportsRepository::new(),
            settings: settings::SettingsRepository::new(),
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ids_and_order() {
        let mut table: Table<&str> = Table::new();
        let a = table.allocate_id();
        table.push(a, "a");
        let b = table.allocate_id();
        table.push(b, "b");
        let c = table.allocate_id();
        table.push_front(c, "c");

        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(table.to_vec(), vec!["c", "a", "b"]);

        table.remove(a);
        assert_eq!(table.to_vec(), vec!["c", "b"]);
        assert_eq!(table.allocate_id(), 4);
        assert_eq!(table.len(), 2);
    }
}
