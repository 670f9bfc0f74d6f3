//! Users repository

use chrono::{DateTime, Utc};

use super::{shared_table, SharedTable};
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateProfile, UpdateUser, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    table: SharedTable<User>,
}

impl UsersRepository {
    pub fn new() -> Self {
        Self {
            table: shared_table(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.table.read().await.to_vec())
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.table
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by email (login identifier, case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim();
        Ok(self
            .table
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let email = email.trim();
        Ok(self
            .table
            .read()
            .await
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != exclude_id))
    }

    pub async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut table = self.table.write().await;
        user.id = table.allocate_id();
        table.push(user.id, user.clone());
        Ok(user)
    }

    pub async fn create(&self, data: &CreateUser, password: String) -> AppResult<User> {
        self.insert(User {
            id: 0,
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            role: data.role,
            created_at: Utc::now(),
            last_login: None,
            password: Some(password),
        })
        .await
    }

    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        self.modify(id, |user| {
            if let Some(ref name) = data.name {
                user.name = name.trim().to_string();
            }
            if let Some(ref email) = data.email {
                user.email = email.trim().to_string();
            }
            if let Some(role) = data.role {
                user.role = role;
            }
        })
        .await
    }

    pub async fn update_profile(&self, id: i32, profile: &UpdateProfile) -> AppResult<User> {
        self.modify(id, |user| {
            if let Some(ref name) = profile.name {
                user.name = name.trim().to_string();
            }
            if let Some(ref email) = profile.email {
                user.email = email.trim().to_string();
            }
        })
        .await
    }

    pub async fn set_password(&self, id: i32, password: String) -> AppResult<User> {
        self.modify(id, |user| user.password = Some(password)).await
    }

    pub async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<User> {
        self.modify(id, |user| user.last_login = Some(at)).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.table
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    async fn modify<F>(&self, id: i32, apply: F) -> AppResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut table = self.table.write().await;
        let user = table
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
        apply(user);
        Ok(user.clone())
    }
}

impl Default for UsersRepository {
    fn default() -> Self {
        Self::new()
    }
}
