//! User management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{distributions::Alphanumeric, Rng};

use crate::{
    error::{AppError, AppResult},
    filter::RecordFilter,
    models::user::{CreateUser, UpdateUser, User, UserQuery},
    repository::Repository,
};

/// Users per page on the user management list
pub const DEFAULT_PAGE_SIZE: i64 = 5;

const TEMP_PASSWORD_LEN: usize = 10;

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against the user's stored hash. Accounts without a
/// password never match.
pub fn verify_password(user: &User, password: &str) -> bool {
    let Some(ref hash) = user.password else {
        return false;
    };
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!(user_id = user.id, "Stored password hash is unreadable: {}", e);
            false
        }
    }
}

/// Random alphanumeric password handed out on creation or reset
pub fn generate_temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

/// One page of users
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search by name or email, filter by role, then paginate
    pub async fn search_users(&self, query: &UserQuery) -> AppResult<UserPage> {
        let users = self.repository.users.list().await?;
        let matched = RecordFilter::new(query.search.as_deref())
            .ignore_case(query.role.as_deref(), |u: &User| u.role.as_str())
            .apply(users);

        let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);
        let total = matched.len() as i64;
        let offset = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
        let users = matched
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();

        Ok(UserPage {
            users,
            total,
            page,
            per_page,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a user. Without an initial password a temporary one is
    /// generated and returned alongside the user.
    pub async fn create_user(&self, data: CreateUser) -> AppResult<(User, Option<String>)> {
        if self.repository.users.email_exists(&data.email, None).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let (password, temporary) = match data.password {
            Some(ref password) => (password.clone(), None),
            None => {
                let temporary = generate_temporary_password();
                (temporary.clone(), Some(temporary))
            }
        };
        let user = self
            .repository
            .users
            .create(&data, hash_password(&password)?)
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok((user, temporary))
    }

    pub async fn update_user(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        self.repository.users.get_by_id(id).await?;

        if let Some(ref email) = data.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }

        let user = self.repository.users.update(id, &data).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Delete a user. Administrators cannot delete their own account.
    pub async fn delete_user(&self, id: i32, acting_user_id: i32) -> AppResult<()> {
        if id == acting_user_id {
            return Err(AppError::BusinessRule(
                "You cannot delete your own account".to_string(),
            ));
        }
        self.repository.users.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Replace the user's password with a generated temporary one
    pub async fn reset_password(&self, id: i32) -> AppResult<String> {
        self.repository.users.get_by_id(id).await?;
        let temporary = generate_temporary_password();
        self.repository
            .users
            .set_password(id, hash_password(&temporary)?)
            .await?;
        tracing::info!(user_id = id, "Password reset");
        Ok(temporary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use chrono::Utc;

    async fn service_with(names: &[(&str, Role)]) -> UsersService {
        let repository = Repository::new();
        for (name, role) in names {
            repository
                .users
                .insert(User {
                    id: 0,
                    name: name.to_string(),
                    email: format!("{}@ramayanahotel.com", name.to_lowercase()),
                    role: *role,
                    created_at: Utc::now(),
                    last_login: None,
                    password: None,
                })
                .await
                .unwrap();
        }
        UsersService::new(repository)
    }

    fn query(search: Option<&str>, role: Option<&str>, page: Option<i64>) -> UserQuery {
        UserQuery {
            search: search.map(str::to_string),
            role: role.map(str::to_string),
            page,
            per_page: None,
        }
    }

    #[tokio::test]
    async fn test_search_and_paginate() {
        let names: Vec<(String, Role)> = (1..=7)
            .map(|i| (format!("Staff{}", i), Role::Staff))
            .collect();
        let mut refs: Vec<(&str, Role)> = names.iter().map(|(n, r)| (n.as_str(), *r)).collect();
        refs.push(("Viewer", Role::Viewer));
        let service = service_with(&refs).await;

        let page = service.search_users(&query(None, Some("all"), None)).await.unwrap();
        assert_eq!(page.total, 8);
        assert_eq!(page.users.len(), 5);

        let page = service.search_users(&query(None, Some("staff"), Some(2))).await.unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[0].name, "Staff6");

        let page = service.search_users(&query(Some("VIEWER@"), None, None)).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let service = service_with(&[("Kiswanto", Role::Staff), ("Viewer", Role::Viewer)]).await;

        let page = service
            .search_users(&query(None, None, Some(i64::MAX)))
            .await
            .unwrap();
        assert!(page.users.is_empty());
        assert_eq!(page.total, 2);
        assert_eq!(page.page, i64::MAX);

        let page = service.search_users(&query(None, None, Some(3))).await.unwrap();
        assert!(page.users.is_empty());
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let service = service_with(&[("Admin", Role::Admin)]).await;
        let err = service.delete_user(1, 1).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service_with(&[("Kiswanto", Role::Staff)]).await;
        let data = CreateUser {
            name: "Other".to_string(),
            email: "KISWANTO@ramayanahotel.com".to_string(),
            role: Role::Staff,
            password: Some("secret1".to_string()),
        };
        assert!(matches!(service.create_user(data).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_reset_password_sets_new_hash() {
        let service = service_with(&[("Kiswanto", Role::Staff)]).await;
        let temporary = service.reset_password(1).await.unwrap();
        assert_eq!(temporary.len(), TEMP_PASSWORD_LEN);
        let user = service.get_by_id(1).await.unwrap();
        assert!(verify_password(&user, &temporary));
        assert!(!verify_password(&user, "wrong"));
    }
}
