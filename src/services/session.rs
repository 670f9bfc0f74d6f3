//! Session service
//!
//! A session is the signed-in user's record saved under
//! `hotel-ams-user:<session id>` in a [`SessionStore`]. A missing record
//! means signed out. Tokens carry the session id, so removing the record
//! invalidates every token issued for it.

use std::{collections::HashMap, io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{
    models::user::{Credentials, User},
    repository::Repository,
    services::users::verify_password,
};

/// Storage key prefix for session records
pub const SESSION_KEY_PREFIX: &str = "hotel-ams-user";

pub fn session_key(session_id: &str) -> String {
    format!("{}:{}", SESSION_KEY_PREFIX, session_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session has ended")]
    SessionExpired,

    #[error("session storage failure: {0}")]
    Storage(String),
}

/// Key/value port the session service persists through
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, AuthError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), AuthError>;
    async fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// Process-local store; sessions end with the process
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// One JSON document per session under a directory, surviving restarts
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

fn storage_error(err: std::io::Error) -> AuthError {
    AuthError::Storage(err.to_string())
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, key: &str) -> Result<Option<String>, AuthError> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AuthError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(storage_error)?;
        tokio::fs::write(self.path(key), value)
            .await
            .map_err(storage_error)
    }

    async fn remove(&self, key: &str) -> Result<(), AuthError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    repository: Repository,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, repository: Repository) -> Self {
        Self { store, repository }
    }

    /// Check credentials, stamp the last login and open a new session
    pub async fn login(&self, credentials: &Credentials) -> Result<(String, User), AuthError> {
        let user = self
            .repository
            .users
            .get_by_email(&credentials.email)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let Some(user) = user else {
            tracing::warn!(email = %credentials.email, "Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(&user, &credentials.password) {
            tracing::warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .repository
            .users
            .touch_last_login(user.id, Utc::now())
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let session_id = Uuid::new_v4().to_string();
        self.save(&session_id, &user).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User signed in");

        Ok((session_id, user))
    }

    /// Signed-in user of a session, `None` once signed out
    pub async fn current_user(&self, session_id: &str) -> Result<Option<User>, AuthError> {
        let Some(raw) = self.store.load(&session_key(session_id)).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(session_id, "Discarding unreadable session record: {}", e);
                Ok(None)
            }
        }
    }

    /// Like [`current_user`](Self::current_user) but fails with
    /// [`AuthError::SessionExpired`] when signed out
    pub async fn require(&self, session_id: &str) -> Result<User, AuthError> {
        self.current_user(session_id)
            .await?
            .ok_or(AuthError::SessionExpired)
    }

    /// Restore a saved session on startup of a client, re-reading the user
    /// from the store. A session whose user has since been deleted is ended.
    pub async fn restore(&self, session_id: &str) -> Result<Option<User>, AuthError> {
        let Some(saved) = self.current_user(session_id).await? else {
            return Ok(None);
        };
        match self.repository.users.get_by_id(saved.id).await {
            Ok(user) => {
                self.save(session_id, &user).await?;
                Ok(Some(user))
            }
            Err(_) => {
                self.logout(session_id).await?;
                Ok(None)
            }
        }
    }

    /// Replace the saved user record of a live session
    pub async fn refresh(&self, session_id: &str, user: &User) -> Result<(), AuthError> {
        if self.current_user(session_id).await?.is_some() {
            self.save(session_id, user).await?;
        }
        Ok(())
    }

    pub async fn logout(&self, session_id: &str) -> Result<(), AuthError> {
        self.store.remove(&session_key(session_id)).await?;
        tracing::info!(session_id, "Session ended");
        Ok(())
    }

    async fn save(&self, session_id: &str, user: &User) -> Result<(), AuthError> {
        let raw = serde_json::to_string(user).map_err(|e| AuthError::Storage(e.to_string()))?;
        self.store.save(&session_key(session_id), &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::services::users::hash_password;
    use mockall::predicate::*;

    async fn repository_with_user() -> Repository {
        let repository = Repository::new();
        repository
            .users
            .insert(User {
                id: 0,
                name: "Abdul Basri".to_string(),
                email: "bas@ramayanahotel.com".to_string(),
                role: Role::Admin,
                created_at: Utc::now(),
                last_login: None,
                password: Some(hash_password("Husky1212").unwrap()),
            })
            .await
            .unwrap();
        repository
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let service = SessionService::new(
            Arc::new(MemorySessionStore::new()),
            repository_with_user().await,
        );

        let (sid, user) = service
            .login(&credentials("BAS@ramayanahotel.com", "Husky1212"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.last_login.is_some());
        assert_eq!(service.current_user(&sid).await.unwrap().unwrap().id, user.id);

        service.logout(&sid).await.unwrap();
        assert!(service.current_user(&sid).await.unwrap().is_none());
        assert_eq!(service.require(&sid).await, Err(AuthError::SessionExpired));
    }

    #[tokio::test]
    async fn test_invalid_credentials() {
        let service = SessionService::new(
            Arc::new(MemorySessionStore::new()),
            repository_with_user().await,
        );
        let err = service
            .login(&credentials("bas@ramayanahotel.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        let err = service
            .login(&credentials("nobody@ramayanahotel.com", "Husky1212"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_saves_under_prefixed_key() {
        let mut store = MockSessionStore::new();
        store
            .expect_save()
            .withf(|key, value| key.starts_with("hotel-ams-user:") && !value.contains("argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = SessionService::new(Arc::new(store), repository_with_user().await);
        service
            .login(&credentials("bas@ramayanahotel.com", "Husky1212"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut store = MockSessionStore::new();
        store
            .expect_load()
            .with(eq("hotel-ams-user:abc"))
            .returning(|_| Err(AuthError::Storage("disk unavailable".to_string())));

        let service = SessionService::new(Arc::new(store), Repository::new());
        let err = service.current_user("abc").await.unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
    }

    #[tokio::test]
    async fn test_restore_drops_deleted_user() {
        let repository = repository_with_user().await;
        let service = SessionService::new(Arc::new(MemorySessionStore::new()), repository.clone());
        let (sid, user) = service
            .login(&credentials("bas@ramayanahotel.com", "Husky1212"))
            .await
            .unwrap();

        assert_eq!(service.restore(&sid).await.unwrap().unwrap().id, user.id);
        repository.users.delete(user.id).await.unwrap();
        assert!(service.restore(&sid).await.unwrap().is_none());
        assert!(service.current_user(&sid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("sessions"));

        assert_eq!(store.load("hotel-ams-user:1").await.unwrap(), None);
        store.save("hotel-ams-user:1", "{\"id\":1}").await.unwrap();
        assert_eq!(
            store.load("hotel-ams-user:1").await.unwrap().as_deref(),
            Some("{\"id\":1}")
        );
        store.remove("hotel-ams-user:1").await.unwrap();
        store.remove("hotel-ams-user:1").await.unwrap();
        assert_eq!(store.load("hotel-ams-user:1").await.unwrap(), None);
    }
}
