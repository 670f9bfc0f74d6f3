//! Authentication service: tokens on top of sessions

use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{
        ChangePassword, CreateUser, Credentials, Role, UpdateProfile, User, UserClaims,
    },
    repository::Repository,
    services::{
        session::{AuthError, SessionService},
        users::{hash_password, verify_password},
    },
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    sessions: SessionService,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, sessions: SessionService, config: AuthConfig) -> Self {
        Self {
            repository,
            sessions,
            config,
        }
    }

    /// Sign in and return a bearer token for the new session
    pub async fn login(&self, credentials: &Credentials) -> AppResult<(String, User)> {
        let (session_id, user) = self.sessions.login(credentials).await?;
        let token = self.create_token(&user, &session_id)?;
        Ok((token, user))
    }

    /// Create a staff account and sign it in
    pub async fn register(&self, data: CreateUser) -> AppResult<(String, User)> {
        let Some(password) = data.password.clone() else {
            return Err(AppError::Validation("Password is required".to_string()));
        };
        if self.repository.users.email_exists(&data.email, None).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let data = CreateUser {
            role: Role::Staff,
            ..data
        };
        self.repository
            .users
            .create(&data, hash_password(&password)?)
            .await?;

        self.login(&Credentials {
            email: data.email,
            password,
        })
        .await
    }

    fn create_token(&self, user: &User, session_id: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            sid: session_id.to_string(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Resolve a bearer token. The token must be valid, its session still
    /// open and its user still present. The returned role is the user's
    /// current role, not the one the token was issued with.
    pub async fn authenticate(&self, token: &str) -> AppResult<UserClaims> {
        let mut claims = UserClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))?;
        let user = self
            .sessions
            .restore(&claims.sid)
            .await?
            .ok_or(AuthError::SessionExpired)?;
        if user.id != claims.user_id {
            return Err(AuthError::SessionExpired.into());
        }
        if user.role != claims.role {
            tracing::debug!(user_id = user.id, from = %claims.role, to = %user.role, "Role changed since sign-in");
            claims.role = user.role;
        }
        Ok(claims)
    }

    pub async fn logout(&self, claims: &UserClaims) -> AppResult<()> {
        self.sessions.logout(&claims.sid).await?;
        Ok(())
    }

    pub async fn me(&self, claims: &UserClaims) -> AppResult<User> {
        self.repository.users.get_by_id(claims.user_id).await
    }

    /// Update own name and email; the session copy follows
    pub async fn update_profile(&self, claims: &UserClaims, profile: UpdateProfile) -> AppResult<User> {
        if let Some(ref email) = profile.email {
            if self
                .repository
                .users
                .email_exists(email, Some(claims.user_id))
                .await?
            {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }

        let user = self
            .repository
            .users
            .update_profile(claims.user_id, &profile)
            .await?;
        self.sessions.refresh(&claims.sid, &user).await?;
        Ok(user)
    }

    /// Change own password: the current password must match, the new one
    /// must be confirmed and differ from the current one.
    pub async fn change_password(&self, claims: &UserClaims, request: ChangePassword) -> AppResult<()> {
        if request.new_password != request.confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        if request.new_password == request.current_password {
            return Err(AppError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        let user = self.repository.users.get_by_id(claims.user_id).await?;
        if !verify_password(&user, &request.current_password) {
            return Err(AppError::Authentication(
                "Current password is incorrect".to_string(),
            ));
        }

        self.repository
            .users
            .set_password(user.id, hash_password(&request.new_password)?)
            .await?;
        tracing::info!(user_id = user.id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UpdateUser;
    use crate::services::session::MemorySessionStore;
    use std::sync::Arc;

    async fn service() -> AuthService {
        let repository = Repository::new();
        repository
            .users
            .insert(User {
                id: 0,
                name: "Kiswanto".to_string(),
                email: "kiswanto@ramayanahotel.com".to_string(),
                role: Role::Staff,
                created_at: Utc::now(),
                last_login: None,
                password: Some(hash_password("staff123").unwrap()),
            })
            .await
            .unwrap();
        let sessions = SessionService::new(Arc::new(MemorySessionStore::new()), repository.clone());
        AuthService::new(repository, sessions, AuthConfig::default())
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: "kiswanto@ramayanahotel.com".to_string(),
            password: password.to_string(),
        }
    }

    fn change(current: &str, new: &str, confirm: &str) -> ChangePassword {
        ChangePassword {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_token_dies_with_session() {
        let auth = service().await;
        let (token, user) = auth.login(&credentials("staff123")).await.unwrap();

        let claims = auth.authenticate(&token).await.unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.role, Role::Staff);

        auth.logout(&claims).await.unwrap();
        assert!(matches!(
            auth.authenticate(&token).await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_token_follows_live_user() {
        let auth = service().await;
        let (token, user) = auth.login(&credentials("staff123")).await.unwrap();

        auth.repository
            .users
            .update(
                user.id,
                &UpdateUser {
                    role: Some(Role::Viewer),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let claims = auth.authenticate(&token).await.unwrap();
        assert_eq!(claims.role, Role::Viewer);
        assert!(claims.require_staff().is_err());

        auth.repository.users.delete(user.id).await.unwrap();
        assert!(matches!(
            auth.authenticate(&token).await,
            Err(AppError::Authentication(_))
        ));
        assert!(auth.sessions.current_user(&claims.sid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_change_password_rules() {
        let auth = service().await;
        let (token, _) = auth.login(&credentials("staff123")).await.unwrap();
        let claims = auth.authenticate(&token).await.unwrap();

        let err = auth
            .change_password(&claims, change("staff123", "newpass1", "newpass2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = auth
            .change_password(&claims, change("staff123", "staff123", "staff123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = auth
            .change_password(&claims, change("wrong", "newpass1", "newpass1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));

        auth.change_password(&claims, change("staff123", "newpass1", "newpass1"))
            .await
            .unwrap();
        assert!(auth.login(&credentials("newpass1")).await.is_ok());
        assert!(auth.login(&credentials("staff123")).await.is_err());
    }
}
