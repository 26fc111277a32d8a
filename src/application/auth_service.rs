use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{LoginRequest, RegisterUser, UpdateProfile, UserProfile, UserSettings};
use crate::infrastructure::security::{generate_token, hash_password, verify_password};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String) -> Self {
        Self {
            user_repository,
            jwt_secret,
        }
    }

    /// Create a profile with default settings and return it alongside a
    /// fresh access token.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register_user(&self, req: RegisterUser) -> Result<(UserProfile, String)> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(
                DomainError::Validation("Email and password are required".to_string()).into(),
            );
        }
        if self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .is_some()
        {
            warn!(email = %req.email, "User already exists");
            return Err(
                DomainError::Validation("User with this email already exists".to_string()).into(),
            );
        }

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {e}"))
        })?;

        let now = Utc::now();
        let user = UserProfile {
            id: Uuid::new_v4().to_string(),
            email: req.email,
            display_name: req.display_name.unwrap_or_default(),
            password_hash,
            settings: UserSettings::with_defaults(
                req.currency_preference.unwrap_or_else(|| "USD".to_string()),
                req.language.unwrap_or_else(|| "en".to_string()),
            ),
            created_at: now,
            last_login: now,
        };

        self.user_repository.save_user(user.clone()).await?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, email = %user.email, "User registered successfully");
        Ok((user, token))
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<(UserProfile, String)> {
        let user = self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "User not found during login");
                DomainError::Unauthorized("Invalid email or password".to_string())
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {e}"))
        })?;
        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized("Invalid email or password".to_string()).into());
        }

        self.user_repository
            .touch_last_login(&user.id, Utc::now())
            .await?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "Login successful");
        Ok((user, token))
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.user_repository
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User not found: {user_id}")).into())
    }

    #[instrument(skip(self, req), fields(user_id))]
    pub async fn update_profile(&self, user_id: &str, req: UpdateProfile) -> Result<UserProfile> {
        let mut user = self.get_profile(user_id).await?;
        if let Some(display_name) = req.display_name {
            user.display_name = display_name;
        }
        if let Some(email) = req.email {
            if email.is_empty() {
                return Err(DomainError::Validation("Email cannot be empty".to_string()).into());
            }
            user.email = email;
        }
        self.user_repository.update_user(user.clone()).await?;
        Ok(user)
    }

    #[instrument(skip(self, settings), fields(user_id))]
    pub async fn update_settings(&self, user_id: &str, settings: UserSettings) -> Result<()> {
        let updated = self
            .user_repository
            .update_settings(user_id, settings)
            .await?;
        if !updated {
            return Err(DomainError::NotFound(format!("User not found: {user_id}")).into());
        }
        Ok(())
    }

    fn issue_token(&self, user: &UserProfile) -> Result<String> {
        let token = generate_token(&user.id, &user.email, &self.jwt_secret).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {e}"))
        })?;
        Ok(token)
    }
}
