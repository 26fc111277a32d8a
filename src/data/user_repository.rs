use crate::domain::repository::UserRepository;
use crate::domain::user::{UserProfile, UserSettings};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn save_user(&self, user: UserProfile) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(user.id.clone(), user.clone());
        debug!(
            user_id = %user.id,
            email = %user.email,
            "User profile saved to memory storage"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let storage = self.storage.read().await;
        let user = storage.values().find(|u| u.email == email).cloned();
        if user.is_none() {
            trace!(email = email, "User not found in storage");
        }
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserProfile>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_user(&self, user: UserProfile) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(user.id.clone(), user);
        Ok(())
    }

    #[instrument(skip(self, settings), fields(user_id = id))]
    async fn update_settings(&self, id: &str, settings: UserSettings) -> Result<bool> {
        let mut storage = self.storage.write().await;
        match storage.get_mut(id) {
            Some(user) => {
                user.settings = settings;
                debug!(user_id = id, "User settings updated");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self, at), fields(user_id = id))]
    async fn touch_last_login(&self, id: &str, at: DateTime<Utc>) -> Result<()> {
        let mut storage = self.storage.write().await;
        if let Some(user) = storage.get_mut(id) {
            user.last_login = at;
        }
        Ok(())
    }
}
