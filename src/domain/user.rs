use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub settings: UserSettings,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub dark_mode: bool,
    pub currency: String,
    pub language: String,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub budget_alerts: bool,
    pub savings_goals: bool,
    pub rewards: bool,
}

impl UserSettings {
    pub fn with_defaults(currency: String, language: String) -> Self {
        Self {
            dark_mode: false,
            currency,
            language,
            notifications: NotificationSettings {
                budget_alerts: true,
                savings_goals: true,
                rewards: true,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub currency_preference: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
}
