use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::Amount;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub goal_name: String,
    pub target_amount: Amount,
    pub current_amount: Amount,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSavingsGoal {
    pub goal_name: String,
    pub target_amount: Amount,
    #[serde(default)]
    pub current_amount: Option<Amount>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSavingsGoal {
    pub goal_name: Option<String>,
    pub target_amount: Option<Amount>,
    pub current_amount: Option<Amount>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Bill {
    pub id: String,
    pub user_id: String,
    pub bill_name: String,
    pub due_date: DateTime<Utc>,
    pub amount: Amount,
    pub reminder: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBill {
    pub bill_name: String,
    pub due_date: DateTime<Utc>,
    pub amount: Amount,
    #[serde(default)]
    pub reminder: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBill {
    pub bill_name: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub amount: Option<Amount>,
    pub reminder: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Reward {
    pub id: String,
    pub user_id: String,
    pub reward_name: String,
    pub earned_date: DateTime<Utc>,
    pub points: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReward {
    pub reward_name: String,
    pub earned_date: Option<DateTime<Utc>>,
    pub points: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateReward {
    pub reward_name: Option<String>,
    pub earned_date: Option<DateTime<Utc>>,
    pub points: Option<u32>,
}
