use crate::domain::ledger::{Bill, Reward, SavingsGoal};
use crate::domain::models::{Amount, Budget, Expense, ExpenseFilter, Period};
use crate::domain::user::{UserProfile, UserSettings};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn save_expense(&self, expense: Expense) -> Result<()>;
    async fn find_expense(&self, user_id: &str, id: &str) -> Result<Option<Expense>>;
    async fn list_expenses(&self, user_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>>;
    async fn update_expense(&self, expense: Expense) -> Result<()>;
    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait BudgetRepository: Send + Sync {
    async fn save_budget(&self, budget: Budget) -> Result<()>;
    async fn find_budget(&self, user_id: &str, id: &str) -> Result<Option<Budget>>;
    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    async fn update_budget(&self, budget: Budget) -> Result<()>;
    async fn delete_budget(&self, user_id: &str, id: &str) -> Result<bool>;

    /// Atomically add `amount` to the spent total of the budget matching
    /// (`user_id`, `category`, `period`). The read-modify-write happens
    /// under a single store lock so concurrent applies never lose updates.
    /// A budget stamped with an earlier `month` has its spent total reset
    /// to `amount` first; an unstamped budget accumulates from its current
    /// total. Returns the updated budget, or `None` when no budget matches.
    async fn increment_spent(
        &self,
        user_id: &str,
        category: &str,
        period: Period,
        amount: Amount,
        month: &str,
    ) -> Result<Option<Budget>>;
}

#[async_trait]
pub trait SavingsRepository: Send + Sync {
    async fn save_goal(&self, goal: SavingsGoal) -> Result<()>;
    async fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>>;
    async fn find_goal(&self, user_id: &str, id: &str) -> Result<Option<SavingsGoal>>;
    async fn update_goal(&self, goal: SavingsGoal) -> Result<()>;
    async fn delete_goal(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn save_bill(&self, bill: Bill) -> Result<()>;
    async fn list_bills(&self, user_id: &str) -> Result<Vec<Bill>>;
    async fn find_bill(&self, user_id: &str, id: &str) -> Result<Option<Bill>>;
    async fn update_bill(&self, bill: Bill) -> Result<()>;
    async fn delete_bill(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait RewardRepository: Send + Sync {
    async fn save_reward(&self, reward: Reward) -> Result<()>;
    async fn list_rewards(&self, user_id: &str) -> Result<Vec<Reward>>;
    async fn find_reward(&self, user_id: &str, id: &str) -> Result<Option<Reward>>;
    async fn update_reward(&self, reward: Reward) -> Result<()>;
    async fn delete_reward(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save_user(&self, user: UserProfile) -> Result<()>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserProfile>>;
    async fn update_user(&self, user: UserProfile) -> Result<()>;
    async fn update_settings(&self, id: &str, settings: UserSettings) -> Result<bool>;
    async fn touch_last_login(&self, id: &str, at: DateTime<Utc>) -> Result<()>;
}
