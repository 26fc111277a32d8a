use crate::domain::error::DomainError;
use crate::domain::ledger::{
    Bill, CreateBill, CreateReward, CreateSavingsGoal, Reward, SavingsGoal, UpdateBill,
    UpdateReward, UpdateSavingsGoal,
};
use crate::domain::models::Amount;
use crate::domain::repository::{BillRepository, RewardRepository, SavingsRepository};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// CRUD over the side collections: savings goals, bills and rewards.
pub struct LedgerService<S>
where
    S: SavingsRepository + BillRepository + RewardRepository,
{
    repository: Arc<S>,
}

impl<S> LedgerService<S>
where
    S: SavingsRepository + BillRepository + RewardRepository,
{
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    // Savings goals

    #[instrument(skip(self, req), fields(user_id))]
    pub async fn create_goal(&self, user_id: &str, req: CreateSavingsGoal) -> Result<SavingsGoal> {
        if req.target_amount.inner() <= 0.0 {
            return Err(DomainError::Validation("Target amount must be positive".to_string()).into());
        }
        let goal = SavingsGoal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            goal_name: req.goal_name,
            target_amount: req.target_amount,
            current_amount: req.current_amount.unwrap_or(Amount::new(0.0)),
            due_date: req.due_date,
        };
        self.repository.save_goal(goal.clone()).await?;
        Ok(goal)
    }

    pub async fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        self.repository.list_goals(user_id).await
    }

    pub async fn update_goal(
        &self,
        user_id: &str,
        id: &str,
        req: UpdateSavingsGoal,
    ) -> Result<SavingsGoal> {
        let mut goal = self
            .repository
            .find_goal(user_id, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Savings goal not found: {id}")))?;
        if let Some(name) = req.goal_name {
            goal.goal_name = name;
        }
        if let Some(target) = req.target_amount {
            goal.target_amount = target;
        }
        if let Some(current) = req.current_amount {
            goal.current_amount = current;
        }
        if let Some(due) = req.due_date {
            goal.due_date = Some(due);
        }
        self.repository.update_goal(goal.clone()).await?;
        Ok(goal)
    }

    pub async fn delete_goal(&self, user_id: &str, id: &str) -> Result<()> {
        if !SavingsRepository::delete_goal(&*self.repository, user_id, id).await? {
            return Err(DomainError::NotFound(format!("Savings goal not found: {id}")).into());
        }
        Ok(())
    }

    // Bills

    #[instrument(skip(self, req), fields(user_id))]
    pub async fn create_bill(&self, user_id: &str, req: CreateBill) -> Result<Bill> {
        if !req.amount.inner().is_finite() || req.amount.inner() <= 0.0 {
            return Err(DomainError::Validation("Bill amount must be positive".to_string()).into());
        }
        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            bill_name: req.bill_name,
            due_date: req.due_date,
            amount: req.amount,
            reminder: req.reminder,
        };
        self.repository.save_bill(bill.clone()).await?;
        Ok(bill)
    }

    pub async fn list_bills(&self, user_id: &str) -> Result<Vec<Bill>> {
        self.repository.list_bills(user_id).await
    }

    pub async fn update_bill(&self, user_id: &str, id: &str, req: UpdateBill) -> Result<Bill> {
        let mut bill = self
            .repository
            .find_bill(user_id, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Bill not found: {id}")))?;
        if let Some(name) = req.bill_name {
            bill.bill_name = name;
        }
        if let Some(due) = req.due_date {
            bill.due_date = due;
        }
        if let Some(amount) = req.amount {
            if !amount.inner().is_finite() || amount.inner() <= 0.0 {
                return Err(
                    DomainError::Validation("Bill amount must be positive".to_string()).into(),
                );
            }
            bill.amount = amount;
        }
        if let Some(reminder) = req.reminder {
            bill.reminder = reminder;
        }
        self.repository.update_bill(bill.clone()).await?;
        Ok(bill)
    }

    pub async fn delete_bill(&self, user_id: &str, id: &str) -> Result<()> {
        if !BillRepository::delete_bill(&*self.repository, user_id, id).await? {
            return Err(DomainError::NotFound(format!("Bill not found: {id}")).into());
        }
        Ok(())
    }

    // Rewards

    #[instrument(skip(self, req), fields(user_id))]
    pub async fn create_reward(&self, user_id: &str, req: CreateReward) -> Result<Reward> {
        let reward = Reward {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            reward_name: req.reward_name,
            earned_date: req.earned_date.unwrap_or_else(Utc::now),
            points: req.points,
        };
        self.repository.save_reward(reward.clone()).await?;
        Ok(reward)
    }

    pub async fn list_rewards(&self, user_id: &str) -> Result<Vec<Reward>> {
        self.repository.list_rewards(user_id).await
    }

    pub async fn update_reward(&self, user_id: &str, id: &str, req: UpdateReward) -> Result<Reward> {
        let mut reward = self
            .repository
            .find_reward(user_id, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Reward not found: {id}")))?;
        if let Some(name) = req.reward_name {
            reward.reward_name = name;
        }
        if let Some(earned) = req.earned_date {
            reward.earned_date = earned;
        }
        if let Some(points) = req.points {
            reward.points = points;
        }
        self.repository.update_reward(reward.clone()).await?;
        Ok(reward)
    }

    pub async fn delete_reward(&self, user_id: &str, id: &str) -> Result<()> {
        if !RewardRepository::delete_reward(&*self.repository, user_id, id).await? {
            return Err(DomainError::NotFound(format!("Reward not found: {id}")).into());
        }
        Ok(())
    }
}
