use crate::domain::ledger::{Bill, Reward, SavingsGoal};
use crate::domain::models::{Amount, Budget, Expense, ExpenseFilter, Period};
use crate::domain::repository::{
    BillRepository, BudgetRepository, ExpenseRepository, RewardRepository, SavingsRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// In-memory document store. Each collection is a map keyed by document id;
/// user scoping is an equality filter, like the document database it stands
/// in for.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    expenses: Arc<RwLock<HashMap<String, Expense>>>,
    budgets: Arc<RwLock<HashMap<String, Budget>>>,
    savings: Arc<RwLock<HashMap<String, SavingsGoal>>>,
    bills: Arc<RwLock<HashMap<String, Bill>>>,
    rewards: Arc<RwLock<HashMap<String, Reward>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(expense: &Expense, filter: &ExpenseFilter) -> bool {
    if let Some(start) = filter.start_date
        && expense.created_at < start
    {
        return false;
    }
    if let Some(end) = filter.end_date
        && expense.created_at > end
    {
        return false;
    }
    if let Some(category) = &filter.category
        && &expense.category != category
    {
        return false;
    }
    if let Some(min) = filter.min_amount
        && expense.amount.inner() < min
    {
        return false;
    }
    if let Some(max) = filter.max_amount
        && expense.amount.inner() > max
    {
        return false;
    }
    true
}

#[async_trait]
impl ExpenseRepository for InMemoryStore {
    async fn save_expense(&self, expense: Expense) -> Result<()> {
        let mut storage = self.expenses.write().await;
        debug!(expense_id = %expense.id, user_id = %expense.user_id, "Expense saved");
        storage.insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn find_expense(&self, user_id: &str, id: &str) -> Result<Option<Expense>> {
        let storage = self.expenses.read().await;
        Ok(storage.get(id).filter(|e| e.user_id == user_id).cloned())
    }

    async fn list_expenses(&self, user_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let storage = self.expenses.read().await;
        let mut expenses: Vec<Expense> = storage
            .values()
            .filter(|e| e.user_id == user_id && matches_filter(e, filter))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(expenses)
    }

    async fn update_expense(&self, expense: Expense) -> Result<()> {
        let mut storage = self.expenses.write().await;
        storage.insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut storage = self.expenses.write().await;
        if storage.get(id).is_some_and(|e| e.user_id == user_id) {
            storage.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl BudgetRepository for InMemoryStore {
    async fn save_budget(&self, budget: Budget) -> Result<()> {
        let mut storage = self.budgets.write().await;
        debug!(budget_id = %budget.id, user_id = %budget.user_id, category = %budget.category, "Budget saved");
        storage.insert(budget.id.clone(), budget);
        Ok(())
    }

    async fn find_budget(&self, user_id: &str, id: &str) -> Result<Option<Budget>> {
        let storage = self.budgets.read().await;
        Ok(storage.get(id).filter(|b| b.user_id == user_id).cloned())
    }

    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let storage = self.budgets.read().await;
        let mut budgets: Vec<Budget> = storage
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(budgets)
    }

    async fn update_budget(&self, budget: Budget) -> Result<()> {
        let mut storage = self.budgets.write().await;
        storage.insert(budget.id.clone(), budget);
        Ok(())
    }

    async fn delete_budget(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut storage = self.budgets.write().await;
        if storage.get(id).is_some_and(|b| b.user_id == user_id) {
            storage.remove(id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn increment_spent(
        &self,
        user_id: &str,
        category: &str,
        period: Period,
        amount: Amount,
        month: &str,
    ) -> Result<Option<Budget>> {
        // Lookup and mutation share one write lock, making the
        // read-modify-write a single atomic step against this store.
        let mut storage = self.budgets.write().await;
        let budget = storage
            .values_mut()
            .find(|b| b.user_id == user_id && b.category == category && b.period == period);

        let Some(budget) = budget else {
            trace!(user_id, category, "No budget matches expense category");
            return Ok(None);
        };

        // An unstamped budget belongs to the current period: manual spent
        // edits made before the first apply of the month must survive.
        let rolled_over = budget
            .month
            .as_deref()
            .is_some_and(|stamped| stamped != month);
        let new_spent = if rolled_over {
            amount.inner()
        } else {
            budget.spent.inner() + amount.inner()
        };
        budget.spent = Amount::new(new_spent);
        budget.month = Some(month.to_string());

        debug!(
            budget_id = %budget.id,
            category = %budget.category,
            spent = new_spent,
            rolled_over,
            "Budget spent total updated"
        );
        Ok(Some(budget.clone()))
    }
}

#[async_trait]
impl SavingsRepository for InMemoryStore {
    async fn save_goal(&self, goal: SavingsGoal) -> Result<()> {
        let mut storage = self.savings.write().await;
        storage.insert(goal.id.clone(), goal);
        Ok(())
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        let storage = self.savings.read().await;
        Ok(storage
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_goal(&self, user_id: &str, id: &str) -> Result<Option<SavingsGoal>> {
        let storage = self.savings.read().await;
        Ok(storage.get(id).filter(|g| g.user_id == user_id).cloned())
    }

    async fn update_goal(&self, goal: SavingsGoal) -> Result<()> {
        let mut storage = self.savings.write().await;
        storage.insert(goal.id.clone(), goal);
        Ok(())
    }

    async fn delete_goal(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut storage = self.savings.write().await;
        if storage.get(id).is_some_and(|g| g.user_id == user_id) {
            storage.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl BillRepository for InMemoryStore {
    async fn save_bill(&self, bill: Bill) -> Result<()> {
        let mut storage = self.bills.write().await;
        storage.insert(bill.id.clone(), bill);
        Ok(())
    }

    async fn list_bills(&self, user_id: &str) -> Result<Vec<Bill>> {
        let storage = self.bills.read().await;
        let mut bills: Vec<Bill> = storage
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bills.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        Ok(bills)
    }

    async fn find_bill(&self, user_id: &str, id: &str) -> Result<Option<Bill>> {
        let storage = self.bills.read().await;
        Ok(storage.get(id).filter(|b| b.user_id == user_id).cloned())
    }

    async fn update_bill(&self, bill: Bill) -> Result<()> {
        let mut storage = self.bills.write().await;
        storage.insert(bill.id.clone(), bill);
        Ok(())
    }

    async fn delete_bill(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut storage = self.bills.write().await;
        if storage.get(id).is_some_and(|b| b.user_id == user_id) {
            storage.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl RewardRepository for InMemoryStore {
    async fn save_reward(&self, reward: Reward) -> Result<()> {
        let mut storage = self.rewards.write().await;
        storage.insert(reward.id.clone(), reward);
        Ok(())
    }

    async fn list_rewards(&self, user_id: &str) -> Result<Vec<Reward>> {
        let storage = self.rewards.read().await;
        let mut rewards: Vec<Reward> = storage
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rewards.sort_by(|a, b| b.earned_date.cmp(&a.earned_date));
        Ok(rewards)
    }

    async fn find_reward(&self, user_id: &str, id: &str) -> Result<Option<Reward>> {
        let storage = self.rewards.read().await;
        Ok(storage.get(id).filter(|r| r.user_id == user_id).cloned())
    }

    async fn update_reward(&self, reward: Reward) -> Result<()> {
        let mut storage = self.rewards.write().await;
        storage.insert(reward.id.clone(), reward);
        Ok(())
    }

    async fn delete_reward(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut storage = self.rewards.write().await;
        if storage.get(id).is_some_and(|r| r.user_id == user_id) {
            storage.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}
