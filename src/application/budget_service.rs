use crate::domain::error::DomainError;
use crate::domain::models::{Amount, Budget, BudgetOverview, CreateBudget, UpdateBudget};
use crate::domain::repository::BudgetRepository;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct BudgetService<B: BudgetRepository> {
    repository: Arc<B>,
}

impl<B: BudgetRepository> BudgetService<B> {
    pub fn new(repository: Arc<B>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, req), fields(user_id, category = %req.category))]
    pub async fn create_budget(&self, user_id: &str, req: CreateBudget) -> Result<Budget> {
        if !req.limit.inner().is_finite() || req.limit.inner() <= 0.0 {
            return Err(DomainError::Validation("Budget limit must be positive".to_string()).into());
        }
        if self
            .repository
            .list_budgets(user_id)
            .await?
            .iter()
            .any(|b| b.category == req.category && b.period == req.period)
        {
            return Err(DomainError::Validation(format!(
                "A monthly budget for '{}' already exists",
                req.category
            ))
            .into());
        }

        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category: req.category,
            limit: req.limit,
            period: req.period,
            spent: Amount::new(0.0),
            month: None,
        };
        self.repository.save_budget(budget.clone()).await?;
        info!(budget_id = %budget.id, category = %budget.category, "Budget created");
        Ok(budget)
    }

    /// Budget listing plus the aggregate numbers the dashboard shows.
    pub async fn overview(&self, user_id: &str) -> Result<BudgetOverview> {
        let budgets = self.repository.list_budgets(user_id).await?;
        let total_budget: f64 = budgets.iter().map(|b| b.limit.inner()).sum();
        let total_spent: f64 = budgets.iter().map(|b| b.spent.inner()).sum();
        let utilization_percentage = if total_budget > 0.0 {
            total_spent / total_budget * 100.0
        } else {
            0.0
        };
        Ok(BudgetOverview {
            budgets,
            total_budget,
            total_spent,
            remaining_budget: total_budget - total_spent,
            utilization_percentage,
        })
    }

    #[instrument(skip(self, req), fields(user_id, budget_id = id))]
    pub async fn update_budget(&self, user_id: &str, id: &str, req: UpdateBudget) -> Result<Budget> {
        let mut budget = self
            .repository
            .find_budget(user_id, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Budget not found: {id}")))?;

        if let Some(category) = req.category {
            budget.category = category;
        }
        if let Some(limit) = req.limit {
            if !limit.inner().is_finite() || limit.inner() <= 0.0 {
                return Err(
                    DomainError::Validation("Budget limit must be positive".to_string()).into(),
                );
            }
            budget.limit = limit;
        }
        // Explicit spent edits are the user's compensating adjustment for
        // deleted or corrected expenses.
        if let Some(spent) = req.spent {
            if !spent.inner().is_finite() || spent.inner() < 0.0 {
                return Err(DomainError::InvalidAmount.into());
            }
            budget.spent = spent;
        }

        self.repository.update_budget(budget.clone()).await?;
        Ok(budget)
    }

    #[instrument(skip(self), fields(user_id, budget_id = id))]
    pub async fn delete_budget(&self, user_id: &str, id: &str) -> Result<()> {
        let deleted = self.repository.delete_budget(user_id, id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("Budget not found: {id}")).into());
        }
        Ok(())
    }
}
