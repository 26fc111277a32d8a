use crate::domain::models::{Amount, Budget, Period};
use crate::domain::notifier::{OverageEvent, OverageNotifier};
use crate::domain::repository::BudgetRepository;
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of applying an expense to the matching budget.
#[derive(Debug)]
pub enum BudgetImpact {
    /// No budget exists for the expense's (user, category, monthly) key.
    NoBudget,
    Updated { budget: Budget, overage: bool },
}

/// Applies recorded expenses to their monthly budgets.
///
/// Best-effort relative to expense recording: callers invoke this after the
/// expense is durably saved, typically from a spawned task, and failures
/// here never propagate back to the expense-creation request.
pub struct BudgetTracker<B: BudgetRepository> {
    repository: Arc<B>,
    notifier: Arc<dyn OverageNotifier>,
    store_timeout: Duration,
}

impl<B: BudgetRepository> BudgetTracker<B> {
    pub fn new(repository: Arc<B>, notifier: Arc<dyn OverageNotifier>) -> Self {
        Self {
            repository,
            notifier,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Increment the spent total of the budget matching the expense's
    /// category and signal an overage when the new total exceeds the limit.
    /// The overage check is advisory only.
    #[instrument(skip(self), fields(user_id, category, amount = amount.inner()))]
    pub async fn apply_expense(
        &self,
        user_id: &str,
        category: &str,
        amount: Amount,
    ) -> Result<BudgetImpact> {
        let month = Utc::now().format("%Y-%m").to_string();

        let updated = tokio::time::timeout(
            self.store_timeout,
            self.repository
                .increment_spent(user_id, category, Period::Monthly, amount, &month),
        )
        .await
        .context("Budget store call timed out")??;

        let Some(budget) = updated else {
            return Ok(BudgetImpact::NoBudget);
        };

        let overage = budget.spent > budget.limit;
        if overage {
            warn!(
                category = %budget.category,
                limit = budget.limit.inner(),
                spent = budget.spent.inner(),
                "Budget limit exceeded"
            );
            self.notifier.budget_exceeded(OverageEvent {
                user_id: user_id.to_string(),
                category: budget.category.clone(),
                limit: budget.limit.inner(),
                spent: budget.spent.inner(),
            });
        } else {
            info!(
                category = %budget.category,
                spent = budget.spent.inner(),
                "Budget spent total updated"
            );
        }

        Ok(BudgetImpact::Updated { budget, overage })
    }
}
