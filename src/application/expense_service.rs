use crate::application::budget_tracker::BudgetTracker;
use crate::domain::categorizer::Categorizer;
use crate::domain::error::DomainError;
use crate::domain::models::{
    CreateExpense, Expense, ExpenseFilter, ExpenseInsights, SpendingSummary, UpdateExpense,
};
use crate::domain::repository::{BudgetRepository, ExpenseRepository};
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

pub struct ExpenseService<E: ExpenseRepository, B: BudgetRepository + 'static> {
    repository: Arc<E>,
    categorizer: Categorizer,
    tracker: Arc<BudgetTracker<B>>,
}

impl<E: ExpenseRepository, B: BudgetRepository> ExpenseService<E, B> {
    pub fn new(repository: Arc<E>, categorizer: Categorizer, tracker: Arc<BudgetTracker<B>>) -> Self {
        Self {
            repository,
            categorizer,
            tracker,
        }
    }

    /// Record a new expense. A missing category is derived from the title
    /// and amount. Budget tracking runs as a detached task after the save:
    /// its failures are logged and never reach this call's result.
    #[instrument(skip(self, req), fields(user_id))]
    pub async fn create_expense(&self, user_id: &str, req: CreateExpense) -> Result<Expense> {
        if !req.amount.inner().is_finite() || req.amount.inner() < 0.0 {
            return Err(DomainError::InvalidAmount.into());
        }

        let category = match req.category {
            Some(category) if !category.is_empty() => category,
            _ => self.categorizer.categorize(&req.title, req.amount),
        };

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: req.title,
            amount: req.amount,
            category,
            created_at: now,
            updated_at: now,
        };
        self.repository.save_expense(expense.clone()).await?;

        info!(
            expense_id = %expense.id,
            category = %expense.category,
            amount = expense.amount.inner(),
            "Expense recorded"
        );

        // Fire-and-forget budget tracking, decoupled from the response.
        let tracker = self.tracker.clone();
        let user_id = user_id.to_string();
        let category = expense.category.clone();
        let amount = expense.amount;
        tokio::spawn(async move {
            if let Err(e) = tracker.apply_expense(&user_id, &category, amount).await {
                error!(user_id = %user_id, category = %category, error = %e, "Budget tracking failed");
            }
        });

        Ok(expense)
    }

    pub async fn list_expenses(
        &self,
        user_id: &str,
        filter: &ExpenseFilter,
    ) -> Result<(Vec<Expense>, ExpenseInsights)> {
        let expenses = self.repository.list_expenses(user_id, filter).await?;
        let insights = compute_insights(&expenses);
        Ok((expenses, insights))
    }

    #[instrument(skip(self, req), fields(user_id, expense_id = id))]
    pub async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        req: UpdateExpense,
    ) -> Result<Expense> {
        let mut expense = self
            .repository
            .find_expense(user_id, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Expense not found: {id}")))?;

        if let Some(title) = req.title {
            expense.title = title;
        }
        if let Some(amount) = req.amount {
            if !amount.inner().is_finite() || amount.inner() < 0.0 {
                return Err(DomainError::InvalidAmount.into());
            }
            expense.amount = amount;
        }
        if let Some(category) = req.category {
            expense.category = category;
        }
        expense.updated_at = Utc::now();

        self.repository.update_expense(expense.clone()).await?;
        Ok(expense)
    }

    #[instrument(skip(self), fields(user_id, expense_id = id))]
    pub async fn delete_expense(&self, user_id: &str, id: &str) -> Result<()> {
        let deleted = self.repository.delete_expense(user_id, id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("Expense not found: {id}")).into());
        }
        Ok(())
    }

    /// Coarse spending summary for the insights endpoint. The savings
    /// percentage and recommendation are stubs carried over from the
    /// original service.
    pub async fn spending_summary(&self, user_id: &str) -> Result<SpendingSummary> {
        let expenses = self
            .repository
            .list_expenses(user_id, &ExpenseFilter::default())
            .await?;
        let total_spent = expenses.iter().map(|e| e.amount.inner()).sum();
        Ok(SpendingSummary {
            total_spent,
            savings_percentage: 20.0,
            recommended_budget_adjustment: "Increase budget for groceries".to_string(),
        })
    }
}

fn compute_insights(expenses: &[Expense]) -> ExpenseInsights {
    let total_amount: f64 = expenses.iter().map(|e| e.amount.inner()).sum();
    let mut category_breakdown: HashMap<String, f64> = HashMap::new();
    for expense in expenses {
        *category_breakdown
            .entry(expense.category.clone())
            .or_insert(0.0) += expense.amount.inner();
    }

    let average_transaction = if expenses.is_empty() {
        0.0
    } else {
        total_amount / expenses.len() as f64
    };
    let largest_transaction = expenses
        .iter()
        .map(|e| e.amount.inner())
        .fold(0.0, f64::max);
    let smallest_transaction = expenses
        .iter()
        .map(|e| e.amount.inner())
        .fold(f64::INFINITY, f64::min);
    let smallest_transaction = if smallest_transaction.is_finite() {
        smallest_transaction
    } else {
        0.0
    };

    ExpenseInsights {
        total_amount,
        category_breakdown,
        average_transaction,
        largest_transaction,
        smallest_transaction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::domain::models::Amount;
    use crate::infrastructure::notify::LogOverageNotifier;

    fn service() -> (ExpenseService<InMemoryStore, InMemoryStore>, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let tracker = Arc::new(BudgetTracker::new(
            store.clone(),
            Arc::new(LogOverageNotifier),
        ));
        (
            ExpenseService::new(store.clone(), Categorizer::with_default_rules(), tracker),
            store,
        )
    }

    #[tokio::test]
    async fn test_create_expense_derives_category() {
        let (service, _) = service();
        let expense = service
            .create_expense(
                "u1",
                CreateExpense {
                    title: "Uber ride".to_string(),
                    amount: Amount::new(15.0),
                    category: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(expense.category, "Transportation");
    }

    #[tokio::test]
    async fn test_create_expense_keeps_caller_category() {
        let (service, _) = service();
        let expense = service
            .create_expense(
                "u1",
                CreateExpense {
                    title: "Uber ride".to_string(),
                    amount: Amount::new(15.0),
                    category: Some("Business".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(expense.category, "Business");
    }

    #[tokio::test]
    async fn test_create_expense_rejects_negative_amount() {
        let (service, _) = service();
        let result = service
            .create_expense(
                "u1",
                CreateExpense {
                    title: "refund?".to_string(),
                    amount: Amount::new(-5.0),
                    category: None,
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_insights_math() {
        let (service, _) = service();
        for (title, amount) in [("coffee", 5.0), ("lunch", 15.0), ("uber", 10.0)] {
            service
                .create_expense(
                    "u1",
                    CreateExpense {
                        title: title.to_string(),
                        amount: Amount::new(amount),
                        category: None,
                    },
                )
                .await
                .unwrap();
        }

        let (expenses, insights) = service
            .list_expenses("u1", &ExpenseFilter::default())
            .await
            .unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(insights.total_amount, 30.0);
        assert_eq!(insights.average_transaction, 10.0);
        assert_eq!(insights.largest_transaction, 15.0);
        assert_eq!(insights.smallest_transaction, 5.0);
        assert_eq!(insights.category_breakdown["Food & Dining"], 20.0);
    }

    #[tokio::test]
    async fn test_insights_empty_list() {
        let (service, _) = service();
        let (expenses, insights) = service
            .list_expenses("u1", &ExpenseFilter::default())
            .await
            .unwrap();
        assert!(expenses.is_empty());
        assert_eq!(insights.total_amount, 0.0);
        assert_eq!(insights.average_transaction, 0.0);
        assert_eq!(insights.smallest_transaction, 0.0);
    }

    #[tokio::test]
    async fn test_update_and_delete_expense() {
        let (service, _) = service();
        let expense = service
            .create_expense(
                "u1",
                CreateExpense {
                    title: "lunch".to_string(),
                    amount: Amount::new(12.0),
                    category: None,
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_expense(
                "u1",
                &expense.id,
                UpdateExpense {
                    title: None,
                    amount: Some(Amount::new(14.0)),
                    category: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount.inner(), 14.0);
        assert_eq!(updated.category, "Food & Dining");

        service.delete_expense("u1", &expense.id).await.unwrap();
        assert!(service.delete_expense("u1", &expense.id).await.is_err());
    }
}
