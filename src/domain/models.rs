use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monetary value in the user's preferred currency.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Self {
        Amount(value)
    }

    pub fn inner(&self) -> f64 {
        self.0
    }
}

/// Budget cycle granularity. Only monthly budgets are supported.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: Amount,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExpense {
    pub title: String,
    pub amount: Amount,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateExpense {
    pub title: Option<String>,
    pub amount: Option<Amount>,
    pub category: Option<String>,
}

/// Equality/range filters applied to an expense listing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseInsights {
    pub total_amount: f64,
    pub category_breakdown: std::collections::HashMap<String, f64>,
    pub average_transaction: f64,
    pub largest_transaction: f64,
    pub smallest_transaction: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit: Amount,
    pub period: Period,
    pub spent: Amount,
    /// `YYYY-MM` stamp of the last expense applied; `spent` resets when an
    /// expense lands in a later month.
    pub month: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBudget {
    pub category: String,
    pub limit: Amount,
    pub period: Period,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBudget {
    pub category: Option<String>,
    pub limit: Option<Amount>,
    pub spent: Option<Amount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub budgets: Vec<Budget>,
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub utilization_percentage: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total_spent: f64,
    pub savings_percentage: f64,
    pub recommended_budget_adjustment: String,
}
