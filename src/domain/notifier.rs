use serde::Serialize;

/// Emitted when an applied expense pushes a budget past its limit.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OverageEvent {
    pub user_id: String,
    pub category: String,
    pub limit: f64,
    pub spent: f64,
}

/// Delivery hook for overage signals. The signal is advisory: it never
/// blocks or rejects the expense that triggered it.
pub trait OverageNotifier: Send + Sync {
    fn budget_exceeded(&self, event: OverageEvent);
}
