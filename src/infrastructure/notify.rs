use crate::domain::notifier::{OverageEvent, OverageNotifier};
use tracing::warn;

/// Overage notifier backed by the tracing pipeline. A production deployment
/// would swap in a push/email integration behind the same trait.
pub struct LogOverageNotifier;

impl OverageNotifier for LogOverageNotifier {
    fn budget_exceeded(&self, event: OverageEvent) {
        warn!(
            user_id = %event.user_id,
            category = %event.category,
            limit = event.limit,
            spent = event.spent,
            "Budget exceeded"
        );
    }
}
