pub mod auth_service;
pub mod budget_service;
pub mod budget_tracker;
pub mod currency;
pub mod expense_service;
pub mod ledger_service;
