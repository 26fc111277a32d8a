pub mod categorizer;
pub mod error;
pub mod ledger;
pub mod models;
pub mod notifier;
pub mod repository;
pub mod user;
