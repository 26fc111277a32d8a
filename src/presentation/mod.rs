pub mod auth;
pub mod handlers;
pub mod ledger;
pub mod middleware;
