use thiserror::Error;

/// Failures raised below the HTTP layer. The presentation layer downcasts
/// these out of `anyhow::Error` to pick a response status.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Amount must be a finite, non-negative number")]
    InvalidAmount,
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("No such document: {0}")]
    NotFound(String),
    #[error("Access denied: {0}")]
    Unauthorized(String),
    #[error("Internal failure: {0}")]
    Internal(String),
}
