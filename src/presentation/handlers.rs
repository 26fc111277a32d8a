use crate::application::auth_service::AuthService;
use crate::application::budget_service::BudgetService;
use crate::application::currency;
use crate::application::expense_service::ExpenseService;
use crate::application::ledger_service::LedgerService;
use crate::data::memory::InMemoryStore;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::models::{
    CreateBudget, CreateExpense, Expense, ExpenseFilter, ExpenseInsights, UpdateBudget,
    UpdateExpense,
};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the services
pub struct AppState {
    pub expenses: ExpenseService<InMemoryStore, InMemoryStore>,
    pub budgets: BudgetService<InMemoryStore>,
    pub ledger: LedgerService<InMemoryStore>,
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
}

// Uniform error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        let details = match self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Storage(msg)
            | ApiError::Internal(msg) => serde_json::json!({ "message": msg }),
        };

        // Log error based on severity
        match self {
            ApiError::Validation(_) => {
                warn!(error = %error_msg, status = %status, "Validation error")
            }
            ApiError::NotFound(_) => {
                warn!(error = %error_msg, status = %status, "Resource not found")
            }
            ApiError::Unauthorized(_) => {
                warn!(error = %error_msg, status = %status, "Unauthorized")
            }
            ApiError::Storage(_) => {
                error!(error = %error_msg, status = %status, "Storage error")
            }
            ApiError::Internal(_) => {
                error!(error = %error_msg, status = %status, "Internal error")
            }
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_msg,
            details,
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::InvalidAmount) => {
                ApiError::Validation("Amount must be a finite, non-negative number".to_string())
            }
            Some(DomainError::Validation(msg)) => ApiError::Validation(msg.clone()),
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            Some(DomainError::Unauthorized(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Storage(err.to_string()),
        }
    }
}

// AuthenticatedUser extractor
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        Box::pin(async move {
            user.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
        })
    }
}

/// Path user ids must match the token identity; one user cannot read or
/// write another user's documents.
pub(crate) fn ensure_owner(auth: &AuthenticatedUser, user_id: &str) -> Result<(), ApiError> {
    if auth.user_id != user_id {
        return Err(ApiError::Unauthorized(
            "Token does not match requested user".to_string(),
        ));
    }
    Ok(())
}

// Handlers

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

// Expenses

#[derive(Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub insights: ExpenseInsights,
}

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn create_expense(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CreateExpense>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    info!(title = %req.title, "Creating expense");
    let expense = state
        .expenses
        .create_expense(&user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create expense");
            ApiError::from(e)
        })?;
    info!(
        expense_id = %expense.id,
        category = %expense.category,
        "Expense created successfully"
    );
    Ok(HttpResponse::Created().json(expense))
}

#[instrument(skip(state, auth, filter), fields(user_id = %*path))]
pub async fn list_expenses(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    filter: web::Query<ExpenseFilter>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let (expenses, insights) = state
        .expenses
        .list_expenses(&user_id, &filter)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(ExpenseListResponse { expenses, insights }))
}

#[instrument(skip(state, auth, req), fields(user_id, expense_id))]
pub async fn update_expense(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateExpense>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, expense_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let expense = state
        .expenses
        .update_expense(&user_id, &expense_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(expense))
}

#[instrument(skip(state, auth), fields(user_id, expense_id))]
pub async fn delete_expense(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, expense_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    state
        .expenses
        .delete_expense(&user_id, &expense_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

// Budgets

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn create_budget(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CreateBudget>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    info!(category = %req.category, limit = req.limit.inner(), "Creating budget");
    let budget = state
        .budgets
        .create_budget(&user_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created().json(budget))
}

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn budget_overview(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let overview = state
        .budgets
        .overview(&user_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(overview))
}

#[instrument(skip(state, auth, req), fields(user_id, budget_id))]
pub async fn update_budget(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateBudget>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, budget_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let budget = state
        .budgets
        .update_budget(&user_id, &budget_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(budget))
}

#[instrument(skip(state, auth), fields(user_id, budget_id))]
pub async fn delete_budget(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, budget_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    state
        .budgets
        .delete_budget(&user_id, &budget_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

// Insights

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn spending_insights(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let summary = state
        .expenses
        .spending_summary(&user_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(summary))
}

// Currency (stub)

#[derive(Debug, Deserialize)]
pub struct RatesQuery {
    pub base: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[instrument(skip(query))]
pub async fn currency_rates(query: web::Query<RatesQuery>) -> Result<HttpResponse, ApiError> {
    let base = query.base.as_deref().unwrap_or("USD");
    let rates = currency::rates(base).map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(rates))
}

#[instrument(skip(query))]
pub async fn currency_convert(query: web::Query<ConvertQuery>) -> Result<HttpResponse, ApiError> {
    let conversion =
        currency::convert(&query.from, &query.to, query.amount).map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(conversion))
}

// Receipt scanning (stub)

#[derive(Serialize)]
struct ReceiptScanResponse {
    extracted_text: String,
}

#[instrument(skip(auth, body), fields(user_id = %*path, bytes = body.len()))]
pub async fn scan_receipt(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    if body.is_empty() {
        return Err(ApiError::Validation("No file uploaded".to_string()));
    }
    // A production build would hand the image to an OCR service here.
    info!(bytes = body.len(), "Receipt received");
    Ok(HttpResponse::Ok().json(ReceiptScanResponse {
        extracted_text: "Dummy receipt text: Walmart $45.67 on 2025-04-09".to_string(),
    }))
}
