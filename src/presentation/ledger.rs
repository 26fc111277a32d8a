use crate::domain::ledger::{
    CreateBill, CreateReward, CreateSavingsGoal, UpdateBill, UpdateReward, UpdateSavingsGoal,
};
use crate::presentation::handlers::{ApiError, AppState, ensure_owner};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::instrument;

// Savings goals

#[instrument(skip(state, auth, req), fields(user_id = %*path))]
pub async fn create_savings_goal(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CreateSavingsGoal>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let goal = state
        .ledger
        .create_goal(&user_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created().json(goal))
}

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn list_savings_goals(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let goals = state
        .ledger
        .list_goals(&user_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(goals))
}

#[instrument(skip(state, auth, req), fields(user_id, goal_id))]
pub async fn update_savings_goal(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateSavingsGoal>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, goal_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let goal = state
        .ledger
        .update_goal(&user_id, &goal_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(goal))
}

#[instrument(skip(state, auth), fields(user_id, goal_id))]
pub async fn delete_savings_goal(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, goal_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    state
        .ledger
        .delete_goal(&user_id, &goal_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

// Bills

#[instrument(skip(state, auth, req), fields(user_id = %*path))]
pub async fn create_bill(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CreateBill>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let bill = state
        .ledger
        .create_bill(&user_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created().json(bill))
}

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn list_bills(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let bills = state
        .ledger
        .list_bills(&user_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(bills))
}

#[instrument(skip(state, auth, req), fields(user_id, bill_id))]
pub async fn update_bill(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateBill>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, bill_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let bill = state
        .ledger
        .update_bill(&user_id, &bill_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(bill))
}

#[instrument(skip(state, auth), fields(user_id, bill_id))]
pub async fn delete_bill(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, bill_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    state
        .ledger
        .delete_bill(&user_id, &bill_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

// Rewards

#[instrument(skip(state, auth, req), fields(user_id = %*path))]
pub async fn create_reward(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CreateReward>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let reward = state
        .ledger
        .create_reward(&user_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created().json(reward))
}

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn list_rewards(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let rewards = state
        .ledger
        .list_rewards(&user_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(rewards))
}

#[instrument(skip(state, auth, req), fields(user_id, reward_id))]
pub async fn update_reward(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateReward>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, reward_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let reward = state
        .ledger
        .update_reward(&user_id, &reward_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(reward))
}

#[instrument(skip(state, auth), fields(user_id, reward_id))]
pub async fn delete_reward(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, reward_id) = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    state
        .ledger
        .delete_reward(&user_id, &reward_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::NoContent().finish())
}
