use crate::domain::user::{LoginRequest, RegisterUser, UpdateProfile, UserProfile, UserSettings};
use crate::presentation::handlers::{ApiError, AppState, ensure_owner};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};

#[derive(Serialize)]
pub struct AuthResponse {
    pub uid: String,
    pub email: String,
    pub access_token: String,
}

/// Profile as returned over the wire, with the password hash stripped.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub settings: UserSettings,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            settings: user.settings,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %req.email, "Registration request received");

    let (user, token) = state
        .auth_service
        .register_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, "User registered successfully");
    Ok(HttpResponse::Created().json(AuthResponse {
        uid: user.id,
        email: user.email,
        access_token: token,
    }))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %req.email, "Login request received");

    let (user, token) = state
        .auth_service
        .login(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to login");
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, "Login successful");
    Ok(HttpResponse::Ok().json(AuthResponse {
        uid: user.id,
        email: user.email,
        access_token: token,
    }))
}

#[instrument(skip(state, auth), fields(user_id = %*path))]
pub async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let user = state
        .auth_service
        .get_profile(&user_id)
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(user)))
}

#[instrument(skip(state, auth, req), fields(user_id = %*path))]
pub async fn update_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<UpdateProfile>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    let user = state
        .auth_service
        .update_profile(&user_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(user)))
}

#[instrument(skip(state, auth, req), fields(user_id = %*path))]
pub async fn update_settings(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<UserSettings>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ensure_owner(&auth, &user_id)?;
    state
        .auth_service
        .update_settings(&user_id, req.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Settings updated successfully" })))
}
