use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use storage::{
    Database,
    dto::user::{
        LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest,
        UpdateProfileRequest, UserResponse,
    },
};
use tracing::instrument;
use validator::Validate;

use crate::auth::jwt::JwtKeys;
use crate::error::WebError;
use crate::extractors::json::AppJson;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error or unknown school"),
        (status = 409, description = "Username already taken")
    ),
    tag = "auth"
)]
#[instrument(skip(db, req), fields(username = %req.username))]
pub async fn register(
    State(db): State<Database>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, WebError> {
    req.validate()?;

    let user = services::register(db.pool(), &req).await?;
    tracing::info!(user_id = %user.user_id, role = ?user.role, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access and refresh tokens issued", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
#[instrument(skip(db, jwt, req), fields(username = %req.username))]
pub async fn login(
    State(db): State<Database>,
    State(jwt): State<Arc<JwtKeys>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, WebError> {
    req.validate()?;

    let (user, tokens) = services::login(db.pool(), &jwt, &req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        access: tokens.access,
        refresh: tokens.refresh,
        user: UserResponse::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token issued", body = RefreshResponse),
        (status = 401, description = "Refresh token invalid or expired")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(db): State<Database>,
    State(jwt): State<Arc<JwtKeys>>,
    AppJson(req): AppJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, WebError> {
    req.validate()?;

    let access = services::refresh(db.pool(), &jwt, &req.refresh).await?;

    Ok(Json(RefreshResponse { access }))
}

#[utoipa::path(
    get,
    path = "/api/profile/",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's account", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn get_profile(
    State(db): State<Database>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, WebError> {
    let user = services::current_user(db.pool(), auth.user_id).await?;

    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/profile/",
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error or unknown school"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
#[instrument(skip(db, req), fields(user_id = %auth.user_id))]
pub async fn update_profile(
    State(db): State<Database>,
    auth: AuthUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, WebError> {
    req.validate()?;

    let user = services::update_profile(db.pool(), auth.user_id, &req).await?;

    Ok(Json(UserResponse::from(user)))
}
