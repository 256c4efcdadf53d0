use sqlx::PgPool;
use storage::{
    dto::user::{RegisterRequest, UpdateProfileRequest},
    error::StorageError,
    models::User,
    repository::user::UserRepository,
};
use uuid::Uuid;

use crate::auth::jwt::{JwtKeys, TokenPair, TokenType};
use crate::auth::password;
use crate::error::{WebError, WebResult};

/// Create an account with a freshly hashed password
pub async fn register(pool: &PgPool, req: &RegisterRequest) -> WebResult<User> {
    let password = req.password.clone();
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| WebError::InternalServerError(format!("Password hash task failed: {}", e)))?
        .map_err(|e| WebError::InternalServerError(format!("Password hash error: {}", e)))?;

    let repo = UserRepository::new(pool);
    repo.create(req, &hash).await.map_err(|e| match e {
        StorageError::ConstraintViolation(_) => {
            tracing::debug!("Registration rejected: username taken");
            WebError::UsernameTaken
        }
        other => WebError::from(other),
    })
}

/// Check credentials and issue an access/refresh pair
pub async fn login(
    pool: &PgPool,
    jwt: &JwtKeys,
    username: &str,
    password: &str,
) -> WebResult<(User, TokenPair)> {
    let repo = UserRepository::new(pool);
    let user = match repo.find_by_username(username.trim()).await {
        Ok(user) => user,
        Err(StorageError::NotFound) => {
            let candidate = password.to_owned();
            tokio::task::spawn_blocking(move || password::verify_dummy(&candidate))
                .await
                .map_err(|e| {
                    WebError::InternalServerError(format!("Password verify task failed: {}", e))
                })?;
            tracing::warn!("Failed login attempt for unknown user");
            return Err(WebError::InvalidCredentials);
        }
        Err(e) => return Err(e.into()),
    };

    let candidate = password.to_owned();
    let stored = user.password_hash.clone();
    let is_valid =
        tokio::task::spawn_blocking(move || password::verify_password(&candidate, &stored))
            .await
            .map_err(|e| {
                WebError::InternalServerError(format!("Password verify task failed: {}", e))
            })?
            .map_err(|e| WebError::InternalServerError(format!("Password verify error: {}", e)))?;

    if !is_valid {
        tracing::warn!(username = %user.username, "Failed login attempt");
        return Err(WebError::InvalidCredentials);
    }

    let tokens = jwt.issue_pair(&user)?;
    Ok((user, tokens))
}

/// Exchange a refresh token for a new access token. The account is reloaded
/// so deleted users cannot refresh and role changes take effect.
pub async fn refresh(pool: &PgPool, jwt: &JwtKeys, refresh_token: &str) -> WebResult<String> {
    let claims = jwt.verify(refresh_token, TokenType::Refresh)?;

    let user = current_user(pool, claims.sub).await?;

    jwt.issue_access(&user)
}

/// Load the caller's own record. A token for a vanished account is invalid.
pub async fn current_user(pool: &PgPool, user_id: Uuid) -> WebResult<User> {
    let repo = UserRepository::new(pool);
    repo.find_by_id(user_id).await.map_err(|e| match e {
        StorageError::NotFound => WebError::TokenInvalid,
        other => WebError::from(other),
    })
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    req: &UpdateProfileRequest,
) -> WebResult<User> {
    let existing = current_user(pool, user_id).await?;
    let repo = UserRepository::new(pool);
    Ok(repo.update_profile(&existing, req).await?)
}
