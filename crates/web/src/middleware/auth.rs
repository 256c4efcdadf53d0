use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use storage::models::UserRole;
use uuid::Uuid;

use crate::auth::jwt::{Claims, JwtKeys, TokenType};
use crate::error::WebError;

/// Caller identity taken from a verified access token.
///
/// Inserted into request extensions by [`require_auth`]; handlers take it as
/// an extractor argument.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), WebError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.user_id, role = ?self.role, "Permission denied");
            Err(WebError::Forbidden)
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(WebError::TokenMissing)
    }
}

/// Rejects requests without a valid bearer access token.
pub async fn require_auth(
    State(jwt): State<Arc<JwtKeys>>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(req.headers())?;

    let claims = jwt.verify(token, TokenType::Access).inspect_err(|_| {
        tracing::warn!("Invalid access token attempt");
    })?;

    req.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, WebError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebError::TokenMissing)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(WebError::TokenInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Err(WebError::TokenMissing)));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(bearer_token(&headers), Err(WebError::TokenInvalid)));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_require_role() {
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            username: "viewer".into(),
            role: UserRole::Viewer,
        };
        assert!(user.require_role(&[UserRole::Admin]).is_err());
        assert!(user.require_role(&[UserRole::Admin, UserRole::Viewer]).is_ok());
    }
}
