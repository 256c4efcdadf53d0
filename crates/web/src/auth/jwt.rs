use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use storage::models::{User, UserRole};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims shared by access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: UserRole,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// Signing keys and lifetimes for HS256 tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl JwtKeys {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue_pair(&self, user: &User) -> WebResult<TokenPair> {
        Ok(TokenPair {
            access: self.sign(user.user_id, &user.username, user.role, TokenType::Access)?,
            refresh: self.sign(user.user_id, &user.username, user.role, TokenType::Refresh)?,
        })
    }

    pub fn issue_access(&self, user: &User) -> WebResult<String> {
        self.sign(user.user_id, &user.username, user.role, TokenType::Access)
    }

    pub fn sign(
        &self,
        user_id: Uuid,
        username: &str,
        role: UserRole,
        token_type: TokenType,
    ) -> WebResult<String> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            username: username.to_owned(),
            role,
            token_type,
            iat: now,
            exp: now + ttl.as_secs() as i64,
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| WebError::InternalServerError(format!("JWT sign error: {}", e)))
    }

    /// Decode a token and check it is of the expected kind. Signature,
    /// expiry and type failures all surface as `TokenInvalid`.
    pub fn verify(&self, token: &str, expected: TokenType) -> WebResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                WebError::TokenInvalid
            })?
            .claims;

        if claims.token_type != expected {
            tracing::debug!(
                "Rejected token: expected {:?}, got {:?}",
                expected,
                claims.token_type
            );
            return Err(WebError::TokenInvalid);
        }

        Ok(claims)
    }
}
