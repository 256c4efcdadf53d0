use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user::{RegisterRequest, UpdateProfileRequest};
use crate::error::{Result, StorageError};
use crate::models::User;

const USER_COLUMNS: &str = "user_id, username, password_hash, role, school_id, language, first_name, last_name, email, created_at";

pub const DEFAULT_LANGUAGE: &str = "en";

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE user_id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Insert a new account. The caller supplies an already hashed password.
    /// A taken username is a `ConstraintViolation`; an unknown school is an
    /// `InvalidReference`.
    pub async fn create(&self, req: &RegisterRequest, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                username, password_hash, role, school_id, language,
                first_name, last_name, email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(req.username.trim())
        .bind(password_hash)
        .bind(req.role)
        .bind(req.school_id)
        .bind(req.language.as_deref().unwrap_or(DEFAULT_LANGUAGE))
        .bind(req.first_name.as_deref().unwrap_or_default())
        .bind(req.last_name.as_deref().unwrap_or_default())
        .bind(&req.email)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(user)
    }

    pub async fn update_profile(
        &self,
        existing: &User,
        req: &UpdateProfileRequest,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET language = $2,
                school_id = $3,
                first_name = $4,
                last_name = $5,
                email = $6
            WHERE user_id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(existing.user_id)
        .bind(req.language.as_ref().unwrap_or(&existing.language))
        .bind(req.school_id.unwrap_or(existing.school_id))
        .bind(req.first_name.as_ref().unwrap_or(&existing.first_name))
        .bind(req.last_name.as_ref().unwrap_or(&existing.last_name))
        .bind(req.email.as_ref().map_or(existing.email.as_ref(), Option::as_ref))
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }
}
