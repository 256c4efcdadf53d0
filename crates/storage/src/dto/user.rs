use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{User, UserRole};

/// Request payload for creating an account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Username must be between 1 and 150 characters"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,

    #[serde(default)]
    pub role: UserRole,

    pub school_id: Option<Uuid>,

    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh: String,
}

/// Self-service profile update. Role and username are not editable here.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "super::common::double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub school_id: Option<Option<Uuid>>,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    #[validate(email)]
    #[serde(default, deserialize_with = "super::common::double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub school_id: Option<Uuid>,
    pub language: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    let is_valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_username"))
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
            school_id: user.school_id,
            language: user.language,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(body: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_role_defaults_to_viewer() {
        let req = register(serde_json::json!({
            "username": "coach.smith",
            "password": "correct horse"
        }));
        assert_eq!(req.role, UserRole::Viewer);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_role_is_rejected_at_deserialization() {
        let result = serde_json::from_value::<RegisterRequest>(serde_json::json!({
            "username": "alice",
            "password": "correct horse",
            "role": "superuser"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_username_charset() {
        let req = register(serde_json::json!({
            "username": "no spaces!",
            "password": "correct horse"
        }));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_short_password() {
        let req = register(serde_json::json!({
            "username": "alice",
            "password": "short"
        }));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_profile_email_must_be_valid() {
        let req = UpdateProfileRequest {
            email: Some(Some("not-an-email".to_string())),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_profile_null_clears_absent_keeps() {
        let req: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "school_id": null, "language": "fr" })).unwrap();
        assert_eq!(req.school_id, Some(None));
        assert_eq!(req.email, None);
        assert!(req.validate().is_ok());
    }
}
