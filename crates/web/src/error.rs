use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    Forbidden,
    NotFound,
    UsernameTaken,
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::TokenMissing => write!(f, "Authentication required"),
            Self::TokenInvalid => write!(f, "Invalid or expired token"),
            Self::InvalidCredentials => write!(f, "Invalid username or password"),
            Self::Forbidden => write!(f, "Permission denied"),
            Self::NotFound => write!(f, "Resource not found"),
            Self::UsernameTaken => write!(f, "Username is already taken"),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::InvalidReference { .. }) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::TokenMissing | Self::TokenInvalid | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code carried in every error body
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(StorageError::NotFound) | Self::NotFound => "NOT_FOUND",
            Self::Storage(StorageError::ConstraintViolation(_)) => "CONFLICT",
            Self::Storage(StorageError::InvalidReference { .. })
            | Self::Validation(_)
            | Self::BadRequest(_) => "VALIDATION_ERROR",
            Self::Storage(_) | Self::InternalServerError(_) => "INTERNAL_ERROR",
            Self::TokenMissing => "TOKEN_MISSING",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "PERMISSION_DENIED",
            Self::UsernameTaken => "USERNAME_TAKEN",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let code = self.code();

        let body = match &self {
            Self::Storage(StorageError::NotFound) | Self::NotFound => {
                json!({ "code": code, "error": "Resource not found" })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({ "code": code, "error": msg })
            }
            Self::Storage(StorageError::InvalidReference { field, message }) => {
                json!({
                    "code": code,
                    "error": "Validation failed",
                    "details": [format!("{}: {}", field, message)]
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({ "code": code, "error": "An internal error occurred" })
            }
            Self::Validation(errors) => {
                json!({
                    "code": code,
                    "error": "Validation failed",
                    "details": field_errors(errors)
                })
            }
            Self::BadRequest(msg) => json!({ "code": code, "error": msg }),
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                json!({ "code": code, "error": "An internal error occurred" })
            }
            other => json!({ "code": code, "error": other.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Flattens nested validation errors into `path: message` strings, e.g.
/// `results[0].position: Position must be 1 or greater`.
fn field_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect_field_errors("", errors, &mut out);
    out.sort();
    out
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| {
                    format!(
                        "{}: {}",
                        path,
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    )
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_storage_errors_map_to_http_status() {
        assert_eq!(
            WebError::from(StorageError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::from(StorageError::ConstraintViolation("dup".into())).status_code(),
            StatusCode::CONFLICT
        );
        let invalid = StorageError::InvalidReference {
            field: "school_id".into(),
            message: "Referenced school does not exist".into(),
        };
        assert_eq!(WebError::from(invalid).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_error_codes() {
        assert_eq!(WebError::TokenMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(WebError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(WebError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(WebError::UsernameTaken.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_field_errors_use_message_or_code() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));
        let mut with_message = ValidationError::new("range");
        with_message.message = Some("Position must be 1 or greater".into());
        errors.add("position", with_message);

        assert_eq!(
            field_errors(&errors),
            vec![
                "name: length".to_string(),
                "position: Position must be 1 or greater".to_string()
            ]
        );
    }
}
