use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Tables in prefix-match order: longer names that share a suffix come first.
const TABLES: &[&str] = &[
    "event_participants",
    "notifications",
    "participants",
    "schools",
    "events",
    "users",
];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A write referenced a row that does not exist, or is not allowed in
    /// this context (e.g. a result for a participant outside the roster).
    #[error("Invalid reference in {field}: {message}")]
    InvalidReference { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some(UNIQUE_VIOLATION)
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
        )
    }

    /// Name of the violated constraint, if the database reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => e.constraint(),
            _ => None,
        }
    }

    pub(crate) fn invalid_reference(field: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::InvalidReference {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classifies an error raised by an INSERT/UPDATE: foreign key failures
    /// become `InvalidReference` on the offending column, unique failures
    /// become `ConstraintViolation`.
    pub(crate) fn from_write(error: sqlx::Error) -> Self {
        let err = StorageError::from(error);

        if err.is_foreign_key_violation() {
            let field = err
                .constraint()
                .and_then(foreign_key_column)
                .unwrap_or("reference")
                .to_string();
            let message = format!("Referenced {} does not exist", field.trim_end_matches("_id"));
            return StorageError::invalid_reference(field, message);
        }

        if err.is_unique_violation() {
            let message = match err.constraint() {
                Some("users_username_key") => "Username already exists",
                Some("event_participants_event_participant_key") => {
                    "Participant is already registered for this event"
                }
                _ => "Duplicate value",
            };
            return StorageError::ConstraintViolation(message.to_string());
        }

        err
    }
}

/// Maps a PostgreSQL default foreign key name (`<table>_<column>_fkey`) to
/// its column.
fn foreign_key_column(constraint: &str) -> Option<&str> {
    let rest = constraint.strip_suffix("_fkey")?;
    TABLES
        .iter()
        .find_map(|table| rest.strip_prefix(table)?.strip_prefix('_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_a_constraint_error() {
        let err = StorageError::NotFound;
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(err.constraint().is_none());
    }

    #[test]
    fn test_invalid_reference_display() {
        let err = StorageError::invalid_reference("school_id", "School does not exist");
        assert_eq!(
            err.to_string(),
            "Invalid reference in school_id: School does not exist"
        );
    }

    #[test]
    fn test_foreign_key_column() {
        assert_eq!(
            foreign_key_column("participants_school_id_fkey"),
            Some("school_id")
        );
        assert_eq!(
            foreign_key_column("event_participants_participant_id_fkey"),
            Some("participant_id")
        );
        assert_eq!(
            foreign_key_column("notifications_related_event_id_fkey"),
            Some("related_event_id")
        );
        assert_eq!(foreign_key_column("users_username_key"), None);
    }

    #[test]
    fn test_row_not_found_is_not_a_unique_violation() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
    }
}
