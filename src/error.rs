//! Error types for the library desk

use thiserror::Error;

/// Numeric error codes, printed in brackets before shell error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    BadValue = 18,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::NotFound(_) => ErrorCode::NoSuchItem,
            AppError::Conflict(_) => ErrorCode::Duplicate,
            AppError::Unavailable(_) => ErrorCode::ItemNotAvailable,
            AppError::Database(_) | AppError::Migration(_) => ErrorCode::DbFailure,
            AppError::Io(_) => ErrorCode::Failure,
        }
    }

    /// Text shown to the librarian. Storage failures are logged, not echoed.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Unavailable(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                "Input/output error".to_string()
            }
        }
    }

    /// Map a UNIQUE constraint failure onto `Conflict`, pass everything else through
    pub fn unique_violation(e: sqlx::Error, message: &str) -> Self {
        match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            other => AppError::Database(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(AppError::Validation("x".into()).code(), ErrorCode::BadValue);
        assert_eq!(AppError::NotFound("x".into()).code(), ErrorCode::NoSuchItem);
        assert_eq!(AppError::Conflict("x".into()).code(), ErrorCode::Duplicate);
        assert_eq!(AppError::Unavailable("x".into()).code(), ErrorCode::ItemNotAvailable);
        assert_eq!(ErrorCode::ItemNotAvailable as u32, 7);
    }

    #[test]
    fn test_user_message_hides_storage_details() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.user_message(), "Database error");
        assert_eq!(err.code(), ErrorCode::DbFailure);

        let err = AppError::NotFound("Book with id 4 not found".into());
        assert_eq!(err.user_message(), "Book with id 4 not found");
    }
}
