use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Failures reported by repository implementations.
///
/// `EmptyResult` is the storage layer's own "no such row" signal. It never
/// reaches callers of the service layer, which translates it into
/// [`crate::services::ServiceError::NotFound`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Empty result: no entity matched the requested id")]
    EmptyResult,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn constraint_violation(kind: &DatabaseErrorKind, message: &str) -> Option<RepositoryError> {
    let constraint = match kind {
        DatabaseErrorKind::UniqueViolation => "Unique",
        DatabaseErrorKind::ForeignKeyViolation => "Foreign key",
        DatabaseErrorKind::NotNullViolation => "Not null",
        DatabaseErrorKind::CheckViolation => "Check",
        _ => return None,
    };
    Some(RepositoryError::ConstraintViolation(format!(
        "{constraint} constraint violation: {message}"
    )))
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::EmptyResult,

            DieselError::DatabaseError(kind, info) => {
                let message = info.message();
                constraint_violation(&kind, message)
                    .unwrap_or_else(|| RepositoryError::DatabaseError(message.to_string()))
            }

            DieselError::InvalidCString(_) => {
                RepositoryError::ValidationError("Invalid C string".to_string())
            }

            DieselError::SerializationError(e)
            | DieselError::DeserializationError(e)
            | DieselError::QueryBuilderError(e) => RepositoryError::ValidationError(e.to_string()),

            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction error: {err}"))
            }

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
