use thiserror::Error;

use crate::domain::types::ClientId;
use crate::repository::errors::RepositoryError;

/// Errors surfaced to callers of the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No client matched the requested operation.
    #[error("{0}")]
    NotFound(String),

    /// Any repository failure other than an empty result, unchanged.
    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn client_not_found(id: ClientId) -> Self {
        ServiceError::NotFound(format!("Id not found {id}"))
    }

    /// Translates a repository failure raised while operating on client `id`.
    pub fn for_client(id: ClientId) -> impl FnOnce(RepositoryError) -> ServiceError {
        move |err| match err {
            RepositoryError::EmptyResult => ServiceError::client_not_found(id),
            other => ServiceError::Repository(other),
        }
    }
}

/// [`RepositoryError::EmptyResult`] always becomes [`ServiceError::NotFound`];
/// every other repository failure is wrapped unchanged.
impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::EmptyResult => ServiceError::NotFound("Entity not found".to_string()),
            other => ServiceError::Repository(other),
        }
    }
}
