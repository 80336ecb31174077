//! Error conversion glue between value-object constraints and the
//! repository error type.
//!
//! The domain layer must not depend on repository errors, so the conversion
//! lives here instead of next to [`TypeConstraintError`].

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
