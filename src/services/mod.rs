use thiserror::Error;

use crate::repository::RepositoryError;

pub mod prices;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No applicable record exists. This is an expected outcome, not a system
    /// failure; the HTTP layer turns it into a 404.
    #[error("no price found")]
    NotFound,
    /// An uploaded or submitted payload failed validation.
    #[error("invalid payload: {0}")]
    Form(String),
    /// The persistence collaborator failed; propagated unchanged.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
