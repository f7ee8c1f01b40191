use crate::errors::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid addition: {0}")]
    InvalidAddition(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Missing address")]
    MissingAddress,

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Order persistence failed: {0}")]
    OrderPersistence(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Errors caused by the request itself rather than by a backing store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Repo(RepositoryError::NotFound)
                | ServiceError::Validation(_)
                | ServiceError::NotFound(_)
                | ServiceError::InvalidAddition(_)
                | ServiceError::EmptyCart
                | ServiceError::MissingAddress
                | ServiceError::InvalidAddress
        )
    }
}
