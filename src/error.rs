//! Error handling module
//!
//! Application-wide error taxonomy. Layer errors (store, registry, protocol)
//! convert into it; the dispatcher turns every variant into an `ERROR`
//! response and logs the cause.

use crate::protocol::ProtocolError;
use crate::registry::RegistryError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced entity absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Connection or transaction failure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    /// Missing/invalid fields or unknown request type
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Declared but inactive operation
    #[error("Unimplemented: {0}")]
    Unimplemented(&'static str),

    /// Stored data violating an aggregate invariant
    #[error("Inconsistent data: {0}")]
    Inconsistent(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::MalformedRequest(_) => "malformed_request",
            AppError::Unimplemented(_) => "unimplemented",
            AppError::Inconsistent(_) => "inconsistent_data",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Check if the client is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::MalformedRequest(_) | AppError::Unimplemented(_)
        )
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::NotFound(err.to_string()),
            StoreError::Ambiguous { .. } | StoreError::InvalidAggregate(_) => {
                AppError::Inconsistent(err.to_string())
            }
            StoreError::Database(e) => AppError::StoreUnavailable(e),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ContainerNotFound(_) => AppError::NotFound(err.to_string()),
            RegistryError::Store(e) => e.into(),
            RegistryError::ComputationAborted(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ProtocolError> for AppError {
    fn from(err: ProtocolError) -> Self {
        AppError::MalformedRequest(err.to_string())
    }
}
