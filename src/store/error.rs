//! Route Store Errors

use std::fmt::Display;

/// Errors that can occur in the route store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced entity absent
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A lookup expected exactly one row and got several
    #[error("Expected one {entity} for {key}, found {count}")]
    Ambiguous {
        entity: &'static str,
        key: String,
        count: usize,
    },

    /// Aggregate violates an invariant (date mismatch, dangling reference...)
    #[error("Invalid aggregate: {0}")]
    InvalidAggregate(String),

    /// Connection, query or transaction failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn ambiguous(entity: &'static str, key: impl Display, count: usize) -> Self {
        Self::Ambiguous {
            entity,
            key: key.to_string(),
            count,
        }
    }

    /// Check if this error is a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Check if the store itself could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Database(
                sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
            )
        )
    }
}
