//! Container Registry Errors

use crate::domain::ContainerId;
use crate::store::StoreError;

/// Errors that can occur in the container registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No live state for this container
    #[error("Container not found: {0}")]
    ContainerNotFound(ContainerId),

    /// Loading the catalog or writing computed routes failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The route computer task panicked or was cancelled
    #[error("Route computation aborted: {0}")]
    ComputationAborted(String),
}
