//! Session Context
//!
//! Identifies the client session a request belongs to, for log correlation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context of one client session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Sequential number of the client, as shown in logs
    pub client_number: u64,

    /// Correlation ID for request tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

impl SessionContext {
    pub fn new(client_number: u64) -> Self {
        Self {
            client_number,
            correlation_id: None,
        }
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Generate a new correlation ID if not present
    pub fn ensure_correlation_id(&mut self) -> Uuid {
        *self.correlation_id.get_or_insert_with(Uuid::new_v4)
    }
}
