//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Errors raised when building domain values from raw inputs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A container reading that cannot describe a physical container
    #[error("Invalid reading: {0}")]
    InvalidReading(String),

    /// Readiness threshold outside (0, 1]
    #[error("Invalid readiness threshold: {0}")]
    InvalidThreshold(f64),
}

impl DomainError {
    pub fn invalid_reading(reason: impl Into<String>) -> Self {
        Self::InvalidReading(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reading_message() {
        let err = DomainError::invalid_reading("volumemax must be positive");
        assert_eq!(err.to_string(), "Invalid reading: volumemax must be positive");
    }

    #[test]
    fn test_invalid_threshold_message() {
        let err = DomainError::InvalidThreshold(1.5);
        assert!(err.to_string().contains("1.5"));
    }
}
