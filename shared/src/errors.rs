//! Error types for the nutrition tracker domain

use thiserror::Error;

/// Domain error raised by pure calculations and boundary validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    /// Shorthand for a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
