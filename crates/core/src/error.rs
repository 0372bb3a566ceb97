//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Storage
/// concerns belong elsewhere.
///
/// The carried message is part of the observable contract: the HTTP layer
/// returns it verbatim, so callers should build these from the message
/// constants exported by the domain crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input, a missing required field, or a disallowed transition.
    #[error("{0}")]
    Validation(String),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Human-readable message, exactly as it should reach the client.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) | DomainError::NotFound(msg) => msg,
        }
    }
}
