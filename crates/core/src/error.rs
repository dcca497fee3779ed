//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Storage and transport failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record with the same part number already exists.
    #[error("duplicate part number: {0}")]
    DuplicateKey(String),

    /// No record exists for the given part number.
    #[error("part not found: {0}")]
    NotFound(String),

    /// A quantity would drop below zero.
    #[error("quantity cannot go negative: {0}")]
    NegativeQuantity(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey(key.into())
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub fn negative_quantity(msg: impl Into<String>) -> Self {
        Self::NegativeQuantity(msg.into())
    }
}
