//! Domain error types
//!
//! This module defines error types specific to domain operations
//! (identifier and value validation) and the error type shared by every
//! implementation of the store port.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Identifier is empty or malformed
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Sheet row index outside the data area
    #[error("Invalid row index: {0}")]
    InvalidRowIndex(String),

    /// Unknown backstage check-in status
    #[error("Invalid check-in status: {0}")]
    InvalidCheckInStatus(String),

    /// Unknown costume size label
    #[error("Invalid size label: {0}")]
    InvalidSize(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors reported by a recital store
///
/// Every write on the store port returns [`crate::ports::WriteOutcome`],
/// whose error side is this type. Callers decide whether to keep or revert
/// their local state based on it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing store refused the request
    #[error("store rejected the request: {0}")]
    Rejected(String),

    /// The requested sheet, row or record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The session has no write access
    #[error("store session is read-only")]
    ReadOnly,

    /// Any other adapter-specific failure
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
