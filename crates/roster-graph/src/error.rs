//! Error types for roster operations

use thiserror::Error;

/// Result type alias for roster operations
pub type RosterResult<T> = std::result::Result<T, RosterError>;

/// Errors that can occur while reading or mutating a roster
///
/// Every error is reported to the caller of the operation that detected it;
/// nothing is retried and a failed mutation leaves the roster unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A referenced employee or edge does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness or reference constraint would be violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Arguments are malformed (self-reference, inverted time window)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No more employee ids can be allocated
    #[error("Employee id space exhausted")]
    Exhausted,

    /// The edge indices disagree with the edge map
    #[error("Index inconsistency: {0}")]
    Inconsistent(String),

    /// A snapshot handed to restore violates an invariant
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl RosterError {
    /// Whether this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::NotFound(_))
    }

    /// Whether this is a `Conflict` error
    pub fn is_conflict(&self) -> bool {
        matches!(self, RosterError::Conflict(_))
    }

    /// Whether this is an `InvalidArgument` error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RosterError::InvalidArgument(_))
    }
}
