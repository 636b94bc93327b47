//! Error types for StreamPilot domain values
//!
//! Only construction and parsing can fail; once a value exists it is valid.

use thiserror::Error;

/// Result type for StreamPilot type construction
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors raised while parsing or building domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Address is not `0x` followed by 40 hex digits
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Amount text could not be parsed
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// No super token preset with this name
    #[error("Unknown super token preset: {name}")]
    UnknownToken { name: String },
}
