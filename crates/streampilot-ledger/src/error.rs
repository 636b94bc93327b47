//! Ledger errors
//!
//! Reverts are reported as a structured [`LedgerFailure`]. Callers branch on
//! `code`; `reason` and `message` exist only to be shown to a person.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Shown when a revert carries data but no readable text
pub const GENERIC_REVERT_MESSAGE: &str =
    "Transaction reverted. Check token balance and allowance.";

/// Ledger error types
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// A transaction or call was rejected by the ledger
    #[error("{0}")]
    Failed(LedgerFailure),

    /// The address is not a token the ledger knows
    #[error("Unknown token {token}")]
    UnknownToken { token: String },

    /// The ledger could not be reached
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    /// Structured revert code, when the ledger returned one
    pub fn revert_code(&self) -> Option<RevertCode> {
        match self {
            Self::Failed(failure) => failure.code,
            _ => None,
        }
    }
}

impl From<LedgerFailure> for LedgerError {
    fn from(failure: LedgerFailure) -> Self {
        Self::Failed(failure)
    }
}

/// Decoded custom error of a reverted call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevertCode {
    /// Sender and receiver are the same account
    SelfFlow,
    /// The forwarder has no allowance over the sender's tokens
    InsufficientAllowance,
    /// Balance cannot cover the deposit for the flow
    InsufficientBalance,
    /// A flow between the pair is already open
    FlowAlreadyExists,
    /// Flow rate must be positive
    InvalidFlowRate,
    /// Not enough underlying tokens to upgrade
    InsufficientUnderlying,
    /// The token is not a super token
    NotSuperToken,
    /// The signer declined the transaction
    UserRejected,
}

/// A reverted or rejected transaction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerFailure {
    /// Decoded custom error, if the revert could be decoded
    pub code: Option<RevertCode>,
    /// Human-readable revert reason
    pub reason: Option<String>,
    /// Raw revert data, hex-encoded
    pub revert_data: Option<String>,
    /// Transport-level message
    pub message: Option<String>,
}

impl LedgerFailure {
    /// A decoded revert with a readable reason
    pub fn reverted(code: RevertCode, reason: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            reason: Some(reason.into()),
            ..Default::default()
        }
    }

    /// A failure with only a transport message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_revert_data(mut self, data: impl Into<String>) -> Self {
        self.revert_data = Some(data.into());
        self
    }

    /// Text to show for this failure.
    ///
    /// Prefers the revert reason, then the transport message. Revert data
    /// without text gets a generic hint; anything else gets `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        if self.revert_data.is_some() {
            return self
                .reason
                .clone()
                .or_else(|| self.message.clone())
                .unwrap_or_else(|| GENERIC_REVERT_MESSAGE.to_string());
        }
        self.reason
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for LedgerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_message("Transaction failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_reason() {
        let f = LedgerFailure::reverted(RevertCode::FlowAlreadyExists, "CFA: flow already exist")
            .with_revert_data("0x801b6863");
        assert_eq!(f.display_message("fallback"), "CFA: flow already exist");
    }

    #[test]
    fn test_revert_data_without_text() {
        let f = LedgerFailure::default().with_revert_data("0xdeadbeef");
        assert_eq!(f.display_message("fallback"), GENERIC_REVERT_MESSAGE);
    }

    #[test]
    fn test_fallback_when_empty() {
        assert_eq!(LedgerFailure::default().display_message("try again"), "try again");
        assert_eq!(LedgerFailure::message("timeout").display_message("x"), "timeout");
    }

    #[test]
    fn test_revert_code_accessor() {
        let err: LedgerError = LedgerFailure::reverted(RevertCode::SelfFlow, "self").into();
        assert_eq!(err.revert_code(), Some(RevertCode::SelfFlow));
        assert_eq!(LedgerError::Unavailable("down".into()).revert_code(), None);
    }
}
