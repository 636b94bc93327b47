//! Console errors
//!
//! Every variant is recoverable by the user. `Display` is the text the
//! presentation layer shows.

use crate::reject_reason_for;
use streampilot_guard::RejectReason;
use streampilot_ledger::LedgerError;
use streampilot_types::TypesError;
use thiserror::Error;

/// Result type for console operations
pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;

/// Which ledger call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    CheckBalance,
    Approve,
    Upgrade,
    CreateStream,
    CreatePool,
    ListAgents,
    RegisterAgent,
}

impl LedgerAction {
    fn verb(&self) -> &'static str {
        match self {
            Self::CheckBalance => "check balance",
            Self::Approve => "approve token",
            Self::Upgrade => "upgrade",
            Self::CreateStream => "create stream",
            Self::CreatePool => "create pool",
            Self::ListAgents => "list agents",
            Self::RegisterAgent => "register agent",
        }
    }

    fn fallback(&self) -> &'static str {
        match self {
            Self::CreateStream => {
                "Make sure you have sufficient balance and the CFA has token allowance."
            }
            _ => "Please try again.",
        }
    }
}

/// Console error types
#[derive(Debug, Clone, Error)]
pub enum ConsoleError {
    #[error("Please connect your wallet first.")]
    NotConnected,

    #[error("Please enter the {field}.")]
    MissingField { field: &'static str },

    #[error("{0}")]
    InvalidInput(#[from] TypesError),

    #[error("{0}")]
    Rejected(#[from] RejectReason),

    #[error("No agents available to stream to.")]
    NoCounterparties,

    #[error("Failed to {}: {}", .action.verb(), ledger_message(.action, .source))]
    Ledger {
        action: LedgerAction,
        source: LedgerError,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn ledger_message(action: &LedgerAction, source: &LedgerError) -> String {
    match source {
        LedgerError::Failed(failure) => failure.display_message(action.fallback()),
        other => other.to_string(),
    }
}

impl ConsoleError {
    pub(crate) fn ledger(action: LedgerAction) -> impl FnOnce(LedgerError) -> Self {
        move |source| Self::Ledger { action, source }
    }

    /// Rejection reason, whether decided before submitting or decoded from
    /// the ledger's revert
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason.clone()),
            Self::Ledger { source, .. } => source.revert_code().and_then(reject_reason_for),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streampilot_ledger::{LedgerFailure, RevertCode};

    #[test]
    fn test_stream_fallback_message() {
        let err = ConsoleError::Ledger {
            action: LedgerAction::CreateStream,
            source: LedgerFailure::default().into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create stream: Make sure you have sufficient balance and the CFA has token allowance."
        );
    }

    #[test]
    fn test_reason_is_shown() {
        let err = ConsoleError::Ledger {
            action: LedgerAction::Approve,
            source: LedgerFailure::reverted(RevertCode::UserRejected, "user rejected action").into(),
        };
        assert_eq!(err.to_string(), "Failed to approve token: user rejected action");
        assert_eq!(err.reject_reason(), None);
    }

    #[test]
    fn test_revert_classified() {
        let err = ConsoleError::Ledger {
            action: LedgerAction::CreateStream,
            source: LedgerFailure::reverted(RevertCode::FlowAlreadyExists, "exists").into(),
        };
        assert_eq!(err.reject_reason(), Some(RejectReason::FlowAlreadyExists));
    }
}
