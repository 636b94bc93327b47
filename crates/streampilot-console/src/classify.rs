//! Mapping of decoded ledger reverts onto rejection reasons

use streampilot_guard::RejectReason;
use streampilot_ledger::RevertCode;

/// Rejection reason equivalent to a decoded revert, if there is one.
///
/// Balance reverts carry no required amount, so they stay ledger errors.
pub fn reject_reason_for(code: RevertCode) -> Option<RejectReason> {
    match code {
        RevertCode::SelfFlow => Some(RejectReason::SelfStream),
        RevertCode::InsufficientAllowance => Some(RejectReason::NoAllowance),
        RevertCode::FlowAlreadyExists => Some(RejectReason::FlowAlreadyExists),
        RevertCode::InsufficientBalance
        | RevertCode::InvalidFlowRate
        | RevertCode::InsufficientUnderlying
        | RevertCode::NotSuperToken
        | RevertCode::UserRejected => None,
    }
}
