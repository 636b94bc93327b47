//! Stream admission
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. sender and receiver differ
//! 2. the forwarder has an allowance
//! 3. the sender has a balance
//! 4. no stream is already open between the pair
//! 5. the balance covers one hour of the requested rate

use serde::{Deserialize, Serialize};
use streampilot_types::{StreamIntent, TokenAmount};
use thiserror::Error;

/// Seconds of runway a new stream must be able to pay for up front
pub const BUFFER_SECONDS: u64 = 3600;

/// Why a stream may not be attempted
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("Cannot stream to yourself: sender and receiver are the same address")]
    SelfStream,

    #[error("No allowance: approve the flow forwarder to move your tokens first")]
    NoAllowance,

    #[error("No balance: the sender holds none of this token")]
    NoBalance,

    #[error("A stream between this sender and receiver already exists")]
    FlowAlreadyExists,

    #[error("Insufficient balance for the one-hour buffer: need at least {} tokens", .required.format_ether())]
    InsufficientBuffer { required: TokenAmount },
}

impl RejectReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::SelfStream => "self_stream",
            Self::NoAllowance => "no_allowance",
            Self::NoBalance => "no_balance",
            Self::FlowAlreadyExists => "flow_already_exists",
            Self::InsufficientBuffer { .. } => "insufficient_buffer",
        }
    }
}

/// Outcome of evaluating a [`StreamIntent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdmissionResult {
    Admit,
    Reject(RejectReason),
}

impl AdmissionResult {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit)
    }

    /// The rejection reason, if any
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Admit => None,
            Self::Reject(reason) => Some(reason),
        }
    }

    /// Convert into a `Result` for `?`-style callers
    pub fn into_result(self) -> Result<(), RejectReason> {
        match self {
            Self::Admit => Ok(()),
            Self::Reject(reason) => Err(reason),
        }
    }
}

/// Balance needed to fund `flow_rate` for [`BUFFER_SECONDS`]
pub fn required_buffer(flow_rate: &TokenAmount) -> TokenAmount {
    flow_rate.scaled(BUFFER_SECONDS)
}

/// Decide whether `intent` may be submitted.
///
/// Never fails and never panics. Address equality is on the normalized
/// lower-case form carried by `Address`.
pub fn evaluate(intent: &StreamIntent) -> AdmissionResult {
    if intent.sender == intent.receiver {
        return AdmissionResult::Reject(RejectReason::SelfStream);
    }

    if intent.sender_allowance.is_zero() {
        return AdmissionResult::Reject(RejectReason::NoAllowance);
    }

    if intent.sender_balance.is_zero() {
        return AdmissionResult::Reject(RejectReason::NoBalance);
    }

    if !intent.existing_flow_rate.is_zero() {
        return AdmissionResult::Reject(RejectReason::FlowAlreadyExists);
    }

    let required = required_buffer(&intent.flow_rate_per_second);
    if intent.sender_balance < required {
        return AdmissionResult::Reject(RejectReason::InsufficientBuffer { required });
    }

    AdmissionResult::Admit
}

#[cfg(test)]
mod tests {
    use super::*;
    use streampilot_types::Address;

    const SENDER: &str = "0xAbCdEf0000000000000000000000000000000001";
    const RECEIVER: &str = "0x2222222222222222222222222222222222222222";

    fn intent(flow_rate: u64) -> StreamIntent {
        StreamIntent::new(
            Address::parse(SENDER).unwrap(),
            Address::parse(RECEIVER).unwrap(),
            TokenAmount::from(flow_rate),
        )
    }

    #[test]
    fn test_self_stream_case_insensitive() {
        let i = StreamIntent::new(
            Address::parse(SENDER).unwrap(),
            Address::parse(&SENDER.to_lowercase()).unwrap(),
            TokenAmount::from(1u64),
        )
        .with_allowance(100u64)
        .with_balance(1_000_000u64);
        assert_eq!(evaluate(&i), AdmissionResult::Reject(RejectReason::SelfStream));

        // Wins over every other failure
        let empty = StreamIntent::new(
            Address::parse(SENDER).unwrap(),
            Address::parse(SENDER).unwrap(),
            TokenAmount::from(1u64),
        )
        .with_existing_flow(9u64);
        assert_eq!(evaluate(&empty), AdmissionResult::Reject(RejectReason::SelfStream));
    }

    #[test]
    fn test_no_allowance_before_buffer() {
        let i = intent(1).with_allowance(0u64).with_balance(500u64);
        assert_eq!(evaluate(&i), AdmissionResult::Reject(RejectReason::NoAllowance));
    }

    #[test]
    fn test_no_balance() {
        let i = intent(1).with_allowance(100u64).with_balance(0u64);
        assert_eq!(evaluate(&i), AdmissionResult::Reject(RejectReason::NoBalance));
    }

    #[test]
    fn test_flow_already_exists() {
        let i = intent(1)
            .with_allowance(100u64)
            .with_balance(1000u64)
            .with_existing_flow(5u64);
        assert_eq!(
            evaluate(&i),
            AdmissionResult::Reject(RejectReason::FlowAlreadyExists)
        );
    }

    #[test]
    fn test_insufficient_buffer() {
        let i = intent(1).with_allowance(100u64).with_balance(3000u64);
        let result = evaluate(&i);
        assert_eq!(
            result,
            AdmissionResult::Reject(RejectReason::InsufficientBuffer {
                required: TokenAmount::from(3600u64)
            })
        );
        let message = result.reason().unwrap().to_string();
        assert!(message.contains("0.0000000000000036"), "{}", message);
    }

    #[test]
    fn test_admit() {
        let i = intent(1).with_allowance(100u64).with_balance(10_000u64);
        assert!(evaluate(&i).is_admitted());
    }

    #[test]
    fn test_buffer_boundary_is_inclusive() {
        let i = intent(2).with_allowance(1u64).with_balance(7200u64);
        assert_eq!(evaluate(&i), AdmissionResult::Admit);
        let i = intent(2).with_allowance(1u64).with_balance(7199u64);
        assert_eq!(evaluate(&i).reason().map(|r| r.code()), Some("insufficient_buffer"));
    }

    #[test]
    fn test_huge_flow_rate_does_not_overflow() {
        let rate = TokenAmount::max_uint256();
        let i = StreamIntent::new(
            Address::parse(SENDER).unwrap(),
            Address::parse(RECEIVER).unwrap(),
            rate.clone(),
        )
        .with_allowance(TokenAmount::max_uint256())
        .with_balance(TokenAmount::max_uint256());
        assert_eq!(
            evaluate(&i),
            AdmissionResult::Reject(RejectReason::InsufficientBuffer {
                required: rate.scaled(3600)
            })
        );
    }

    #[test]
    fn test_idempotent() {
        let i = intent(1).with_allowance(100u64).with_balance(3000u64);
        assert_eq!(evaluate(&i), evaluate(&i));
    }

    #[test]
    fn test_into_result_and_serde() {
        assert!(AdmissionResult::Admit.into_result().is_ok());
        let rejected = AdmissionResult::Reject(RejectReason::NoBalance);
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["outcome"], "reject");
        assert_eq!(json["reason"], "no_balance");
        assert_eq!(rejected.into_result(), Err(RejectReason::NoBalance));
    }
}
