//! Stream intents
//!
//! A `StreamIntent` is built fresh for each attempt to open a stream, from
//! the state the ledger reported just before the attempt. It is never stored.

use crate::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

/// Everything needed to decide whether a stream may be attempted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamIntent {
    /// Account paying the stream
    pub sender: Address,
    /// Account receiving the stream
    pub receiver: Address,
    /// Requested rate in smallest units per second
    pub flow_rate_per_second: TokenAmount,
    /// Sender's token balance
    pub sender_balance: TokenAmount,
    /// Allowance the sender granted the flow forwarder
    pub sender_allowance: TokenAmount,
    /// Rate of any stream already open between sender and receiver
    pub existing_flow_rate: TokenAmount,
}

impl StreamIntent {
    /// Start an intent with zeroed ledger state
    pub fn new(sender: Address, receiver: Address, flow_rate_per_second: TokenAmount) -> Self {
        Self {
            sender,
            receiver,
            flow_rate_per_second,
            sender_balance: TokenAmount::zero(),
            sender_allowance: TokenAmount::zero(),
            existing_flow_rate: TokenAmount::zero(),
        }
    }

    pub fn with_balance(mut self, balance: impl Into<TokenAmount>) -> Self {
        self.sender_balance = balance.into();
        self
    }

    pub fn with_allowance(mut self, allowance: impl Into<TokenAmount>) -> Self {
        self.sender_allowance = allowance.into();
        self
    }

    pub fn with_existing_flow(mut self, rate: impl Into<TokenAmount>) -> Self {
        self.existing_flow_rate = rate.into();
        self
    }
}

/// Configuration for a distribution pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Whether unit owners may transfer their units
    pub transferability_for_units_owner: bool,
    /// Whether any address may distribute through the pool
    pub distribution_from_any_address: bool,
}
