//! Transaction receipts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use streampilot_types::Address;

/// What a confirmed transaction did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxOperation {
    Approve,
    Upgrade,
    CreateFlow,
    CreatePool,
}

/// A confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// 32-byte transaction hash, `0x`-prefixed hex
    pub tx_hash: String,
    pub operation: TxOperation,
    pub confirmed_at: DateTime<Utc>,
}

/// Receipt of a pool creation, with the new pool's address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCreated {
    pub receipt: TxReceipt,
    pub pool: Address,
}
