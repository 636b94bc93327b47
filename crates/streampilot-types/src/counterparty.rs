//! Counterparty snapshots
//!
//! A counterparty is an agent that can receive a stream. Its reputation is
//! scored externally; this is an immutable snapshot of what was fetched.

use crate::Address;
use serde::{Deserialize, Serialize};

/// Snapshot of a known agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Receiving address
    pub address: Address,
    /// Reputation score (higher is better)
    pub reputation_score: u64,
    /// Whether the agent currently accepts streams
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Counterparty {
    /// Create an active, unnamed counterparty
    pub fn new(address: Address, reputation_score: u64) -> Self {
        Self {
            address,
            reputation_score,
            is_active: true,
            name: None,
        }
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark as inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Name if present, otherwise the short address
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.address.short())
    }
}
