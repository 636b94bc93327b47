//! Super token presets and forwarder contracts (Base Sepolia)

use crate::{Address, Result, TypesError};
use serde::{Deserialize, Serialize};

/// Constant-flow forwarder: creates and updates per-second streams
pub const CFA_V1_FORWARDER: &str = "0xcfA132E353cB4E398080B9700609bb008eceB125";

/// General-distribution forwarder: creates distribution pools
pub const GDA_V1_FORWARDER: &str = "0x6DA13Bde224A05a288748d857b9e7DDEffd1dE08";

/// A known super token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperToken {
    /// Ticker shown in quick-select
    pub name: String,
    /// Token contract
    pub address: Address,
}

/// Tokens offered for quick selection
pub fn common_super_tokens() -> Vec<SuperToken> {
    [
        ("fDAIx", "0x5d8b4c745004d192d3c0d8ef365ebf255a9277ee"),
        ("fUSDCx", "0x20741259f9e9962065f3a1cf2bf5e5b025f6eef3"),
    ]
    .into_iter()
    .filter_map(|(name, addr)| {
        Address::parse(addr).ok().map(|address| SuperToken {
            name: name.to_string(),
            address,
        })
    })
    .collect()
}

/// Look up a preset by ticker (case-insensitive)
pub fn find_super_token(name: &str) -> Result<SuperToken> {
    common_super_tokens()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| TypesError::UnknownToken {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_parse() {
        assert_eq!(common_super_tokens().len(), 2);
        assert!(Address::parse(CFA_V1_FORWARDER).is_ok());
        assert!(Address::parse(GDA_V1_FORWARDER).is_ok());
    }

    #[test]
    fn test_find_preset() {
        let t = find_super_token("FDAIX").unwrap();
        assert_eq!(t.name, "fDAIx");
        assert!(matches!(
            find_super_token("nope"),
            Err(TypesError::UnknownToken { .. })
        ));
    }
}
