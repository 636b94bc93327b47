//! Console configuration

use crate::{ConsoleError, ConsoleResult};
use streampilot_types::{
    common_super_tokens, Address, PoolConfig, SuperToken, CFA_V1_FORWARDER, GDA_V1_FORWARDER,
};

/// Environment variable overriding the flow forwarder address
pub const ENV_CFA_FORWARDER: &str = "STREAMPILOT_CFA_FORWARDER";

/// Environment variable overriding the pool forwarder address
pub const ENV_GDA_FORWARDER: &str = "STREAMPILOT_GDA_FORWARDER";

/// Configuration for a [`crate::StreamConsole`]
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Spender approved for streaming; flows are created through it
    pub cfa_forwarder: Address,
    /// Forwarder that creates distribution pools
    pub gda_forwarder: Address,
    /// Presets offered for quick token selection
    pub super_tokens: Vec<SuperToken>,
    /// Config applied to new pools
    pub pool_config: PoolConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            cfa_forwarder: parse_builtin(CFA_V1_FORWARDER),
            gda_forwarder: parse_builtin(GDA_V1_FORWARDER),
            super_tokens: common_super_tokens(),
            pool_config: PoolConfig::default(),
        }
    }
}

fn parse_builtin(address: &str) -> Address {
    Address::parse(address).unwrap_or_else(|_| Address::zero())
}

impl ConsoleConfig {
    /// Defaults, with forwarder addresses overridable from the environment
    pub fn from_env() -> ConsoleResult<Self> {
        let mut config = Self::default();
        if let Some(addr) = read_address(ENV_CFA_FORWARDER)? {
            config.cfa_forwarder = addr;
        }
        if let Some(addr) = read_address(ENV_GDA_FORWARDER)? {
            config.gda_forwarder = addr;
        }
        Ok(config)
    }

    /// Find a configured preset by name (case-insensitive)
    pub fn preset(&self, name: &str) -> Option<&SuperToken> {
        self.super_tokens
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

fn read_address(var: &str) -> ConsoleResult<Option<Address>> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Address::parse(&value)
            .map(Some)
            .map_err(|e| ConsoleError::Config {
                message: format!("{}: {}", var, e),
            }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_forwarders() {
        let config = ConsoleConfig::default();
        assert_eq!(
            config.cfa_forwarder.as_str(),
            "0xcfa132e353cb4e398080b9700609bb008eceb125"
        );
        assert!(!config.gda_forwarder.is_zero());
        assert!(config.preset("fusdcx").is_some());
        assert!(config.preset("weth").is_none());
    }
}
