//! Account and contract addresses
//!
//! Addresses are 20-byte hexadecimal identifiers. The canonical form is the
//! lower-case `0x`-prefixed string; every `Address` is normalized when it is
//! built, so `==` on the type is case-insensitive comparison of the input.

use crate::{Result, TypesError};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Number of hex digits in an address body
pub const ADDRESS_HEX_LEN: usize = 40;

/// A 20-byte address, stored lower-case with a `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address in any letter case
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| TypesError::InvalidAddress {
                input: input.to_string(),
                reason: "missing 0x prefix".to_string(),
            })?;

        if body.len() != ADDRESS_HEX_LEN {
            return Err(TypesError::InvalidAddress {
                input: input.to_string(),
                reason: format!("expected {} hex digits, got {}", ADDRESS_HEX_LEN, body.len()),
            });
        }

        if !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypesError::InvalidAddress {
                input: input.to_string(),
                reason: "contains non-hex characters".to_string(),
            });
        }

        Ok(Self(format!("0x{}", body.to_ascii_lowercase())))
    }

    /// The all-zero address
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(ADDRESS_HEX_LEN)))
    }

    /// Canonical lower-case form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    /// EIP-55 mixed-case checksum form, for display only
    pub fn checksummed(&self) -> String {
        let body = &self.0[2..];
        let hash = hex::encode(Keccak256::digest(body.as_bytes()));

        let mut out = String::with_capacity(2 + ADDRESS_HEX_LEN);
        out.push_str("0x");
        for (c, h) in body.chars().zip(hash.chars()) {
            let nibble = h.to_digit(16).unwrap_or(0);
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Short `0x1234…abcd` form for logs and tables
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
