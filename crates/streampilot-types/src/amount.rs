//! Token amounts with arbitrary precision
//!
//! On-chain balances, allowances and flow rates are unsigned 256-bit values
//! (or larger once multiplied), which overflow both `i64` and `f64`. Every
//! amount is therefore a `BigUint` in smallest units, and conversion to a
//! human-readable decimal string is exact.

use crate::{Result, TypesError};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// Decimals used by super tokens (and ether)
pub const TOKEN_DECIMALS: u32 = 18;

/// Non-negative token quantity in smallest units (wei-style)
///
/// Serialized as a base-10 string so JSON consumers never round it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount(BigUint);

impl TokenAmount {
    /// Zero amount
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Wrap a raw integer
    pub fn from_biguint(value: BigUint) -> Self {
        Self(value)
    }

    /// Largest `uint256`, used for unlimited approvals
    pub fn max_uint256() -> Self {
        Self((BigUint::one() << 256u32) - BigUint::one())
    }

    /// Borrow the raw integer
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by an unsigned scalar; cannot overflow
    pub fn scaled(&self, factor: u64) -> Self {
        Self(&self.0 * BigUint::from(factor))
    }

    /// Subtraction that refuses to go below zero
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.0 >= other.0 {
            Some(Self(&self.0 - &other.0))
        } else {
            None
        }
    }

    /// Parse an integer count of smallest units
    pub fn parse_units_raw(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "empty input"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(input, "expected a non-negative integer"));
        }
        BigUint::parse_bytes(trimmed.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| invalid(input, "expected a non-negative integer"))
    }

    /// Parse a decimal human amount (e.g. `"100.5"`) into smallest units
    pub fn parse_units(input: &str, decimals: u32) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "empty input"));
        }

        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid(input, "no digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(input, "expected a non-negative decimal number"));
        }
        if frac.len() > decimals as usize {
            return Err(invalid(
                input,
                &format!("more than {} fractional digits", decimals),
            ));
        }

        let mut digits = String::with_capacity(whole.len() + decimals as usize);
        digits.push_str(whole);
        digits.push_str(frac);
        digits.extend(std::iter::repeat('0').take(decimals as usize - frac.len()));

        BigUint::parse_bytes(digits.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| invalid(input, "expected a non-negative decimal number"))
    }

    /// Parse a decimal ether-style amount (18 decimals)
    pub fn parse_ether(input: &str) -> Result<Self> {
        Self::parse_units(input, TOKEN_DECIMALS)
    }

    /// Exact decimal rendering with `decimals` fractional places
    ///
    /// Trailing zeros are trimmed but at least one fractional digit is kept,
    /// so `10^18` with 18 decimals renders as `1.0`.
    pub fn format_units(&self, decimals: u32) -> String {
        let raw = self.0.to_str_radix(10);
        let decimals = decimals as usize;

        let padded = if raw.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
        } else {
            raw
        };

        let split = padded.len() - decimals;
        let (whole, frac) = padded.split_at(split);
        let frac = frac.trim_end_matches('0');
        let frac = if frac.is_empty() { "0" } else { frac };
        format!("{}.{}", whole, frac)
    }

    /// Exact decimal rendering with 18 decimals
    pub fn format_ether(&self) -> String {
        self.format_units(TOKEN_DECIMALS)
    }
}

fn invalid(input: &str, reason: &str) -> TypesError {
    TypesError::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAmount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_units_raw(s)
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_units_raw(&value)
    }
}

impl From<TokenAmount> for String {
    fn from(amount: TokenAmount) -> Self {
        amount.0.to_str_radix(10)
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for TokenAmount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl Add for TokenAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

impl<'a> Add<&'a TokenAmount> for &'a TokenAmount {
    type Output = TokenAmount;

    fn add(self, other: &'a TokenAmount) -> Self::Output {
        TokenAmount(&self.0 + &other.0)
    }
}

impl Mul<u64> for &TokenAmount {
    type Output = TokenAmount;

    fn mul(self, factor: u64) -> Self::Output {
        self.scaled(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ether() {
        assert_eq!(TokenAmount::zero().format_ether(), "0.0");
        assert_eq!(TokenAmount::from(3600u64).format_ether(), "0.0000000000000036");
        assert_eq!(
            TokenAmount::from(1_000_000_000_000_000_000u64).format_ether(),
            "1.0"
        );
        assert_eq!(
            TokenAmount::from(1_500_000_000_000_000_000u64).format_ether(),
            "1.5"
        );
    }

    #[test]
    fn test_format_zero_decimals() {
        assert_eq!(TokenAmount::from(42u64).format_units(0), "42.0");
    }

    #[test]
    fn test_parse_ether() {
        assert_eq!(
            TokenAmount::parse_ether("100").unwrap(),
            TokenAmount::from(100_000_000_000_000_000_000u128)
        );
        assert_eq!(
            TokenAmount::parse_ether("0.25").unwrap(),
            TokenAmount::from(250_000_000_000_000_000u64)
        );
        assert_eq!(
            TokenAmount::parse_ether(".5").unwrap(),
            TokenAmount::from(500_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TokenAmount::parse_ether("").is_err());
        assert!(TokenAmount::parse_ether("-1").is_err());
        assert!(TokenAmount::parse_ether("1e18").is_err());
        assert!(TokenAmount::parse_ether(".").is_err());
        assert!(TokenAmount::parse_ether("0.0000000000000000001").is_err());
        assert!(TokenAmount::parse_units_raw("12.5").is_err());
    }

    #[test]
    fn test_large_values_do_not_truncate() {
        let max = TokenAmount::max_uint256();
        let scaled = max.scaled(3600);
        assert!(scaled > max);
        assert_eq!(
            max.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_checked_sub() {
        let a = TokenAmount::from(10u64);
        let b = TokenAmount::from(3u64);
        assert_eq!(a.checked_sub(&b), Some(TokenAmount::from(7u64)));
        assert_eq!(b.checked_sub(&a), None);
    }

    #[test]
    fn test_serde_as_string() {
        let amount = TokenAmount::max_uint256();
        let json = serde_json::to_string(&amount).unwrap();
        assert!(json.starts_with("\"1157920892"));
        let back: TokenAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }
}
