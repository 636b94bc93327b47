//! StreamPilot Types - Canonical domain types for token streaming
//!
//! This crate contains the foundational types shared by every StreamPilot
//! crate, with zero dependencies on other streampilot crates:
//!
//! - Account addresses, normalized to their lower-case canonical form
//! - Token amounts with arbitrary precision (no 64-bit or f64 truncation)
//! - Counterparty snapshots carrying a reputation score
//! - Stream intents describing a single stream attempt
//! - Super token presets and forwarder addresses
//!
//! # Stream Flow
//!
//! ```text
//! Fetch state → Build StreamIntent → Evaluate → Submit → Confirm
//! ```

pub mod address;
pub mod amount;
pub mod counterparty;
pub mod stream;
pub mod token;
pub mod error;

pub use address::*;
pub use amount::*;
pub use counterparty::*;
pub use stream::*;
pub use token::*;
pub use error::*;

/// Version of the StreamPilot types schema
pub const TYPES_VERSION: &str = "0.1.0";
