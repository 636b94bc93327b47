//! StreamPilot Guard - Pre-flight decisions
//!
//! This crate holds the two decisions StreamPilot makes on its own before
//! anything is sent to the ledger:
//!
//! - **Agent selection**: pick the counterparty with the highest reputation.
//! - **Stream admission**: decide whether a stream may be attempted, and if
//!   not, say exactly why.
//!
//! # Key Principle
//!
//! **The guard DECIDES, it never TRANSACTS.**
//!
//! Both decisions are pure functions over snapshots the caller fetched. They
//! never fail: an empty agent list is `None`, a refused stream is
//! `AdmissionResult::Reject`. The caller renders the outcome and must not
//! submit a transaction for a rejected intent.

pub mod admission;
pub mod selector;

pub use admission::*;
pub use selector::*;
