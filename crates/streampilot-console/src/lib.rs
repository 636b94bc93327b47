//! StreamPilot Console - One user's session against the ledger
//!
//! The console owns the session state (connected account, selected token,
//! selected agent) and threads it through explicit calls. Each stream
//! attempt runs the same sequence:
//!
//! ```text
//! fetch balance/allowance/flow → evaluate → create_flow → receipt
//! ```
//!
//! A rejected intent never reaches the ledger.

pub mod classify;
pub mod config;
pub mod console;
pub mod error;

pub use classify::*;
pub use config::*;
pub use console::*;
pub use error::*;
