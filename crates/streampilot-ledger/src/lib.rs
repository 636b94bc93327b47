//! StreamPilot Ledger - Capability interface to the token-streaming ledger
//!
//! Everything that touches balances, allowances, flows or pools goes through
//! [`LedgerGateway`]. The flow accounting itself lives in the external
//! contract system; this crate only describes the calls StreamPilot makes
//! and ships an [`InMemoryLedger`] for local runs and tests.

pub mod error;
pub mod memory;
pub mod receipt;

pub use error::*;
pub use memory::*;
pub use receipt::*;

use async_trait::async_trait;
use streampilot_types::{Address, Counterparty, PoolConfig, TokenAmount};

/// Capabilities StreamPilot consumes from the ledger
///
/// Reads are side-effect free. Writes return once the transaction is
/// confirmed, or with a structured [`LedgerFailure`] when it reverts.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Token balance of `account`
    async fn fetch_balance(&self, token: &Address, account: &Address) -> Result<TokenAmount>;

    /// Amount `spender` may move on behalf of `owner`
    async fn fetch_allowance(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<TokenAmount>;

    /// Rate of the open stream from `sender` to `receiver`, zero if none
    async fn fetch_existing_flow_rate(
        &self,
        token: &Address,
        sender: &Address,
        receiver: &Address,
    ) -> Result<TokenAmount>;

    /// Registered agents, in registration order
    async fn list_counterparties(&self) -> Result<Vec<Counterparty>>;

    /// Total supply for a super token, `None` for a plain ERC-20
    async fn total_supply(&self, token: &Address) -> Result<Option<TokenAmount>>;

    /// Set `spender`'s allowance over `owner`'s tokens
    async fn approve(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: &TokenAmount,
    ) -> Result<TxReceipt>;

    /// Wrap `amount` of the underlying token into the super token
    async fn upgrade(&self, token: &Address, account: &Address, amount: &TokenAmount)
        -> Result<TxReceipt>;

    /// Open a per-second stream
    async fn create_flow(
        &self,
        token: &Address,
        sender: &Address,
        receiver: &Address,
        flow_rate: &TokenAmount,
    ) -> Result<TxReceipt>;

    /// Create a distribution pool administered by `admin`
    async fn create_pool(
        &self,
        token: &Address,
        admin: &Address,
        config: PoolConfig,
    ) -> Result<PoolCreated>;

    /// Add an agent to the counterparty registry
    async fn register_agent(&self, agent: Counterparty) -> Result<()>;
}
