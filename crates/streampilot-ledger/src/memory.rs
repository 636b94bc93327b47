//! In-memory ledger
//!
//! Models just enough of the streaming contracts for local runs: super
//! token balances, underlying balances, allowances, open flows, pools and
//! the agent registry. Every write takes the single state lock, so each
//! transaction is atomic.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sha3::{Digest, Keccak256};
use streampilot_types::{Address, Counterparty, PoolConfig, TokenAmount};
use tokio::sync::RwLock;

use crate::{
    LedgerError, LedgerFailure, LedgerGateway, PoolCreated, Result, RevertCode, TxOperation,
    TxReceipt,
};

/// Seconds of deposit the ledger demands when a flow is opened
pub const DEPOSIT_SECONDS: u64 = 3600;

/// Kind of token contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Wrappable super token with streaming support
    Super,
    /// Plain ERC-20 without total-supply reporting
    Plain,
}

/// A pool created on the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRecord {
    pub pool: Address,
    pub token: Address,
    pub admin: Address,
    pub config: PoolConfig,
}

type Pair = (Address, Address);
type Triple = (Address, Address, Address);

#[derive(Default)]
struct LedgerState {
    tokens: HashMap<Address, TokenKind>,
    /// (token, account) -> super token balance
    balances: HashMap<Pair, TokenAmount>,
    /// (token, account) -> underlying balance available to upgrade
    underlying: HashMap<Pair, TokenAmount>,
    /// (token, owner, spender) -> allowance
    allowances: HashMap<Triple, TokenAmount>,
    /// (token, sender, receiver) -> flow rate
    flows: HashMap<Triple, TokenAmount>,
    pools: Vec<PoolRecord>,
    counterparties: Vec<Counterparty>,
    nonce: u64,
    injected: Option<LedgerFailure>,
}

impl LedgerState {
    fn token_kind(&self, token: &Address) -> Result<TokenKind> {
        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| LedgerError::UnknownToken {
                token: token.to_string(),
            })
    }

    fn require_super(&self, token: &Address) -> Result<()> {
        match self.token_kind(token)? {
            TokenKind::Super => Ok(()),
            TokenKind::Plain => Err(LedgerFailure::reverted(
                RevertCode::NotSuperToken,
                "token is not a super token",
            )
            .into()),
        }
    }

    fn balance(&self, token: &Address, account: &Address) -> TokenAmount {
        self.balances
            .get(&(token.clone(), account.clone()))
            .cloned()
            .unwrap_or_default()
    }

    fn take_injected(&mut self) -> Result<()> {
        match self.injected.take() {
            Some(failure) => Err(failure.into()),
            None => Ok(()),
        }
    }

    /// Deterministic hash over the nonce and the operation's inputs
    fn next_hash(&mut self, operation: TxOperation, parts: &[&str]) -> String {
        self.nonce += 1;
        let mut hasher = Keccak256::new();
        hasher.update(self.nonce.to_be_bytes());
        hasher.update(format!("{:?}", operation).as_bytes());
        for part in parts {
            hasher.update(part.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    fn receipt(&mut self, operation: TxOperation, parts: &[&str]) -> TxReceipt {
        let hash = self.next_hash(operation, parts);
        TxReceipt {
            tx_hash: format!("0x{}", hash),
            operation,
            confirmed_at: Utc::now(),
        }
    }
}

/// Ledger held entirely in memory
///
/// Cloning shares the same state.
#[derive(Clone)]
pub struct InMemoryLedger {
    flow_forwarder: Address,
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
    /// Create an empty ledger. `flow_forwarder` is the spender whose
    /// allowance `create_flow` requires.
    pub fn new(flow_forwarder: Address) -> Self {
        Self {
            flow_forwarder,
            state: Arc::new(RwLock::new(LedgerState::default())),
        }
    }

    pub async fn register_token(&self, token: Address, kind: TokenKind) {
        let mut state = self.state.write().await;
        state.tokens.insert(token, kind);
    }

    /// Credit super token balance directly
    pub async fn credit(&self, token: &Address, account: &Address, amount: TokenAmount) {
        let mut state = self.state.write().await;
        let entry = state
            .balances
            .entry((token.clone(), account.clone()))
            .or_default();
        *entry = &*entry + &amount;
    }

    /// Credit underlying (unwrapped) balance, available to `upgrade`
    pub async fn credit_underlying(&self, token: &Address, account: &Address, amount: TokenAmount) {
        let mut state = self.state.write().await;
        let entry = state
            .underlying
            .entry((token.clone(), account.clone()))
            .or_default();
        *entry = &*entry + &amount;
    }

    /// Underlying balance still unwrapped
    pub async fn underlying_balance(&self, token: &Address, account: &Address) -> TokenAmount {
        let state = self.state.read().await;
        state
            .underlying
            .get(&(token.clone(), account.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// Pools created so far
    pub async fn pools(&self) -> Vec<PoolRecord> {
        self.state.read().await.pools.clone()
    }

    /// Make the next write transaction fail with `failure`
    pub async fn inject_failure(&self, failure: LedgerFailure) {
        self.state.write().await.injected = Some(failure);
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn fetch_balance(&self, token: &Address, account: &Address) -> Result<TokenAmount> {
        let state = self.state.read().await;
        state.token_kind(token)?;
        Ok(state.balance(token, account))
    }

    async fn fetch_allowance(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<TokenAmount> {
        let state = self.state.read().await;
        state.token_kind(token)?;
        Ok(state
            .allowances
            .get(&(token.clone(), owner.clone(), spender.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_existing_flow_rate(
        &self,
        token: &Address,
        sender: &Address,
        receiver: &Address,
    ) -> Result<TokenAmount> {
        let state = self.state.read().await;
        state.token_kind(token)?;
        Ok(state
            .flows
            .get(&(token.clone(), sender.clone(), receiver.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_counterparties(&self) -> Result<Vec<Counterparty>> {
        Ok(self.state.read().await.counterparties.clone())
    }

    async fn total_supply(&self, token: &Address) -> Result<Option<TokenAmount>> {
        let state = self.state.read().await;
        match state.token_kind(token)? {
            TokenKind::Plain => Ok(None),
            TokenKind::Super => {
                let total = state
                    .balances
                    .iter()
                    .filter(|((t, _), _)| t == token)
                    .fold(TokenAmount::zero(), |acc, (_, v)| &acc + v);
                Ok(Some(total))
            }
        }
    }

    async fn approve(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: &TokenAmount,
    ) -> Result<TxReceipt> {
        let mut state = self.state.write().await;
        state.take_injected()?;
        state.token_kind(token)?;

        state
            .allowances
            .insert((token.clone(), owner.clone(), spender.clone()), amount.clone());
        let receipt = state.receipt(
            TxOperation::Approve,
            &[token.as_str(), owner.as_str(), spender.as_str()],
        );

        tracing::info!(
            token = %token,
            owner = %owner,
            spender = %spender,
            tx = %receipt.tx_hash,
            "Allowance set"
        );
        Ok(receipt)
    }

    async fn upgrade(
        &self,
        token: &Address,
        account: &Address,
        amount: &TokenAmount,
    ) -> Result<TxReceipt> {
        let mut state = self.state.write().await;
        state.take_injected()?;
        state.require_super(token)?;

        let key = (token.clone(), account.clone());
        let available = state.underlying.get(&key).cloned().unwrap_or_default();
        let remaining = available.checked_sub(amount).ok_or_else(|| {
            LedgerError::from(LedgerFailure::reverted(
                RevertCode::InsufficientUnderlying,
                "SuperToken: insufficient underlying balance",
            ))
        })?;
        state.underlying.insert(key.clone(), remaining);

        let balance = state.balances.entry(key).or_default();
        *balance = &*balance + amount;

        let receipt = state.receipt(TxOperation::Upgrade, &[token.as_str(), account.as_str()]);
        tracing::info!(
            token = %token,
            account = %account,
            amount = %amount,
            tx = %receipt.tx_hash,
            "Upgraded to super token"
        );
        Ok(receipt)
    }

    async fn create_flow(
        &self,
        token: &Address,
        sender: &Address,
        receiver: &Address,
        flow_rate: &TokenAmount,
    ) -> Result<TxReceipt> {
        let mut state = self.state.write().await;
        state.take_injected()?;
        state.require_super(token)?;

        if sender == receiver {
            return Err(LedgerFailure::reverted(RevertCode::SelfFlow, "CFA: no self flow").into());
        }
        if flow_rate.is_zero() {
            return Err(
                LedgerFailure::reverted(RevertCode::InvalidFlowRate, "CFA: invalid flow rate").into(),
            );
        }

        let allowance_key = (token.clone(), sender.clone(), self.flow_forwarder.clone());
        if state
            .allowances
            .get(&allowance_key)
            .map_or(true, TokenAmount::is_zero)
        {
            return Err(LedgerFailure::reverted(
                RevertCode::InsufficientAllowance,
                "CFA: forwarder not approved",
            )
            .into());
        }

        let flow_key = (token.clone(), sender.clone(), receiver.clone());
        if state.flows.get(&flow_key).map_or(false, |r| !r.is_zero()) {
            return Err(LedgerFailure::reverted(
                RevertCode::FlowAlreadyExists,
                "CFA: flow already exist",
            )
            .into());
        }

        if state.balance(token, sender) < flow_rate.scaled(DEPOSIT_SECONDS) {
            return Err(LedgerFailure::reverted(
                RevertCode::InsufficientBalance,
                "CFA: not enough available balance",
            )
            .into());
        }

        state.flows.insert(flow_key, flow_rate.clone());
        let receipt = state.receipt(
            TxOperation::CreateFlow,
            &[token.as_str(), sender.as_str(), receiver.as_str()],
        );

        tracing::info!(
            token = %token,
            sender = %sender,
            receiver = %receiver,
            flow_rate = %flow_rate,
            tx = %receipt.tx_hash,
            "Flow created"
        );
        Ok(receipt)
    }

    async fn create_pool(
        &self,
        token: &Address,
        admin: &Address,
        config: PoolConfig,
    ) -> Result<PoolCreated> {
        let mut state = self.state.write().await;
        state.take_injected()?;
        state.require_super(token)?;

        let receipt = state.receipt(TxOperation::CreatePool, &[token.as_str(), admin.as_str()]);
        // Pool address is the low 20 bytes of the transaction hash
        let pool = Address::parse(&format!("0x{}", &receipt.tx_hash[26..]))
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        state.pools.push(PoolRecord {
            pool: pool.clone(),
            token: token.clone(),
            admin: admin.clone(),
            config,
        });

        tracing::info!(token = %token, admin = %admin, pool = %pool, "Pool created");
        Ok(PoolCreated { receipt, pool })
    }

    async fn register_agent(&self, agent: Counterparty) -> Result<()> {
        let mut state = self.state.write().await;
        tracing::debug!(agent = %agent.address, score = agent.reputation_score, "Agent registered");
        match state
            .counterparties
            .iter_mut()
            .find(|c| c.address == agent.address)
        {
            Some(existing) => *existing = agent,
            None => state.counterparties.push(agent),
        }
        Ok(())
    }
}
