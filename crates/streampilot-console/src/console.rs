//! The stream console session

use std::fmt;

use serde::{Deserialize, Serialize};
use streampilot_guard::{evaluate, select_best, AdmissionResult};
use streampilot_ledger::{LedgerGateway, PoolCreated, TxReceipt};
use streampilot_types::{Address, Counterparty, StreamIntent, TokenAmount};

use crate::{ConsoleConfig, ConsoleError, ConsoleResult, LedgerAction};

/// Balance, allowance and supply of the selected token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub balance: TokenAmount,
    pub allowance: TokenAmount,
    /// `None` when the token does not report a total supply
    pub total_supply: Option<TokenAmount>,
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Balance: {}, Allowance: {}",
            self.balance.format_ether(),
            self.allowance.format_ether()
        )?;
        match &self.total_supply {
            Some(supply) => write!(f, " (Super Token Total Supply: {})", supply.format_ether()),
            None => write!(f, " (Standard ERC20)"),
        }
    }
}

/// A stream opened to the best-reputation agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStream {
    pub agent: Counterparty,
    pub receipt: TxReceipt,
}

/// One user's session
///
/// Holds the connected account, the selected token and the selected agent.
/// Nothing is cached from the ledger: every stream attempt fetches fresh
/// state and builds a new [`StreamIntent`].
pub struct StreamConsole<L: LedgerGateway> {
    config: ConsoleConfig,
    ledger: L,
    account: Option<Address>,
    token: Option<Address>,
    selected_agent: Option<Counterparty>,
}

impl<L: LedgerGateway> StreamConsole<L> {
    pub fn new(config: ConsoleConfig, ledger: L) -> Self {
        Self {
            config,
            ledger,
            account: None,
            token: None,
            selected_agent: None,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub fn token(&self) -> Option<&Address> {
        self.token.as_ref()
    }

    pub fn selected_agent(&self) -> Option<&Counterparty> {
        self.selected_agent.as_ref()
    }

    /// Attach an account to the session
    pub fn connect(&mut self, account: &str) -> ConsoleResult<String> {
        let account = Address::parse(account)?;
        tracing::info!(account = %account, "Wallet connected");
        let message = format!("Connected to {}", account.checksummed());
        self.account = Some(account);
        Ok(message)
    }

    /// Clear the whole session
    pub fn disconnect(&mut self) {
        tracing::info!("Wallet disconnected");
        self.account = None;
        self.token = None;
        self.selected_agent = None;
    }

    /// Select a token by address
    pub fn select_token(&mut self, token: &str) -> ConsoleResult<&Address> {
        let token = Address::parse(token)?;
        Ok(self.token.insert(token))
    }

    /// Select a token by preset name
    pub fn select_preset(&mut self, name: &str) -> ConsoleResult<&Address> {
        let token = self
            .config
            .preset(name)
            .map(|t| t.address.clone())
            .ok_or_else(|| streampilot_types::TypesError::UnknownToken {
                name: name.to_string(),
            })?;
        Ok(self.token.insert(token))
    }

    fn require_account(&self) -> ConsoleResult<&Address> {
        self.account.as_ref().ok_or(ConsoleError::NotConnected)
    }

    fn require_token(&self) -> ConsoleResult<&Address> {
        self.token
            .as_ref()
            .ok_or(ConsoleError::MissingField { field: "token address" })
    }

    fn session(&self) -> ConsoleResult<(Address, Address)> {
        let account = self.require_account()?.clone();
        let token = self.require_token()?.clone();
        Ok((account, token))
    }

    /// Read balance and forwarder allowance for the selected token
    pub async fn check_balance_and_allowance(&self) -> ConsoleResult<BalanceReport> {
        let (account, token) = self.session()?;
        let err = ConsoleError::ledger;

        let balance = self
            .ledger
            .fetch_balance(&token, &account)
            .await
            .map_err(err(LedgerAction::CheckBalance))?;
        let allowance = self
            .ledger
            .fetch_allowance(&token, &account, &self.config.cfa_forwarder)
            .await
            .map_err(err(LedgerAction::CheckBalance))?;
        // Supply is informational; a token that cannot report it is a plain ERC-20
        let total_supply = self.ledger.total_supply(&token).await.unwrap_or(None);

        Ok(BalanceReport {
            balance,
            allowance,
            total_supply,
        })
    }

    /// Grant the flow forwarder an unlimited allowance
    pub async fn approve_token(&self) -> ConsoleResult<TxReceipt> {
        let (account, token) = self.session()?;
        let receipt = self
            .ledger
            .approve(
                &token,
                &account,
                &self.config.cfa_forwarder,
                &TokenAmount::max_uint256(),
            )
            .await
            .map_err(ConsoleError::ledger(LedgerAction::Approve))?;

        tracing::info!(token = %token, tx = %receipt.tx_hash, "Token approved for streaming");
        Ok(receipt)
    }

    /// Wrap a decimal amount of the underlying token into the super token
    pub async fn upgrade(&self, amount: &str) -> ConsoleResult<TxReceipt> {
        let (account, token) = self.session()?;
        if amount.trim().is_empty() {
            return Err(ConsoleError::MissingField { field: "amount to upgrade" });
        }
        let amount = TokenAmount::parse_ether(amount)?;

        let receipt = self
            .ledger
            .upgrade(&token, &account, &amount)
            .await
            .map_err(ConsoleError::ledger(LedgerAction::Upgrade))?;

        tracing::info!(token = %token, amount = %amount, "Upgraded to super token");
        Ok(receipt)
    }

    /// Fetch the sender's state and build the intent for a stream attempt
    pub async fn build_intent(
        &self,
        receiver: &Address,
        flow_rate: TokenAmount,
    ) -> ConsoleResult<StreamIntent> {
        let (account, token) = self.session()?;
        let err = ConsoleError::ledger;

        let balance = self
            .ledger
            .fetch_balance(&token, &account)
            .await
            .map_err(err(LedgerAction::CreateStream))?;
        let allowance = self
            .ledger
            .fetch_allowance(&token, &account, &self.config.cfa_forwarder)
            .await
            .map_err(err(LedgerAction::CreateStream))?;
        let existing = self
            .ledger
            .fetch_existing_flow_rate(&token, &account, receiver)
            .await
            .map_err(err(LedgerAction::CreateStream))?;

        Ok(StreamIntent::new(account, receiver.clone(), flow_rate)
            .with_balance(balance)
            .with_allowance(allowance)
            .with_existing_flow(existing))
    }

    /// Open a stream from the connected account to `receiver`.
    ///
    /// Runs the admission check on freshly fetched state and only submits
    /// when it admits.
    pub async fn create_stream(&mut self, receiver: &str, flow_rate: &str) -> ConsoleResult<TxReceipt> {
        self.require_account()?;
        if receiver.trim().is_empty() {
            return Err(ConsoleError::MissingField { field: "receiver address" });
        }
        if flow_rate.trim().is_empty() {
            return Err(ConsoleError::MissingField { field: "flow rate" });
        }
        self.require_token()?;

        let receiver = Address::parse(receiver)?;
        let flow_rate = TokenAmount::parse_units_raw(flow_rate)?;
        self.open_stream(&receiver, flow_rate).await
    }

    async fn open_stream(&mut self, receiver: &Address, flow_rate: TokenAmount) -> ConsoleResult<TxReceipt> {
        let intent = self.build_intent(receiver, flow_rate).await?;

        match evaluate(&intent) {
            AdmissionResult::Admit => {}
            AdmissionResult::Reject(reason) => {
                tracing::warn!(
                    sender = %intent.sender,
                    receiver = %intent.receiver,
                    reason = reason.code(),
                    "Stream rejected before submission"
                );
                return Err(reason.into());
            }
        }

        let token = self.require_token()?.clone();
        let receipt = self
            .ledger
            .create_flow(&token, &intent.sender, &intent.receiver, &intent.flow_rate_per_second)
            .await
            .map_err(ConsoleError::ledger(LedgerAction::CreateStream))?;

        tracing::info!(
            sender = %intent.sender,
            receiver = %intent.receiver,
            flow_rate = %intent.flow_rate_per_second,
            tx = %receipt.tx_hash,
            "Stream created"
        );
        Ok(receipt)
    }

    /// Create a distribution pool for the selected token
    pub async fn create_pool(&self, admin: &str) -> ConsoleResult<PoolCreated> {
        self.require_account()?;
        let token = self.require_token()?.clone();
        if admin.trim().is_empty() {
            return Err(ConsoleError::MissingField { field: "admin address" });
        }
        let admin = Address::parse(admin)?;

        let created = self
            .ledger
            .create_pool(&token, &admin, self.config.pool_config)
            .await
            .map_err(ConsoleError::ledger(LedgerAction::CreatePool))?;

        tracing::info!(pool = %created.pool, admin = %admin, "Pool created");
        Ok(created)
    }

    /// Add an agent to the registry
    pub async fn register_agent(&self, agent: Counterparty) -> ConsoleResult<()> {
        self.ledger
            .register_agent(agent)
            .await
            .map_err(ConsoleError::ledger(LedgerAction::RegisterAgent))
    }

    /// Select the registered agent with the highest reputation.
    ///
    /// `Ok(None)` when no agents are registered.
    pub async fn select_best_agent(&mut self) -> ConsoleResult<Option<&Counterparty>> {
        let agents = self
            .ledger
            .list_counterparties()
            .await
            .map_err(ConsoleError::ledger(LedgerAction::ListAgents))?;

        self.selected_agent = select_best(&agents).cloned();
        if let Some(agent) = &self.selected_agent {
            tracing::info!(
                agent = %agent.address,
                score = agent.reputation_score,
                candidates = agents.len(),
                "Best agent selected"
            );
        }
        Ok(self.selected_agent.as_ref())
    }

    /// Select the best agent and open a stream to it
    pub async fn stream_to_best_agent(&mut self, flow_rate: &str) -> ConsoleResult<AgentStream> {
        self.require_account()?;
        self.require_token()?;
        if flow_rate.trim().is_empty() {
            return Err(ConsoleError::MissingField { field: "flow rate" });
        }
        let flow_rate = TokenAmount::parse_units_raw(flow_rate)?;

        let agent = self
            .select_best_agent()
            .await?
            .cloned()
            .ok_or(ConsoleError::NoCounterparties)?;

        let receipt = self.open_stream(&agent.address, flow_rate).await?;
        Ok(AgentStream { agent, receipt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_report_messages() {
        let report = BalanceReport {
            balance: TokenAmount::from(1_000_000_000_000_000_000u64),
            allowance: TokenAmount::zero(),
            total_supply: None,
        };
        assert_eq!(report.to_string(), "Balance: 1.0, Allowance: 0.0 (Standard ERC20)");

        let report = BalanceReport {
            total_supply: Some(TokenAmount::from(2_500_000_000_000_000_000u64)),
            ..report
        };
        assert_eq!(
            report.to_string(),
            "Balance: 1.0, Allowance: 0.0 (Super Token Total Supply: 2.5)"
        );
    }
}
