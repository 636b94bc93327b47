use streampilot_ledger::{
    InMemoryLedger, LedgerError, LedgerFailure, LedgerGateway, RevertCode, TokenKind, TxOperation,
};
use streampilot_types::{Address, Counterparty, PoolConfig, TokenAmount};

fn addr(byte: u8) -> Address {
    Address::parse(&format!("0x{}", format!("{:02x}", byte).repeat(20))).unwrap()
}

async fn ledger() -> (InMemoryLedger, Address, Address) {
    let forwarder = addr(0xcf);
    let token = addr(0x5d);
    let ledger = InMemoryLedger::new(forwarder.clone());
    ledger.register_token(token.clone(), TokenKind::Super).await;
    (ledger, token, forwarder)
}

#[tokio::test]
async fn test_unknown_token_is_an_error() {
    let (ledger, _, _) = ledger().await;
    let result = ledger.fetch_balance(&addr(0x99), &addr(1)).await;
    assert!(matches!(result, Err(LedgerError::UnknownToken { .. })));
}

#[tokio::test]
async fn test_total_supply_plain_vs_super() {
    let (ledger, token, _) = ledger().await;
    let plain = addr(0x20);
    ledger.register_token(plain.clone(), TokenKind::Plain).await;
    ledger.credit(&token, &addr(1), TokenAmount::from(40u64)).await;
    ledger.credit(&token, &addr(2), TokenAmount::from(2u64)).await;

    assert_eq!(ledger.total_supply(&token).await.unwrap(), Some(TokenAmount::from(42u64)));
    assert_eq!(ledger.total_supply(&plain).await.unwrap(), None);
}

#[tokio::test]
async fn test_upgrade_moves_underlying() {
    let (ledger, token, _) = ledger().await;
    let alice = addr(1);
    ledger.credit_underlying(&token, &alice, TokenAmount::from(100u64)).await;

    let receipt = ledger.upgrade(&token, &alice, &TokenAmount::from(60u64)).await.unwrap();
    assert_eq!(receipt.operation, TxOperation::Upgrade);
    assert_eq!(receipt.tx_hash.len(), 66);
    assert_eq!(ledger.fetch_balance(&token, &alice).await.unwrap(), TokenAmount::from(60u64));
    assert_eq!(ledger.underlying_balance(&token, &alice).await, TokenAmount::from(40u64));

    let err = ledger
        .upgrade(&token, &alice, &TokenAmount::from(41u64))
        .await
        .unwrap_err();
    assert_eq!(err.revert_code(), Some(RevertCode::InsufficientUnderlying));
}

#[tokio::test]
async fn test_create_flow_enforces_contract_rules() {
    let (ledger, token, forwarder) = ledger().await;
    let alice = addr(1);
    let bob = addr(2);
    let rate = TokenAmount::from(1u64);

    let err = ledger.create_flow(&token, &alice, &bob, &rate).await.unwrap_err();
    assert_eq!(err.revert_code(), Some(RevertCode::InsufficientAllowance));

    ledger
        .approve(&token, &alice, &forwarder, &TokenAmount::max_uint256())
        .await
        .unwrap();
    let err = ledger.create_flow(&token, &alice, &bob, &rate).await.unwrap_err();
    assert_eq!(err.revert_code(), Some(RevertCode::InsufficientBalance));

    ledger.credit(&token, &alice, TokenAmount::from(3600u64)).await;
    ledger.create_flow(&token, &alice, &bob, &rate).await.unwrap();
    assert_eq!(
        ledger.fetch_existing_flow_rate(&token, &alice, &bob).await.unwrap(),
        rate
    );

    let err = ledger.create_flow(&token, &alice, &bob, &rate).await.unwrap_err();
    assert_eq!(err.revert_code(), Some(RevertCode::FlowAlreadyExists));

    let err = ledger.create_flow(&token, &alice, &alice, &rate).await.unwrap_err();
    assert_eq!(err.revert_code(), Some(RevertCode::SelfFlow));
}

#[tokio::test]
async fn test_create_pool_records_config() {
    let (ledger, token, _) = ledger().await;
    let admin = addr(7);
    let created = ledger
        .create_pool(&token, &admin, PoolConfig::default())
        .await
        .unwrap();

    let pools = ledger.pools().await;
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].pool, created.pool);
    assert_eq!(pools[0].admin, admin);
    assert!(!created.pool.is_zero());
}

#[tokio::test]
async fn test_create_pool_on_plain_token_reverts() {
    let (ledger, _, _) = ledger().await;
    let plain = addr(0x20);
    ledger.register_token(plain.clone(), TokenKind::Plain).await;
    let err = ledger
        .create_pool(&plain, &addr(7), PoolConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.revert_code(), Some(RevertCode::NotSuperToken));
}

#[tokio::test]
async fn test_injected_failure_hits_next_write_only() {
    let (ledger, token, forwarder) = ledger().await;
    ledger
        .inject_failure(LedgerFailure::reverted(RevertCode::UserRejected, "user rejected"))
        .await;

    let amount = TokenAmount::from(1u64);
    let err = ledger.approve(&token, &addr(1), &forwarder, &amount).await.unwrap_err();
    assert_eq!(err.revert_code(), Some(RevertCode::UserRejected));
    assert!(ledger.approve(&token, &addr(1), &forwarder, &amount).await.is_ok());
}

#[tokio::test]
async fn test_register_agent_replaces_same_address() {
    let (ledger, _, _) = ledger().await;
    ledger.register_agent(Counterparty::new(addr(1), 10)).await.unwrap();
    ledger.register_agent(Counterparty::new(addr(2), 20)).await.unwrap();
    ledger.register_agent(Counterparty::new(addr(1), 30)).await.unwrap();

    let agents = ledger.list_counterparties().await.unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].address, addr(1));
    assert_eq!(agents[0].reputation_score, 30);
}
