//! Demo command - Walk a session through the full streaming cycle
//!
//! Runs against an in-memory ledger seeded with the preset super tokens, so
//! no wallet or network is needed.

use colored::*;
use streampilot_console::{ConsoleConfig, ConsoleResult, StreamConsole};
use streampilot_ledger::{InMemoryLedger, TokenKind};
use streampilot_types::{Address, Counterparty, TokenAmount};

use crate::display;

const DEMO_ACCOUNT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
const DEMO_RECEIVER: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

const DEMO_AGENTS: [(&str, &str, u64, bool); 4] = [
    ("atlas", "0x1111111111111111111111111111111111111111", 72, true),
    ("borealis", "0x2222222222222222222222222222222222222222", 91, false),
    ("cirrus", "0x3333333333333333333333333333333333333333", 88, true),
    ("dune", "0x4444444444444444444444444444444444444444", 88, true),
];

/// Report a step outcome without aborting the demo
fn report<T>(result: ConsoleResult<T>, on_ok: impl FnOnce(T)) {
    match result {
        Ok(value) => on_ok(value),
        Err(err) => match err.reject_reason() {
            Some(reason) => display::rejection(&reason),
            None => display::error(&err.to_string()),
        },
    }
}

async fn seeded_ledger(config: &ConsoleConfig, account: &Address) -> InMemoryLedger {
    let ledger = InMemoryLedger::new(config.cfa_forwarder.clone());
    for token in &config.super_tokens {
        ledger.register_token(token.address.clone(), TokenKind::Super).await;
        ledger
            .credit_underlying(&token.address, account, TokenAmount::from(1_000_000_000_000_000_000_000u128))
            .await;
    }
    ledger
}

/// Run the full demo
pub async fn run_demo(config: ConsoleConfig, flow_rate: u64) -> anyhow::Result<()> {
    println!("{}", "StreamPilot Demo: reputation-aware token streaming".bright_white().bold());
    println!();
    println!("This demo shows a session that:");
    println!("  • {} every stream before submitting it", "Checks".bright_green());
    println!("  • {} the highest-reputation agent", "Selects".bright_green());
    println!("  • {} rejected intents off the ledger", "Keeps".bright_green());

    let account = Address::parse(DEMO_ACCOUNT)?;
    let ledger = seeded_ledger(&config, &account).await;
    let mut console = StreamConsole::new(config, ledger);

    display::section("Step 1: Connect");
    display::success(&console.connect(DEMO_ACCOUNT)?);
    let token = console.select_preset("fDAIx")?.clone();
    display::info(&format!("Selected fDAIx at {}", token.checksummed()));

    display::section("Step 2: Stream before approval");
    report(console.create_stream(DEMO_RECEIVER, &flow_rate.to_string()).await, |_| {});

    display::section("Step 3: Approve and upgrade");
    report(console.approve_token().await, |receipt| {
        display::success("Token approval successful! You can now create streams.");
        display::kv("Tx", &receipt.tx_hash);
    });
    report(console.upgrade("0.001").await, |_| {
        display::success("Successfully upgraded 0.001 tokens to Super Token!");
    });
    report(console.check_balance_and_allowance().await, |report| {
        display::info(&report.to_string());
    });

    display::section("Step 4: Stream beyond the one-hour buffer");
    let oversized = TokenAmount::from(flow_rate).scaled(1_000_000_000_000);
    report(
        console.create_stream(DEMO_RECEIVER, &oversized.to_string()).await,
        |_| {},
    );

    display::section("Step 5: Stream to a direct receiver");
    report(
        console.create_stream(DEMO_RECEIVER, &flow_rate.to_string()).await,
        |receipt| {
            display::success("The stream has been created successfully.");
            display::kv("Tx", &receipt.tx_hash);
        },
    );
    report(
        console.create_stream(DEMO_RECEIVER, &flow_rate.to_string()).await,
        |_| {},
    );

    display::section("Step 6: Register agents and stream to the best");
    for (name, address, score, active) in DEMO_AGENTS {
        let agent = Counterparty::new(Address::parse(address)?, score).with_name(name);
        let agent = if active { agent } else { agent.inactive() };
        console.register_agent(agent).await?;
        display::kv(name, &format!("score {}{}", score, if active { "" } else { " (inactive)" }));
    }
    report(console.stream_to_best_agent(&flow_rate.to_string()).await, |opened| {
        display::success(&format!(
            "Streaming {}/s to {} (score {})",
            flow_rate,
            opened.agent.label(),
            opened.agent.reputation_score
        ));
    });

    display::section("Step 7: Create a pool");
    report(console.create_pool(DEMO_ACCOUNT).await, |created| {
        display::success(&format!("Pool created successfully at {}", created.pool.checksummed()));
    });

    println!();
    display::warning("Agent selection ranks by score only; inactive agents are not skipped.");
    display::info("Use `streampilot select --active-only` to rank active agents only.");
    Ok(())
}
