//! Check command - Evaluate a stream intent without touching a ledger

use colored::*;
use streampilot_guard::{evaluate, required_buffer};
use streampilot_types::{Address, StreamIntent, TokenAmount};

use crate::display;

/// Raw command-line inputs for an intent
pub struct CheckArgs {
    pub sender: String,
    pub receiver: String,
    pub flow_rate: String,
    pub balance: String,
    pub allowance: String,
    pub existing_flow_rate: String,
}

impl CheckArgs {
    fn into_intent(self) -> anyhow::Result<StreamIntent> {
        let intent = StreamIntent::new(
            Address::parse(&self.sender)?,
            Address::parse(&self.receiver)?,
            TokenAmount::parse_units_raw(&self.flow_rate)?,
        )
        .with_balance(TokenAmount::parse_units_raw(&self.balance)?)
        .with_allowance(TokenAmount::parse_units_raw(&self.allowance)?)
        .with_existing_flow(TokenAmount::parse_units_raw(&self.existing_flow_rate)?);
        Ok(intent)
    }
}

/// Evaluate an intent and print the outcome
pub fn run_check(args: CheckArgs, json: bool) -> anyhow::Result<()> {
    let intent = args.into_intent()?;
    let result = evaluate(&intent);
    tracing::debug!(outcome = ?result, "Intent evaluated");

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    display::section("Stream Admission Check");
    display::kv("Sender", intent.sender.as_str());
    display::kv("Receiver", intent.receiver.as_str());
    display::kv("Flow rate (/s)", &intent.flow_rate_per_second.to_string());
    display::kv("Balance", &intent.sender_balance.format_ether());
    display::kv("Allowance", &intent.sender_allowance.format_ether());
    display::kv(
        "One-hour buffer",
        &required_buffer(&intent.flow_rate_per_second).format_ether(),
    );
    println!();
    display::admission(&result);

    if !result.is_admitted() {
        println!();
        println!("  {}", "No transaction should be submitted for this intent.".bright_black());
    }
    Ok(())
}
