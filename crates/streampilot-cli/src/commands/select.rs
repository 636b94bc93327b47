//! Select command - Pick the highest-reputation counterparty

use colored::*;
use std::fs;
use streampilot_guard::{rank, select_best, select_best_active};
use streampilot_types::Counterparty;

use crate::display;

/// Load a counterparty list from a file path or inline JSON
fn load_counterparties(input: &str) -> anyhow::Result<Vec<Counterparty>> {
    let json = if std::path::Path::new(input).exists() {
        fs::read_to_string(input)?
    } else if input.trim_start().starts_with('[') {
        input.to_string()
    } else {
        anyhow::bail!("Input is neither a valid file path nor a JSON array: {}", input)
    };
    Ok(serde_json::from_str(&json)?)
}

/// Rank counterparties and print the best one
pub fn run_select(input: &str, active_only: bool, json: bool) -> anyhow::Result<()> {
    let counterparties = load_counterparties(input)?;
    let best = if active_only {
        select_best_active(&counterparties)
    } else {
        select_best(&counterparties)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&best)?);
        return Ok(());
    }

    display::section("Agent Selection");
    if counterparties.is_empty() {
        display::warning("No counterparties available");
        return Ok(());
    }

    println!("  {:<4} {:<44} {:>10} {:<8}", "#", "ADDRESS", "SCORE", "ACTIVE");
    println!("  {}", "─".repeat(70));
    for (i, c) in rank(&counterparties).into_iter().enumerate() {
        let active = if c.is_active { "yes".bright_green() } else { "no".bright_red() };
        println!(
            "  {:<4} {:<44} {:>10} {:<8}",
            i + 1,
            c.address.checksummed(),
            c.reputation_score,
            active
        );
    }
    println!();

    match best {
        Some(agent) => {
            display::success(&format!(
                "Best agent: {} (score {})",
                agent.label(),
                agent.reputation_score
            ));
            display::kv("Address", &agent.address.checksummed());
        }
        None => display::warning("No active counterparties available"),
    }
    Ok(())
}
