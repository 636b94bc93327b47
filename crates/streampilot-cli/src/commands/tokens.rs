//! Tokens command - Show presets and forwarder contracts

use colored::*;
use streampilot_console::ConsoleConfig;

use crate::display;

pub fn list_tokens(config: &ConsoleConfig) {
    display::section("Super Tokens");
    for token in &config.super_tokens {
        println!(
            "  {:<8} {}",
            token.name.bright_cyan(),
            token.address.checksummed()
        );
    }

    display::section("Forwarders");
    display::kv("Flow (CFA)", &config.cfa_forwarder.checksummed());
    display::kv("Pool (GDA)", &config.gda_forwarder.checksummed());
}
