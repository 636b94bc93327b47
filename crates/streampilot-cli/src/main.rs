//! StreamPilot CLI - Reputation-aware token streaming
//!
//! Pre-flight checks and agent selection run locally; no wallet is needed.
//! The `demo` command drives a full session against an in-memory ledger.
//!
//! # Quick Start
//!
//! ```bash
//! streampilot check --sender 0xA... --receiver 0xB... --flow-rate 1 \
//!     --balance 10000 --allowance 100
//! streampilot select --agents agents.json --active-only
//! streampilot tokens
//! streampilot demo --flow-rate 100
//! ```

use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::{check, demo, select, tokens};
use streampilot_console::ConsoleConfig;

/// StreamPilot CLI - Pre-flight checks for token streams
#[derive(Parser)]
#[command(name = "streampilot")]
#[command(author = "StreamPilot Contributors")]
#[command(version)]
#[command(about = "Admission checks and agent selection for per-second token streams", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate whether a stream may be attempted
    Check {
        /// Sending account
        #[arg(long)]
        sender: String,

        /// Receiving account
        #[arg(long)]
        receiver: String,

        /// Flow rate in smallest units per second
        #[arg(long)]
        flow_rate: String,

        /// Sender balance in smallest units
        #[arg(long)]
        balance: String,

        /// Allowance granted to the flow forwarder, in smallest units
        #[arg(long)]
        allowance: String,

        /// Rate of an existing stream between the pair
        #[arg(long, default_value = "0")]
        existing_flow_rate: String,
    },

    /// Pick the counterparty with the highest reputation
    Select {
        /// Counterparty list (JSON file path or inline JSON array)
        #[arg(long)]
        agents: String,

        /// Ignore inactive counterparties
        #[arg(long)]
        active_only: bool,
    },

    /// List preset super tokens and forwarder contracts
    Tokens,

    /// Run a full session against an in-memory ledger
    Demo {
        /// Flow rate in smallest units per second
        #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
        flow_rate: u64,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ConsoleConfig::from_env()?;

    match cli.command {
        Commands::Check {
            sender,
            receiver,
            flow_rate,
            balance,
            allowance,
            existing_flow_rate,
        } => {
            check::run_check(
                check::CheckArgs {
                    sender,
                    receiver,
                    flow_rate,
                    balance,
                    allowance,
                    existing_flow_rate,
                },
                cli.json,
            )?;
        }
        Commands::Select { agents, active_only } => {
            select::run_select(&agents, active_only, cli.json)?;
        }
        Commands::Tokens => {
            tokens::list_tokens(&config);
        }
        Commands::Demo { flow_rate } => {
            print_banner();
            demo::run_demo(config, flow_rate).await?;
        }
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!("{}", "╔══════════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}{}{}",
        "║  ".bright_cyan(),
        "StreamPilot".bright_white().bold(),
        " - Per-second streams with pre-flight checks           ║".bright_cyan()
    );
    println!("{}", "╚══════════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
