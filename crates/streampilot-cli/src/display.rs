//! Display utilities for the CLI

use colored::*;
use streampilot_guard::{AdmissionResult, RejectReason};

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Print a rejection with its code
pub fn rejection(reason: &RejectReason) {
    println!(
        "  {} {} {}",
        "✗".bright_red(),
        reason.to_string().bright_red(),
        format!("[{}]", reason.code()).bright_black()
    );
}

/// Print an admission outcome
pub fn admission(result: &AdmissionResult) {
    match result {
        AdmissionResult::Admit => success("Admitted: the stream may be submitted"),
        AdmissionResult::Reject(reason) => rejection(reason),
    }
}
