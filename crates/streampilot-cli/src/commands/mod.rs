//! CLI subcommands

pub mod check;
pub mod demo;
pub mod select;
pub mod tokens;
