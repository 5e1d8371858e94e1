// wordwarden/src/commands/mod.rs
//! Command implementations for the `wordwarden` CLI.

pub mod filter;
pub mod rules;
