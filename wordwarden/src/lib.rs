// wordwarden/src/lib.rs
//! # Wordwarden CLI Application
//!
//! This crate provides the command-line interface for the wordwarden
//! filtering engine. The filtering semantics live in `wordwarden-core`;
//! this crate owns argument parsing, the on-disk rule store, and output.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod store;

pub use store::JsonFileStore;
