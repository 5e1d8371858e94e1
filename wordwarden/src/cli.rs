// wordwarden/src/cli.rs
//! This file defines the command-line interface (CLI) for the wordwarden application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "wordwarden",
    author = "Obscura Tech",
    version = env!("CARGO_PKG_VERSION"),
    about = "Filter banned terms and their creative spellings out of text",
    long_about = "Wordwarden is a command-line utility for filtering banned terms out of free-form text. It detects exact occurrences as well as deliberate evasions (letter substitution, wildcarding, spacing-out, character stretching) and rewrites each one to the replacement its rule names, preserving capitalization and basic pluralization. Rules live in per-community JSON files and can be managed with the `rules` subcommand suite.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for this run)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// Directory holding per-community rule files.
    #[arg(
        long = "config-dir",
        value_name = "DIR",
        env = "WORDWARDEN_CONFIG_DIR",
        global = true,
        help = "Directory holding per-community rule files (<community>.json)."
    )]
    pub config_dir: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `wordwarden` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filters a message, replacing banned terms and their evasions.
    #[command(about = "Filters a message, replacing banned terms and their evasions.")]
    Filter(FilterCommand),

    /// Provides a suite of tools for managing a community's rules.
    #[command(subcommand, about = "Provides a suite of tools for managing a community's rules.")]
    Rules(RulesCommand),
}

/// Arguments for the `filter` command.
#[derive(Parser, Debug)]
pub struct FilterCommand {
    /// The message text to filter (reads from stdin if not provided).
    #[arg(value_name = "TEXT", help = "The message text to filter (reads stdin when omitted).")]
    pub text: Option<String>,

    /// The community whose rules apply.
    #[arg(
        long,
        short = 'c',
        value_name = "ID",
        default_value_t = 0,
        help = "The community whose rules apply."
    )]
    pub community: u64,

    /// Path to a rules JSON file, bypassing the configuration directory.
    #[arg(
        long = "rules",
        value_name = "FILE",
        help = "Path to a rules JSON file, bypassing the configuration directory."
    )]
    pub rules: Option<PathBuf>,

    /// Print the accepted matches as JSON after the filtered text.
    #[arg(long = "matches", help = "Print the accepted matches as JSON after the filtered text.")]
    pub matches: bool,
}

/// Subcommands for the `rules` command.
#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    #[command(about = "Lists every rule configured for a community.")]
    List {
        /// The community whose rules to list.
        #[arg(long, short = 'c', value_name = "ID", default_value_t = 0, help = "The community whose rules to list.")]
        community: u64,
    },
    #[command(about = "Bans words under a replacement, creating the rule as needed.")]
    Add {
        /// The replacement text the banned words map to.
        #[arg(value_name = "REPLACEMENT", help = "The replacement text the banned words map to.")]
        replacement: String,
        /// The words to ban.
        #[arg(value_name = "WORD", required = true, num_args = 1.., help = "The words to ban.")]
        words: Vec<String>,
        /// The community whose rules to edit.
        #[arg(long, short = 'c', value_name = "ID", default_value_t = 0, help = "The community whose rules to edit.")]
        community: u64,
    },
    #[command(about = "Unbans a word, or removes a whole rule with --rule.")]
    Remove {
        /// The word to unban.
        #[arg(value_name = "WORD", required_unless_present = "rule", conflicts_with = "rule", help = "The word to unban.")]
        word: Option<String>,
        /// Remove the entire rule owning this replacement instead.
        #[arg(long = "rule", value_name = "REPLACEMENT", help = "Remove the entire rule owning this replacement instead.")]
        rule: Option<String>,
        /// The community whose rules to edit.
        #[arg(long, short = 'c', value_name = "ID", default_value_t = 0, help = "The community whose rules to edit.")]
        community: u64,
    },
    #[command(about = "Adds an exemption phrase to a rule (or removes one with --remove).")]
    Exempt {
        /// The replacement text owning the rule to edit.
        #[arg(value_name = "REPLACEMENT", help = "The replacement text owning the rule to edit.")]
        replacement: String,
        /// The exemption phrase.
        #[arg(value_name = "PHRASE", help = "The exemption phrase.")]
        phrase: String,
        /// Remove the phrase instead of adding it.
        #[arg(long, help = "Remove the exemption phrase instead of adding it.")]
        remove: bool,
        /// The community whose rules to edit.
        #[arg(long, short = 'c', value_name = "ID", default_value_t = 0, help = "The community whose rules to edit.")]
        community: u64,
    },
}
