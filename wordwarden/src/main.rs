// wordwarden/src/main.rs
//! Wordwarden entry point.
//!
//! Parses the CLI, wires up logging, and dispatches to the command
//! implementations.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use wordwarden::cli::{Cli, Commands};
use wordwarden::commands::{filter, rules};
use wordwarden::logger;

/// Where rule files live when neither `--config-dir` nor
/// `WORDWARDEN_CONFIG_DIR` says otherwise.
const DEFAULT_CONFIG_DIR: &str = "configs";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }
    info!("wordwarden started. Version: {}", env!("CARGO_PKG_VERSION"));

    let config_dir = args
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

    match &args.command {
        Commands::Filter(cmd) => filter::run_filter(cmd, &config_dir).await,
        Commands::Rules(cmd) => rules::run_rules(cmd, &config_dir),
    }
}
