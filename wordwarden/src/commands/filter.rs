// wordwarden/src/commands/filter.rs
//! Filter command implementation: one message in, the rewritten text out.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use wordwarden_core::cache::RuleCache;
use wordwarden_core::config::CommunityId;
use wordwarden_core::engine::{FilterEngine, FilterOutcome};
use wordwarden_core::headless;

use crate::cli::FilterCommand;
use crate::store::JsonFileStore;

/// Runs the `filter` command.
///
/// The message comes from the positional argument or, when omitted, stdin.
/// Rules come from the community's file under `config_dir` unless `--rules`
/// points at a JSON file directly.
pub async fn run_filter(cmd: &FilterCommand, config_dir: &Path) -> Result<()> {
    info!("Starting filter operation.");
    let text = read_message(cmd)?;

    let outcome = filter_message(cmd, config_dir, &text).await?;
    debug!(
        "Message filtered. Original length: {}, filtered length: {}",
        outcome.original.len(),
        outcome.filtered.len()
    );

    println!("{}", outcome.filtered);
    if cmd.matches {
        let diagnostics = serde_json::to_string_pretty(&outcome.matches)
            .context("Failed to encode match diagnostics")?;
        println!("{diagnostics}");
    }

    info!("Filter operation completed.");
    Ok(())
}

async fn filter_message(
    cmd: &FilterCommand,
    config_dir: &Path,
    text: &str,
) -> Result<FilterOutcome> {
    if let Some(rules_path) = &cmd.rules {
        let rules_json = std::fs::read_to_string(rules_path)
            .with_context(|| format!("Failed to read rules file: {}", rules_path.display()))?;
        return headless::filter_json_rules(&rules_json, text);
    }

    let store = Arc::new(JsonFileStore::new(config_dir));
    let engine = FilterEngine::new(RuleCache::new(store));
    Ok(engine.filter_message(CommunityId(cmd.community), text).await)
}

fn read_message(cmd: &FilterCommand) -> Result<String> {
    match &cmd.text {
        Some(text) => Ok(text.clone()),
        None => {
            debug!("Reading message from stdin...");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;
            Ok(buffer)
        }
    }
}
