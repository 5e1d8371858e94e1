// wordwarden/src/commands/rules.rs
//! Rule management commands: the load/edit/save cycle over the JSON store.
//!
//! Every edit invalidates nothing here; the CLI builds a fresh engine per
//! invocation, so the next `filter` run always sees the saved file.

use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use log::info;
use std::path::Path;

use wordwarden_core::config::CommunityId;

use crate::cli::RulesCommand;
use crate::store::JsonFileStore;

/// Runs one of the `rules` subcommands.
pub fn run_rules(cmd: &RulesCommand, config_dir: &Path) -> Result<()> {
    let store = JsonFileStore::new(config_dir);
    match cmd {
        RulesCommand::List { community } => list_rules(&store, CommunityId(*community)),
        RulesCommand::Add { replacement, words, community } => {
            add_words(&store, CommunityId(*community), replacement, words)
        }
        RulesCommand::Remove { word, rule, community } => {
            remove_entry(&store, CommunityId(*community), word.as_deref(), rule.as_deref())
        }
        RulesCommand::Exempt { replacement, phrase, remove, community } => {
            edit_exemption(&store, CommunityId(*community), replacement, phrase, *remove)
        }
    }
}

fn list_rules(store: &JsonFileStore, community: CommunityId) -> Result<()> {
    let config = store.load_config(community)?;
    if config.is_empty() {
        println!("No rules configured for community {community}.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Replacement", "Banned terms", "Exemptions"]);
    for rule in config.rules() {
        table.add_row(vec![
            Cell::new(&rule.replacement),
            Cell::new(rule.terms.join(", ")),
            Cell::new(rule.exemptions.join(", ")),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn add_words(
    store: &JsonFileStore,
    community: CommunityId,
    replacement: &str,
    words: &[String],
) -> Result<()> {
    let mut config = store.load_config(community)?;
    let added = config.add_terms(replacement, words.iter().cloned());
    if added == 0 {
        println!("Nothing to add; every given word is already banned.");
        return Ok(());
    }
    store.save_config(community, &config)?;
    info!("Added {} term(s) for community {}", added, community);
    println!("Banned {added} word(s) under replacement '{}'.", replacement.trim());
    Ok(())
}

fn remove_entry(
    store: &JsonFileStore,
    community: CommunityId,
    word: Option<&str>,
    rule: Option<&str>,
) -> Result<()> {
    let mut config = store.load_config(community)?;
    match (word, rule) {
        (Some(word), None) => {
            if !config.remove_term(word) {
                bail!("'{}' is not a banned word for community {}", word.trim(), community);
            }
            store.save_config(community, &config)?;
            println!("Unbanned '{}'.", word.trim().to_lowercase());
        }
        (None, Some(rule)) => {
            if !config.remove_rule(rule) {
                bail!("No rule uses replacement '{}' for community {}", rule.trim(), community);
            }
            store.save_config(community, &config)?;
            println!("Removed the rule for replacement '{}'.", rule.trim());
        }
        // clap enforces exactly one of the two.
        _ => bail!("Specify a word to unban or --rule <REPLACEMENT>"),
    }
    Ok(())
}

fn edit_exemption(
    store: &JsonFileStore,
    community: CommunityId,
    replacement: &str,
    phrase: &str,
    remove: bool,
) -> Result<()> {
    if phrase.trim().is_empty() {
        bail!("Exemption phrase cannot be empty");
    }
    let mut config = store.load_config(community)?;
    if config.get(replacement).is_none() {
        bail!("No rule uses replacement '{}' for community {}", replacement.trim(), community);
    }

    if remove {
        if !config.remove_exemption(replacement, phrase) {
            bail!("'{}' is not an exemption for '{}'", phrase.trim(), replacement.trim());
        }
        store.save_config(community, &config)?;
        println!("Removed exemption '{}' from '{}'.", phrase.trim(), replacement.trim());
    } else {
        if !config.add_exemption(replacement, phrase) {
            println!("'{}' is already exempt under '{}'.", phrase.trim(), replacement.trim());
            return Ok(());
        }
        store.save_config(community, &config)?;
        println!("Added exemption '{}' to '{}'.", phrase.trim(), replacement.trim());
    }
    Ok(())
}
