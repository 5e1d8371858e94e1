// File: wordwarden-core/src/headless.rs

//! headless.rs - Convenience wrappers for one-shot filtering without a cache
//! or store. Useful for tools, tests, and embedders that hold rules in memory.

use anyhow::Result;
use crate::config::FilterConfig;
use crate::engine::{filter_with_rules, FilterOptions, FilterOutcome};
use crate::ruleset::RuleSet;

/// Filters a single piece of text against an in-memory rule configuration.
///
/// Compiles the rule set on every call; hosts with message traffic should
/// hold a `FilterEngine` (and its cache) instead.
pub fn filter_text(config: &FilterConfig, text: &str) -> FilterOutcome {
    let rules = RuleSet::compile(config);
    filter_with_rules(text, &rules, &FilterOptions::default())
}

/// Like [`filter_text`], starting from the JSON rule shape.
pub fn filter_json_rules(rules_json: &str, text: &str) -> Result<FilterOutcome> {
    let config = FilterConfig::from_json_str(rules_json)?;
    Ok(filter_text(&config, text))
}
