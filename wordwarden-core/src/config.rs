//! Rule model for `Wordwarden-core`.
//!
//! This module defines the core data structures for banned-term rules.
//! It handles serialization/deserialization of the rule-file shape and
//! provides utilities for normalizing and editing rule collections.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies the community (guild, room, tenant) a rule set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CommunityId(pub u64);

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CommunityId {
    fn from(id: u64) -> Self {
        CommunityId(id)
    }
}

/// The value side of a rule entry as it appears on the wire: either a single
/// word, a list of words, or a detailed form carrying a whitelist.
///
/// The bare forms are the legacy shape; saving always writes the detailed
/// form back out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RuleEntry {
    Detailed {
        #[serde(default)]
        words: WordsField,
        #[serde(default)]
        whitelist: Vec<String>,
    },
    Bare(WordsField),
}

/// One word or many. Both spellings are accepted everywhere a word list is
/// expected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WordsField {
    One(String),
    Many(Vec<String>),
}

impl Default for WordsField {
    fn default() -> Self {
        WordsField::Many(Vec::new())
    }
}

impl WordsField {
    fn into_vec(self) -> Vec<String> {
        match self {
            WordsField::One(word) => vec![word],
            WordsField::Many(words) => words,
        }
    }
}

/// A single filtering rule: one replacement string owning the banned terms it
/// stands in for, plus exemption phrases that suppress matches overlapping
/// them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterRule {
    /// The text substituted for every match of this rule's terms.
    pub replacement: String,
    /// Canonical banned terms, lowercase.
    pub terms: Vec<String>,
    /// Phrases whose occurrences shield overlapping matches (case-insensitive).
    pub exemptions: Vec<String>,
}

/// The decoded rule collection for one community: a mapping from replacement
/// text to the rule that owns it.
///
/// Groups are kept in lexicographic replacement order so every derived
/// structure (and every conflict resolution) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "BTreeMap<String, RuleEntry>", into = "BTreeMap<String, RuleEntry>")]
pub struct FilterConfig {
    rules: BTreeMap<String, FilterRule>,
}

impl From<BTreeMap<String, RuleEntry>> for FilterConfig {
    fn from(entries: BTreeMap<String, RuleEntry>) -> Self {
        let mut rules = BTreeMap::new();
        for (replacement, entry) in entries {
            let (words, whitelist) = match entry {
                RuleEntry::Detailed { words, whitelist } => (words, whitelist),
                RuleEntry::Bare(words) => (words, Vec::new()),
            };
            let terms = normalize_terms(words.into_vec());
            let exemptions = normalize_phrases(whitelist);
            let replacement = replacement.trim().to_string();
            rules.insert(
                replacement.clone(),
                FilterRule { replacement, terms, exemptions },
            );
        }
        FilterConfig { rules }
    }
}

impl From<FilterConfig> for BTreeMap<String, RuleEntry> {
    fn from(config: FilterConfig) -> Self {
        config
            .rules
            .into_iter()
            .map(|(replacement, rule)| {
                (
                    replacement,
                    RuleEntry::Detailed {
                        words: WordsField::Many(rule.terms),
                        whitelist: rule.exemptions,
                    },
                )
            })
            .collect()
    }
}

impl FilterConfig {
    /// Parses a rule collection from its JSON representation.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse rule configuration")
    }

    /// Renders the collection as pretty-printed JSON in the canonical
    /// (detailed) shape, regardless of the shape it was loaded from.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize rule configuration")
    }

    /// Iterates rules in lexicographic replacement order.
    pub fn rules(&self) -> impl Iterator<Item = &FilterRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up the rule owned by a replacement string.
    pub fn get(&self, replacement: &str) -> Option<&FilterRule> {
        self.rules.get(replacement.trim())
    }

    /// Adds words under a replacement, creating the rule if absent. Words
    /// already present (after normalization) are ignored. Returns how many
    /// terms were actually added.
    pub fn add_terms<I>(&mut self, replacement: &str, words: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let replacement = replacement.trim().to_string();
        if replacement.is_empty() {
            return 0;
        }
        let rule = self
            .rules
            .entry(replacement.clone())
            .or_insert_with(|| FilterRule {
                replacement,
                terms: Vec::new(),
                exemptions: Vec::new(),
            });
        let mut added = 0;
        for word in normalize_terms(words.into_iter().collect()) {
            if !word.is_empty() && !rule.terms.contains(&word) {
                rule.terms.push(word);
                added += 1;
            }
        }
        added
    }

    /// Removes a banned term wherever it appears. A rule whose last term is
    /// removed is dropped entirely. Returns `true` if anything changed.
    pub fn remove_term(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        let mut changed = false;
        self.rules.retain(|_, rule| {
            let before = rule.terms.len();
            rule.terms.retain(|t| *t != word);
            if rule.terms.len() != before {
                changed = true;
            }
            !rule.terms.is_empty()
        });
        changed
    }

    /// Removes an entire rule by its replacement string.
    pub fn remove_rule(&mut self, replacement: &str) -> bool {
        self.rules.remove(replacement.trim()).is_some()
    }

    /// Adds an exemption phrase to the rule owning `replacement`. Returns
    /// `false` if no such rule exists or the phrase is already present.
    pub fn add_exemption(&mut self, replacement: &str, phrase: &str) -> bool {
        let phrase = phrase.trim().to_string();
        if phrase.is_empty() {
            return false;
        }
        match self.rules.get_mut(replacement.trim()) {
            Some(rule) if !rule.exemptions.contains(&phrase) => {
                rule.exemptions.push(phrase);
                true
            }
            _ => false,
        }
    }

    /// Removes an exemption phrase from the rule owning `replacement`.
    pub fn remove_exemption(&mut self, replacement: &str, phrase: &str) -> bool {
        let phrase = phrase.trim();
        match self.rules.get_mut(replacement.trim()) {
            Some(rule) => {
                let before = rule.exemptions.len();
                rule.exemptions.retain(|e| e != phrase);
                rule.exemptions.len() != before
            }
            None => false,
        }
    }
}

/// Canonicalizes banned terms: trimmed, lowercased, deduplicated, order kept.
/// Empty strings survive here so the rule-set build can report them.
fn normalize_terms(words: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let word = word.trim().to_lowercase();
        if !out.contains(&word) {
            out.push(word);
        }
    }
    out
}

/// Exemption phrases keep their case (matching is case-insensitive anyway)
/// but are trimmed and deduplicated.
fn normalize_phrases(phrases: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(phrases.len());
    for phrase in phrases {
        let phrase = phrase.trim().to_string();
        if !phrase.is_empty() && !out.contains(&phrase) {
            out.push(phrase);
        }
    }
    out
}
