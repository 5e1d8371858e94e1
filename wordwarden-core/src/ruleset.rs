//! Compiled rule sets.
//!
//! A [`RuleSet`] is the queryable form of a community's [`FilterConfig`]:
//! every banned term resolves to exactly one owning rule, and every
//! exemption phrase is pre-compiled into a case-insensitive literal matcher.
//! Rule sets are rebuilt wholesale from configuration and never edited in
//! place; holders of an old snapshot keep a consistent view.
//!
//! License: MIT OR Apache-2.0

use crate::config::{FilterConfig, FilterRule};
use log::warn;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// Upper bound on the compiled size of an exemption matcher.
const EXEMPTION_SIZE_LIMIT: usize = 1 << 20;

/// A compiled, immutable view of one community's rules.
///
/// Terms are held in a `BTreeMap` so iteration order (and therefore candidate
/// production order downstream) is deterministic rather than an accident of
/// hash order.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<FilterRule>,
    /// term -> index into `rules`. One owner per term.
    term_owner: BTreeMap<String, usize>,
    /// Parallel to `rules`: compiled matchers for each rule's exemptions.
    exemption_matchers: Vec<Vec<Regex>>,
}

impl RuleSet {
    /// An empty rule set. Scanning against it yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compiles a configuration into a rule set.
    ///
    /// Malformed pieces (empty replacement, empty term) are skipped with a
    /// warning rather than failing the build. When two rules claim the same
    /// term, the rule with the lexicographically later replacement wins;
    /// rules are visited in replacement order, so the policy is stable.
    pub fn compile(config: &FilterConfig) -> Self {
        let mut rules: Vec<FilterRule> = Vec::new();
        let mut term_owner = BTreeMap::new();
        let mut exemption_matchers = Vec::new();

        for rule in config.rules() {
            if rule.replacement.is_empty() {
                warn!("Skipping rule with empty replacement text");
                continue;
            }
            let index = rules.len();
            let mut claimed_any = false;
            for term in &rule.terms {
                if term.is_empty() {
                    warn!("Rule '{}': skipping empty term", rule.replacement);
                    continue;
                }
                if let Some(prev) = term_owner.insert(term.clone(), index) {
                    warn!(
                        "Term '{}' moved from rule '{}' to rule '{}'",
                        term, rules[prev].replacement, rule.replacement
                    );
                }
                claimed_any = true;
            }
            if !claimed_any {
                warn!("Rule '{}': no usable terms, skipping", rule.replacement);
                continue;
            }
            exemption_matchers.push(compile_exemptions(rule));
            rules.push(rule.clone());
        }

        RuleSet { rules, term_owner, exemption_matchers }
    }

    /// Number of banned terms across all rules.
    pub fn term_count(&self) -> usize {
        self.term_owner.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_owner.is_empty()
    }

    /// Iterates `(term, owning rule)` pairs in lexicographic term order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &FilterRule)> {
        self.term_owner
            .iter()
            .map(|(term, &idx)| (term.as_str(), &self.rules[idx]))
    }

    /// The rule owning a term, if any.
    pub fn rule_for_term(&self, term: &str) -> Option<&FilterRule> {
        self.term_owner.get(term).map(|&idx| &self.rules[idx])
    }

    /// Compiled matchers for the exemption phrases of the rule owning `term`.
    /// Empty when the term is unknown or its rule has no exemptions.
    pub fn exemption_matchers_for_term(&self, term: &str) -> &[Regex] {
        self.term_owner
            .get(term)
            .map(|&idx| self.exemption_matchers[idx].as_slice())
            .unwrap_or(&[])
    }
}

/// Builds one case-insensitive literal matcher per exemption phrase.
/// Literal patterns only fail compilation at the size limit; such phrases are
/// dropped with a warning.
fn compile_exemptions(rule: &FilterRule) -> Vec<Regex> {
    let mut matchers = Vec::with_capacity(rule.exemptions.len());
    for phrase in &rule.exemptions {
        match RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .size_limit(EXEMPTION_SIZE_LIMIT)
            .build()
        {
            Ok(re) => matchers.push(re),
            Err(e) => warn!(
                "Rule '{}': dropping unusable exemption '{}': {}",
                rule.replacement, phrase, e
            ),
        }
    }
    matchers
}
