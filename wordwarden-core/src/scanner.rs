// wordwarden-core/src/scanner.rs
//! Candidate production: applies every pattern of every banned term to a
//! piece of text.
//! License: MIT OR APACHE 2.0

use crate::patterns::compiler::patterns_for;
use crate::ruleset::RuleSet;
use crate::term_match::{log_candidate_debug, TermMatch};

/// Scans text against the full rule set and returns every raw candidate.
///
/// Exemptions and quality checks are deliberately not applied here; the
/// validator owns them. Candidates carry the owning rule's base replacement,
/// to be finalized by the renderer. Terms iterate in sorted order and
/// patterns in synthesis order, so the output order is deterministic for a
/// given input and rule set.
pub fn scan(text: &str, rules: &RuleSet) -> Vec<TermMatch> {
    let mut candidates = Vec::new();
    for (term, rule) in rules.terms() {
        let patterns = patterns_for(term);
        for pattern in patterns.iter() {
            for found in pattern.regex.find_iter(text) {
                log_candidate_debug(module_path!(), term, found.as_str());
                candidates.push(TermMatch {
                    start: found.start(),
                    end: found.end(),
                    text: found.as_str().to_string(),
                    term: term.to_string(),
                    kind: pattern.kind,
                    replacement: rule.replacement.clone(),
                });
            }
        }
    }
    candidates
}
