// wordwarden-core/src/validators.rs
//! Candidate validation: exemption suppression and evasion-quality checks.
//!
//! The evasion patterns are deliberately aggressive; this module is where
//! their over-reach gets reined in. Exact-kind candidates only face the
//! exemption check. All thresholds are tunable policy, not invariants.
//! License: MIT OR APACHE 2.0

use log::debug;
use std::collections::{HashMap, HashSet};

use crate::ruleset::RuleSet;
use crate::term_match::TermMatch;

/// Tunable thresholds for the evasion-quality heuristics.
#[derive(Debug, Clone)]
pub struct QualityThresholds {
    /// Minimum share of a candidate's alphanumeric characters that must
    /// appear somewhere in the term's character set.
    pub min_overlap: f64,
    /// How many alphanumeric characters longer than the term a candidate may
    /// run before the excess must be explained as stretching.
    pub max_excess: usize,
    /// Allowed length difference between the two sides after collapsing
    /// consecutive repeats.
    pub collapse_tolerance: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self { min_overlap: 0.5, max_excess: 2, collapse_tolerance: 2 }
    }
}

/// Filters candidates down to the set worth replacing.
///
/// Drops any candidate whose span shares at least one byte with an occurrence
/// of an exemption phrase belonging to its rule, then drops evasion-kind
/// candidates that fail [`passes_quality`]. Survivors come back sorted by
/// ascending start offset.
pub fn validate(
    candidates: Vec<TermMatch>,
    rules: &RuleSet,
    text: &str,
    thresholds: &QualityThresholds,
) -> Vec<TermMatch> {
    // Exemption occurrences are located once per term, not once per candidate.
    let mut exemption_spans: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
    let mut kept = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let spans = exemption_spans
            .entry(candidate.term.clone())
            .or_insert_with(|| exemption_occurrences(rules, &candidate.term, text));
        if spans.iter().any(|&(start, end)| candidate.overlaps_span(start, end)) {
            debug!(
                "Candidate for term '{}' at {}..{} suppressed by exemption",
                candidate.term, candidate.start, candidate.end
            );
            continue;
        }
        if candidate.kind.is_evasion() && !passes_quality(&candidate.text, &candidate.term, thresholds)
        {
            debug!(
                "Candidate for term '{}' at {}..{} failed the quality check",
                candidate.term, candidate.start, candidate.end
            );
            continue;
        }
        kept.push(candidate);
    }

    kept.sort_by_key(|m| (m.start, m.end));
    kept
}

/// Every span covered by an exemption phrase of the rule owning `term`.
fn exemption_occurrences(rules: &RuleSet, term: &str, text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    for matcher in rules.exemption_matchers_for_term(term) {
        for found in matcher.find_iter(text) {
            spans.push((found.start(), found.end()));
        }
    }
    spans
}

/// Judges whether an evasion-kind match plausibly spells its term.
///
/// Working on the lowercase alphanumeric characters of both sides: the match
/// must draw at least `min_overlap` of its characters from the term's
/// character set, and a match more than `max_excess` characters longer than
/// the term is only kept when stretching explains the excess (collapsing
/// consecutive repeats brings the lengths within `collapse_tolerance`, or
/// every character the match repeats consecutively also repeats somewhere in
/// the term). Counts are characters, not bytes.
pub fn passes_quality(matched: &str, term: &str, thresholds: &QualityThresholds) -> bool {
    let match_chars = clean_chars(matched);
    let term_chars = clean_chars(term);
    if match_chars.is_empty() || term_chars.is_empty() {
        return false;
    }

    let term_set: HashSet<char> = term_chars.iter().copied().collect();
    let in_term = match_chars.iter().filter(|c| term_set.contains(c)).count();
    if (in_term as f64) < thresholds.min_overlap * match_chars.len() as f64 {
        return false;
    }

    if match_chars.len() > term_chars.len() + thresholds.max_excess {
        return stretch_explains_excess(&match_chars, &term_chars, thresholds.collapse_tolerance);
    }

    true
}

/// The lowercase alphanumeric characters of a string, in order.
fn clean_chars(s: &str) -> Vec<char> {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn stretch_explains_excess(match_chars: &[char], term_chars: &[char], tolerance: usize) -> bool {
    let collapsed_match = collapse_runs(match_chars);
    let collapsed_term = collapse_runs(term_chars);
    if collapsed_match.len().abs_diff(collapsed_term.len()) <= tolerance {
        return true;
    }
    let term_repeats = consecutive_repeats(term_chars);
    consecutive_repeats(match_chars)
        .iter()
        .all(|c| term_repeats.contains(c))
}

/// Collapses runs of the same character: "shooooe" -> "shoe".
fn collapse_runs(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    for &c in chars {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}

/// The set of characters that appear at least twice in a row.
fn consecutive_repeats(chars: &[char]) -> HashSet<char> {
    chars.windows(2).filter(|w| w[0] == w[1]).map(|w| w[0]).collect()
}
