//! compiler.rs - Synthesis and caching of evasion-tolerant term patterns.
//!
//! This module provides a thread-safe, cached mechanism to convert a banned
//! term into its [`CompiledPattern`] set, optimized for repeated scanning.
//! It uses a global, shared cache so the same term is never compiled twice
//! within the cache's time bound.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::errors::WordwardenError;

/// Maximum allowed length for a synthesized pattern string.
pub const MAX_PATTERN_LENGTH: usize = 2000;

/// Upper bound on the compiled size of a single pattern.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Terms shorter than this (in characters) get the exact pattern only.
/// Evasion patterns over one or two letters match far too much to be useful.
pub const MIN_EVASION_TERM_LEN: usize = 3;

/// How long synthesized patterns stay cached. Synthesis is deterministic, so
/// expiry is a memory bound rather than a correctness concern.
pub const PATTERN_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Generic filler symbols an evader may substitute for interior letters.
const FILLER_CLASS: &str = r"[*.\-_#!?+=]";

/// Digits and symbols commonly substituted for each letter.
static LEET_SUBSTITUTIONS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('a', "4@"),
        ('e', "3"),
        ('i', "1!"),
        ('o', "0"),
        ('s', "5$"),
        ('t', "7+"),
    ])
});

/// Which synthesis strategy produced a pattern. Ordering matters: the exact
/// kind sorts first and wins deterministic tie-breaks downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Whole-word literal match with an optional plural `s`.
    Exact,
    /// Letter substitution plus interior wildcard fillers.
    Leetspeak,
    /// Letters separated by runs of whitespace or punctuation.
    Spaced,
}

impl PatternKind {
    /// True for the kinds whose matches must pass the quality heuristics.
    pub fn is_evasion(self) -> bool {
        !matches!(self, PatternKind::Exact)
    }
}

/// A single compiled pattern for one banned term.
///
/// Immutable once built; shared behind `Arc` through the pattern cache.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The canonical term this pattern hunts for.
    pub term: String,
    /// The synthesis strategy that produced this pattern.
    pub kind: PatternKind,
}

struct CacheSlot {
    patterns: Arc<Vec<CompiledPattern>>,
    built_at: Instant,
}

lazy_static! {
    /// A thread-safe, global cache of synthesized patterns, keyed by term.
    static ref PATTERN_CACHE: RwLock<HashMap<String, CacheSlot>> = RwLock::new(HashMap::new());
}

/// Gets the pattern set for a term from the cache, synthesizing on a miss or
/// an expired entry.
///
/// Concurrent misses may both synthesize; the results are identical and the
/// last writer wins, so no coordination is needed here.
pub fn patterns_for(term: &str) -> Arc<Vec<CompiledPattern>> {
    {
        let cache = PATTERN_CACHE.read().unwrap();
        if let Some(slot) = cache.get(term) {
            if slot.built_at.elapsed() < PATTERN_CACHE_TTL {
                return Arc::clone(&slot.patterns);
            }
        }
    } // Read lock is released here.

    debug!("Synthesizing patterns for term '{}'", term);
    let patterns = Arc::new(synthesize(term));
    PATTERN_CACHE.write().unwrap().insert(
        term.to_string(),
        CacheSlot { patterns: Arc::clone(&patterns), built_at: Instant::now() },
    );
    patterns
}

/// Drops expired cache entries. Purely a memory bound; never required for
/// correct results.
pub fn purge_expired() {
    PATTERN_CACHE
        .write()
        .unwrap()
        .retain(|_, slot| slot.built_at.elapsed() < PATTERN_CACHE_TTL);
}

/// Synthesizes the full pattern set for a term: the exact whole-word pattern
/// always, plus the leetspeak and spaced patterns for terms of at least
/// [`MIN_EVASION_TERM_LEN`] characters.
///
/// A pattern the regex engine refuses (length or size limits) is dropped
/// with a warning; the remaining patterns still apply. Synthesis never fails
/// outright.
pub fn synthesize(term: &str) -> Vec<CompiledPattern> {
    let mut patterns = Vec::with_capacity(3);

    match build(term, &exact_pattern(term), PatternKind::Exact) {
        Ok(p) => patterns.push(p),
        Err(e) => warn!("Term '{}': dropping exact pattern: {}", term, e),
    }

    if term.chars().count() >= MIN_EVASION_TERM_LEN {
        match build(term, &leet_pattern(term), PatternKind::Leetspeak) {
            Ok(p) => patterns.push(p),
            Err(e) => warn!("Term '{}': dropping leetspeak pattern: {}", term, e),
        }
        match build(term, &spaced_pattern(term), PatternKind::Spaced) {
            Ok(p) => patterns.push(p),
            Err(e) => warn!("Term '{}': dropping spaced pattern: {}", term, e),
        }
    }

    patterns
}

fn build(term: &str, pattern: &str, kind: PatternKind) -> Result<CompiledPattern, WordwardenError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(WordwardenError::PatternLengthExceeded(
            term.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map(|regex| CompiledPattern { regex, term: term.to_string(), kind })
        .map_err(|e| WordwardenError::PatternCompilationError(term.to_string(), e))
}

/// `\bterms?\b`: the literal term as a whole word, tolerating a plural `s`.
fn exact_pattern(term: &str) -> String {
    format!(r"\b{}s?\b", regex::escape(term))
}

/// One character class per term letter, each admitting the letter's leet
/// substitutions and repetition (so stretched spellings still land here).
/// Interior positions may instead be a run of generic filler symbols; the
/// first and last letters must appear, or fragments like `s*` would match.
/// An optional trailing run of the `s` class absorbs plural evasions.
fn leet_pattern(term: &str) -> String {
    let chars: Vec<char> = term.chars().collect();
    let last = chars.len() - 1;
    let mut pattern = String::new();
    for (i, &c) in chars.iter().enumerate() {
        let class = format!("{}+", leet_class(c));
        if i == 0 || i == last {
            pattern.push_str(&class);
        } else {
            pattern.push_str("(?:");
            pattern.push_str(&class);
            pattern.push('|');
            pattern.push_str(FILLER_CLASS);
            pattern.push_str("+)");
        }
    }
    pattern.push_str(r"(?:[s5$]+)?");
    pattern
}

/// Each term letter (repeatable) separated by optional runs of non-word
/// characters, catching `s h o e`, `s.h.o.e`, and the like. No word
/// boundaries: spaced spellings live inside what the host considers one or
/// many tokens, and the per-rule whitelist is the tool for the false
/// positives this admits.
fn spaced_pattern(term: &str) -> String {
    let mut pattern = String::new();
    for (i, c) in term.chars().enumerate() {
        if i > 0 {
            pattern.push_str(r"\W*");
        }
        pattern.push_str(&regex::escape(&c.to_string()));
        pattern.push('+');
    }
    pattern.push_str(r"(?:\W*s+)?");
    pattern
}

/// A character class matching `c` or any of its leet substitutions.
fn leet_class(c: char) -> String {
    let mut class = String::from("[");
    class.push_str(&regex::escape(&c.to_string()));
    if let Some(subs) = LEET_SUBSTITUTIONS.get(&c.to_ascii_lowercase()) {
        for sub in subs.chars() {
            class.push_str(&regex::escape(&sub.to_string()));
        }
    }
    class.push(']');
    class
}
