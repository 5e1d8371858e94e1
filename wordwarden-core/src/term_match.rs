// wordwarden-core/src/term_match.rs
//! Provides core data structures and utility functions for candidate matches
//! and content-safe logging within the `wordwarden-core` library.

use serde::{Serialize, Deserialize};
use log::debug;
use crate::patterns::compiler::PatternKind;

use lazy_static::lazy_static;

lazy_static! {
    /// A static boolean that is initialized once to determine if matched
    /// message content is allowed in debug logs.
    static ref CONTENT_DEBUG_ALLOWED: bool = {
        std::env::var("WORDWARDEN_ALLOW_DEBUG_CONTENT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One candidate occurrence of a banned term inside a message.
///
/// Offsets are half-open byte offsets into the original text. `replacement`
/// starts as the owning rule's base replacement and is finalized (case and
/// plural agreement) before overlap resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMatch {
    /// Byte offset where the match starts in the original text.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
    /// The matched slice of the original text.
    pub text: String,
    /// The canonical term whose pattern produced this candidate.
    pub term: String,
    /// Which pattern kind matched.
    pub kind: PatternKind,
    /// The replacement text to splice in for this candidate.
    pub replacement: String,
}

impl TermMatch {
    /// Whether this match shares at least one byte with the given span.
    pub fn overlaps_span(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Whether two matches share at least one byte.
    pub fn overlaps(&self, other: &TermMatch) -> bool {
        self.overlaps_span(other.start, other.end)
    }
}

/// A content-free stand-in for message text in log lines.
pub fn redact_content(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[CONTENT]".to_string()
    } else {
        format!("[CONTENT: {} chars]", s.len())
    }
}

fn loggable(content: &str) -> String {
    if *CONTENT_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_content(content)
    }
}

pub fn log_candidate_debug(module_path: &str, term: &str, matched_text: &str) {
    debug!(
        "{} Candidate for term '{}': '{}'",
        module_path,
        term,
        loggable(matched_text)
    );
}

pub fn log_replacement_debug(
    module_path: &str,
    term: &str,
    matched_text: &str,
    replacement: &str,
) {
    debug!(
        "{} Replacing match for term '{}': '{}' -> '{}'",
        module_path,
        term,
        loggable(matched_text),
        replacement
    );
}
