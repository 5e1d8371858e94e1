// wordwarden-core/src/renderer.rs
//! Replacement rendering: plural agreement, capitalization transfer, and the
//! final splice of accepted matches into the original text.
//! License: MIT OR APACHE 2.0

use crate::term_match::{log_replacement_debug, TermMatch};

/// True when the matched text is a pluralized spelling of its term: it ends
/// with a literal `s` and is strictly longer, in characters, than the term.
/// Irregular plurals are out of scope; they never match the patterns in the
/// first place.
pub fn is_plural(matched: &str, term: &str) -> bool {
    (matched.ends_with('s') || matched.ends_with('S'))
        && matched.chars().count() > term.chars().count()
}

/// Simple English pluralization: city -> cities, bush -> bushes,
/// church -> churches, box -> boxes, cat -> cats.
pub fn pluralize(replacement: &str) -> String {
    if replacement.ends_with('y') {
        format!("{}ies", &replacement[..replacement.len() - 1])
    } else if replacement.ends_with("sh")
        || replacement.ends_with("ch")
        || replacement.ends_with('x')
    {
        format!("{replacement}es")
    } else {
        format!("{replacement}s")
    }
}

/// Transfers the capitalization pattern of `original` onto `replacement`.
///
/// All-uppercase and all-lowercase originals map wholesale; an original with
/// a leading capital and lowercase tail capitalizes the replacement; any
/// other mix is copied position by position, with characters past the
/// original's length lowercased.
pub fn preserve_case(original: &str, replacement: &str) -> String {
    if original.is_empty() || replacement.is_empty() {
        return replacement.to_string();
    }

    if is_upper_str(original) {
        return replacement.to_uppercase();
    }
    if is_lower_str(original) {
        return replacement.to_lowercase();
    }

    let first_is_upper = original.chars().next().is_some_and(char::is_uppercase);
    let rest = &original[original.chars().next().map_or(0, char::len_utf8)..];
    if first_is_upper && (rest.is_empty() || is_lower_str(rest)) {
        return capitalize(replacement);
    }

    let original_chars: Vec<char> = original.chars().collect();
    let mut result = String::with_capacity(replacement.len());
    for (i, ch) in replacement.chars().enumerate() {
        if i < original_chars.len() && original_chars[i].is_uppercase() {
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_lowercase());
        }
    }
    result
}

/// Renders the final replacement for one matched spelling: pluralize first
/// when the match carries a plural tail, then transfer its capitalization
/// onto the (possibly pluralized) replacement.
pub fn render_replacement(matched: &str, term: &str, replacement: &str) -> String {
    if is_plural(matched, term) {
        preserve_case(matched, &pluralize(replacement))
    } else {
        preserve_case(matched, replacement)
    }
}

/// Finalizes every candidate's replacement in place.
pub fn render_all(candidates: &mut [TermMatch]) {
    for candidate in candidates.iter_mut() {
        candidate.replacement =
            render_replacement(&candidate.text, &candidate.term, &candidate.replacement);
        log_replacement_debug(
            module_path!(),
            &candidate.term,
            &candidate.text,
            &candidate.replacement,
        );
    }
}

/// Splices accepted matches into the original text in one ascending pass.
///
/// `accepted` must be non-overlapping and sorted by start; the original is
/// never mutated, so offsets stay valid throughout.
pub fn rewrite(text: &str, accepted: &[TermMatch]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0usize;
    for m in accepted {
        if m.end <= last_end {
            continue;
        }
        let start = m.start.max(last_end);
        out.push_str(&text[last_end..start]);
        out.push_str(&m.replacement);
        last_end = m.end;
    }
    out.push_str(&text[last_end..]);
    out
}

/// At least one cased character, none of them lowercase.
fn is_upper_str(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// At least one cased character, none of them uppercase.
fn is_lower_str(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
