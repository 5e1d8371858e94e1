// wordwarden-core/src/resolver.rs
//! Overlap resolution: picks the final, non-overlapping match set.
//! License: MIT OR APACHE 2.0

use crate::term_match::TermMatch;

/// Resolves overlapping candidates into a disjoint set of winners.
///
/// Candidates are visited in a total order: start descending, then end
/// descending, then exact before evasion kinds, then term order. Each is
/// accepted greedily when it intersects nothing already accepted, so on
/// overlap the rightmost-starting candidate wins. Because the visit order is
/// total, identical inputs always resolve to the identical winner set.
///
/// Winners come back sorted by ascending start, ready for splicing.
pub fn resolve(mut candidates: Vec<TermMatch>) -> Vec<TermMatch> {
    candidates.sort_by(|a, b| {
        b.start
            .cmp(&a.start)
            .then(b.end.cmp(&a.end))
            .then(a.kind.cmp(&b.kind))
            .then(a.term.cmp(&b.term))
    });

    let mut accepted: Vec<TermMatch> = Vec::new();
    for candidate in candidates {
        if accepted.iter().all(|winner| !winner.overlaps(&candidate)) {
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|m| m.start);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::compiler::PatternKind;

    fn candidate(start: usize, end: usize, term: &str, kind: PatternKind) -> TermMatch {
        TermMatch {
            start,
            end,
            text: "x".repeat(end - start),
            term: term.to_string(),
            kind,
            replacement: format!("[{term}]"),
        }
    }

    #[test]
    fn disjoint_candidates_all_win() {
        let resolved = resolve(vec![
            candidate(10, 14, "b", PatternKind::Exact),
            candidate(0, 4, "a", PatternKind::Exact),
        ]);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].start, 0);
        assert_eq!(resolved[1].start, 10);
    }

    #[test]
    fn rightmost_start_wins_overlaps() {
        let resolved = resolve(vec![
            candidate(0, 4, "abcd", PatternKind::Leetspeak),
            candidate(2, 6, "cdef", PatternKind::Leetspeak),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].term, "cdef");
    }

    #[test]
    fn exact_beats_evasion_on_identical_spans() {
        let resolved = resolve(vec![
            candidate(0, 4, "hell", PatternKind::Spaced),
            candidate(0, 4, "hell", PatternKind::Leetspeak),
            candidate(0, 4, "hell", PatternKind::Exact),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].kind, PatternKind::Exact);
    }

    #[test]
    fn longer_span_wins_same_start() {
        let resolved = resolve(vec![
            candidate(0, 4, "cat", PatternKind::Exact),
            candidate(0, 5, "cat", PatternKind::Leetspeak),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].end, 5);
    }

    #[test]
    fn resolution_is_order_independent() {
        let a = vec![
            candidate(0, 4, "abcd", PatternKind::Leetspeak),
            candidate(2, 6, "cdef", PatternKind::Leetspeak),
            candidate(5, 9, "fghi", PatternKind::Exact),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(resolve(a), resolve(b));
    }

    #[test]
    fn empty_input_resolves_to_nothing() {
        assert!(resolve(Vec::new()).is_empty());
    }
}
