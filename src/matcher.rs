//! Backtracking matcher: run a compiled pattern against a subject string.
//!
//! Matching is whole-string: the unit sequence must consume the subject from
//! offset 0 to its end, with every unit meeting its repetition floor. All
//! offsets are **character** (not byte) indices into the subject.
//!
//! Repetition counts are explored greedy-first: each unit commits to the
//! longest run it can, then gives characters back one at a time when the
//! remainder of the sequence cannot be satisfied.

use std::ops::Range;

use crate::unit::{CompiledPattern, Unit};

/// Maximum number of backtracking steps before giving up.
const MAX_STEPS: usize = 100_000;

/// Test whether `pattern` matches the whole of `subject`.
pub fn is_match(pattern: &CompiledPattern, subject: &str) -> bool {
    let subject: Vec<char> = subject.chars().collect();
    Trial::new(pattern.units(), &subject).attempt(0, 0)
}

/// Like [`is_match`], but on success returns the ranges each unit consumed.
///
/// The outer list has one entry per unit, in sequence order; each inner list
/// holds one `start..start + 1` range per committed repetition. A unit
/// satisfied by zero repetitions has an empty list.
pub fn match_with_trace(
    pattern: &CompiledPattern,
    subject: &str,
) -> Option<Vec<Vec<Range<usize>>>> {
    let subject: Vec<char> = subject.chars().collect();
    let mut trial = Trial::new(pattern.units(), &subject);
    if trial.attempt(0, 0) {
        Some(trial.consumed)
    } else {
        None
    }
}

/// One in-flight match attempt.
///
/// `consumed[i]` records the ranges unit `i` has committed to on the current
/// branch. The state is local to the call, so a [`CompiledPattern`] can be
/// matched from several threads at once.
struct Trial<'a> {
    units: &'a [Unit],
    subject: &'a [char],
    consumed: Vec<Vec<Range<usize>>>,
    steps: usize,
}

impl<'a> Trial<'a> {
    fn new(units: &'a [Unit], subject: &'a [char]) -> Self {
        Self {
            units,
            subject,
            consumed: vec![Vec::new(); units.len()],
            steps: 0,
        }
    }

    /// Try to match `units[unit_idx..]` against `subject[offset..]`.
    ///
    /// On failure the consumed-range lists for `unit_idx..` are left exactly
    /// as they were on entry (empty); on success they hold the winning
    /// decomposition. Recursion depth is bounded by the unit count, since
    /// the repetition choice is iterative and only sequence position recurses.
    fn attempt(&mut self, unit_idx: usize, offset: usize) -> bool {
        self.steps += 1;
        if self.steps > MAX_STEPS {
            return false;
        }

        let Some(unit) = self.units.get(unit_idx) else {
            // Sequence exhausted: a match iff the subject is too.
            return offset == self.subject.len();
        };

        // Commit to the longest run available, recording one range per
        // character so each can be handed back individually.
        let cap = unit.max_repeat();
        let mut end = offset;
        while cap.is_none_or(|m| end - offset < m) && unit.matches_at(self.subject, end) {
            self.consumed[unit_idx].push(end..end + 1);
            end += 1;
        }

        let run = end - offset;
        if run >= unit.min_repeat() {
            let mut count = run;
            loop {
                if self.attempt(unit_idx + 1, offset + count) {
                    return true;
                }
                if count == unit.min_repeat() {
                    break;
                }
                self.consumed[unit_idx].pop();
                count -= 1;
            }
        }
        // Floor unreachable, or every count failed downstream.
        self.consumed[unit_idx].clear();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::unit::UnitKind;

    fn matches(pattern: &str, subject: &str) -> bool {
        let p = compile(pattern).expect("pattern should compile");
        is_match(&p, subject)
    }

    fn trace(pattern: &str, subject: &str) -> Option<Vec<Vec<Range<usize>>>> {
        let p = compile(pattern).expect("pattern should compile");
        match_with_trace(&p, subject)
    }

    // --- Literals ---

    #[test]
    fn single_literal() {
        assert!(matches("a", "a"));
        assert!(!matches("a", ""));
        assert!(!matches("a", "b"));
        assert!(!matches("a", "aa"));
    }

    #[test]
    fn literal_sequence_must_cover_subject() {
        assert!(matches("abc", "abc"));
        assert!(!matches("abc", "ab"));
        assert!(!matches("abc", "abcd"));
        assert!(!matches("ab", "xb"));
    }

    // --- Any ---

    #[test]
    fn any_requires_exactly_one_char() {
        assert!(matches("a.c", "abc"));
        assert!(matches("a.c", "a.c"));
        assert!(!matches("a.c", "ac"));
        assert!(!matches("a.c", "abbc"));
    }

    // --- Quantifiers ---

    #[test]
    fn star_matches_zero_or_more() {
        assert!(matches("a*", ""));
        assert!(matches("a*", "aaaa"));
        assert!(!matches("a*", "aab"));
    }

    #[test]
    fn plus_requires_at_least_one() {
        assert!(!matches("a+", ""));
        assert!(matches("a+", "a"));
        assert!(matches("a+", "aaa"));
    }

    #[test]
    fn optional_explores_both_counts() {
        assert!(matches("a?b", "b"));
        assert!(matches("a?b", "ab"));
        assert!(!matches("a?b", "aab"));
    }

    #[test]
    fn optional_unit_that_cannot_match_consumes_nothing() {
        assert!(matches("x?yz", "yz"));
        assert!(matches("x*yz", "yz"));
    }

    // --- Classes ---

    #[test]
    fn class_membership() {
        assert!(matches("[abc]", "b"));
        assert!(!matches("[abc]", "d"));
        assert!(!matches("[abc]", ""));
    }

    #[test]
    fn negated_class_membership() {
        assert!(!matches("[^abc]", "b"));
        assert!(matches("[^abc]", "d"));
        assert!(!matches("[^abc]", ""));
    }

    #[test]
    fn empty_class_matches_nothing() {
        assert!(!matches("[]", "a"));
        assert!(!matches("[]", ""));
        assert!(matches("[]*", ""));
    }

    #[test]
    fn negated_empty_class_matches_any_char() {
        assert!(matches("[^]", "a"));
        assert!(matches("[^]", "!"));
        assert!(!matches("[^]", ""));
    }

    #[test]
    fn quantified_class_run() {
        assert!(matches("[ab]+c", "abbac"));
        assert!(!matches("[ab]+c", "c"));
    }

    // --- Backtracking ---

    #[test]
    fn greedy_star_gives_back_for_trailing_literal() {
        // A purely greedy matcher would let a* swallow all three a's and fail.
        assert!(matches("a*a", "aaa"));
        assert!(matches("a*a", "a"));
        assert!(!matches("a*a", ""));
    }

    #[test]
    fn backtracking_across_several_units() {
        assert!(matches("a*ab", "aaab"));
        assert!(matches(".*b.*b", "abxb"));
        assert!(!matches(".*b.*b", "abxa"));
    }

    #[test]
    fn plus_floor_is_respected_while_backtracking() {
        // a+ must keep at least one 'a'; the trailing 'a' needs one too.
        assert!(matches("a+a", "aa"));
        assert!(!matches("a+a", "a"));
    }

    // --- Empty pattern ---

    #[test]
    fn empty_pattern_matches_only_empty_subject() {
        assert!(matches("", ""));
        assert!(!matches("", "a"));
    }

    // --- Explicit bounds the surface syntax cannot spell ---

    #[test]
    fn zero_max_forces_zero_consumption() {
        let p = CompiledPattern::from_units(vec![
            Unit::with_repeats(UnitKind::Literal('a'), 0, Some(0)),
            Unit::new(UnitKind::Literal('b')),
        ]);
        assert!(is_match(&p, "b"));
        assert!(!is_match(&p, "ab"));
    }

    // --- Multibyte subjects ---

    #[test]
    fn offsets_are_character_positions() {
        assert!(matches("é*!", "ééé!"));
        let t = trace(".", "é").expect("single any should match");
        assert_eq!(t, vec![vec![0..1]]);
    }

    // --- Traces ---

    #[test]
    fn trace_records_per_unit_ranges() {
        let t = trace("a*bc?", "aab").expect("should match");
        assert_eq!(t.len(), 3);
        assert_eq!(t[0], vec![0..1, 1..2]);
        assert_eq!(t[1], vec![2..3]);
        assert!(t[2].is_empty(), "c? matched zero times");
    }

    #[test]
    fn trace_reflects_backtracked_counts() {
        let t = trace("a*a", "aaa").expect("should match");
        assert_eq!(t[0], vec![0..1, 1..2], "a* gave one 'a' back");
        assert_eq!(t[1], vec![2..3]);
    }

    #[test]
    fn trace_is_none_on_mismatch() {
        assert_eq!(trace("a+", "b"), None);
    }

    #[test]
    fn empty_pattern_trace_is_empty() {
        assert_eq!(trace("", ""), Some(vec![]));
    }

    // --- Robustness ---

    #[test]
    fn repeat_calls_are_idempotent() {
        let p = compile("a*[bc]+").unwrap();
        for _ in 0..3 {
            assert!(is_match(&p, "aabcb"));
            assert!(!is_match(&p, "aa"));
        }
    }

    #[test]
    fn pathological_pattern_terminates() {
        // Exponential in principle; the step cap bounds the search and the
        // verdict is still a plain no-match.
        assert!(!matches("a*a*a*a*a*a*b", "aaaaaaaaaaaaaaaaaaaaaaaaac"));
    }
}
