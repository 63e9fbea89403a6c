use pretty_assertions::assert_eq;

use super::captures::CaptureStore;
use super::match_here;
use crate::compile;

/// Runs the starting-offset loop the searcher uses, returning the first
/// successful offset, the bytes consumed there, and the store for
/// capture inspection.
fn try_match(
    pattern: &[u8],
    line: &[u8],
) -> Option<(usize, usize, CaptureStore)> {
    let compiled = compile(pattern).unwrap();
    let mut store = CaptureStore::new(compiled.group_count());
    for start in 0..=line.len() {
        store.reset();
        if let Some(consumed) = match_here(
            line,
            compiled.portions(),
            start,
            0,
            &mut store,
            None,
        ) {
            return Some((start, consumed, store));
        }
    }
    None
}

#[test]
fn literal_sequence_consumes_its_length() {
    let (start, consumed, _) = try_match(b"abc", b"xxabcyy").unwrap();
    assert_eq!((start, consumed), (2, 3));
}

#[test]
fn end_anchor_consumes_nothing() {
    let (start, consumed, _) = try_match(b"c$", b"abc").unwrap();
    assert_eq!((start, consumed), (2, 1));
    assert!(try_match(b"c$", b"cab").is_none());
}

#[test]
fn start_anchor_only_matches_offset_zero() {
    let (start, _, _) = try_match(b"^ab", b"abab").unwrap();
    assert_eq!(start, 0);
    assert!(try_match(b"^ba", b"abab").is_none());
}

#[test]
fn one_or_more_gives_back_a_byte_to_a_same_literal_neighbor() {
    // `a+` takes the whole run, then returns one byte so the trailing
    // `a` still has something to match.
    let (start, consumed, _) = try_match(b"a+a", b"aaa").unwrap();
    assert_eq!((start, consumed), (0, 3));
}

#[test]
fn one_or_more_gives_back_through_the_lookahead() {
    // Same rule across the group boundary: `a+` ends the subpattern
    // and the neighbor literal lives one level up.
    let (start, consumed, store) = try_match(b"(a+)a", b"aaa").unwrap();
    assert_eq!((start, consumed), (0, 3));
    assert_eq!(store.text(0), "aa");
}

#[test]
fn negative_group_run_stops_at_the_lookahead_literal() {
    // Without the stop, `[^x]+` would swallow the `a` the enclosing
    // level still needs.
    let (start, consumed, store) = try_match(b"([^x]+)a", b"bca").unwrap();
    assert_eq!((start, consumed), (0, 3));
    assert_eq!(store.text(0), "bc");
}

#[test]
fn zero_or_one_rejects_longer_runs() {
    assert!(try_match(b"^au?b$", b"ab").is_some());
    assert!(try_match(b"^au?b$", b"aub").is_some());
    assert!(try_match(b"^au?b$", b"auub").is_none());
}

#[test]
fn repeated_group_concatenates_its_iterations() {
    let (start, consumed, store) = try_match(b"(ab)+c", b"ababc").unwrap();
    assert_eq!((start, consumed), (0, 5));
    assert_eq!(store.text(0), "abab");
}

#[test]
fn repeated_group_matching_at_end_of_line() {
    // The repetition advances by exactly what it consumed, so a final
    // iteration ending at end-of-line leaves the remainder matchable.
    let (start, consumed, store) = try_match(b"a(bc)+", b"abcbc").unwrap();
    assert_eq!((start, consumed), (0, 5));
    assert_eq!(store.text(0), "bcbc");
}

#[test]
fn repeated_group_with_nothing_consumed_releases_its_slot() {
    let (start, _, store) = try_match(b"(a?)+b", b"b").unwrap();
    assert_eq!(start, 0);
    assert!(!store.is_reserved(0));
    assert_eq!(store.text(0), "");
}

#[test]
fn optional_group_may_match_zero_times() {
    let (start, consumed, store) = try_match(b"a(xy)?b", b"ab").unwrap();
    assert_eq!((start, consumed), (0, 2));
    assert_eq!(store.text(0), "");

    let (_, consumed, store) = try_match(b"a(xy)?b", b"axyb").unwrap();
    assert_eq!(consumed, 4);
    assert_eq!(store.text(0), "xy");
}

#[test]
fn optional_group_rejects_two_occurrences() {
    assert!(try_match(b"^a(xy)?b$", b"axyxyb").is_none());
}

#[test]
fn nested_groups_capture_outside_in() {
    let (_, _, store) = try_match(b"((a)b)", b"ab").unwrap();
    assert_eq!(store.text(0), "ab");
    assert_eq!(store.text(1), "a");
}

#[test]
fn reservation_survives_a_failed_branch() {
    // The left group fails against this line, but its slot stays
    // reserved for the rest of the attempt, so the right group still
    // lands in slot 1 and ordinals keep following source order.
    let (_, _, store) = try_match(b"(a)x|(b)", b"b").unwrap();
    assert!(store.is_reserved(0));
    assert_eq!(store.text(0), "");
    assert_eq!(store.text(1), "b");
}

#[test]
fn backreference_matches_the_captured_text() {
    let (start, consumed, store) = try_match(b"([abc]+)-\\1", b"abc-abc").unwrap();
    assert_eq!((start, consumed), (0, 7));
    assert_eq!(store.text(0), "abc");
    assert!(try_match(b"([abc]+)-\\1", b"abc-abd").is_none());
}

#[test]
fn backreference_to_an_empty_capture_is_trivial() {
    let (start, consumed, _) = try_match(b"(x?)\\1abc", b"abc").unwrap();
    assert_eq!((start, consumed), (0, 3));
}

#[test]
fn any_most_one_retries_with_zero_bytes() {
    // Greedy first: the wildcard eats `b`. When that leaves the tail
    // unmatchable it retries without consuming.
    let (_, consumed, _) = try_match(b"a.?c", b"abc").unwrap();
    assert_eq!(consumed, 3);
    let (_, consumed, _) = try_match(b"a.?c", b"ac").unwrap();
    assert_eq!(consumed, 2);
}

#[test]
fn any_least_one_runs_up_to_a_literal_neighbor() {
    let (start, consumed, _) = try_match(b".+x", b"aaax").unwrap();
    assert_eq!((start, consumed), (0, 4));
    assert!(try_match(b".+x", b"aaa").is_none());
}

#[test]
fn any_least_one_backtracks_minimally_otherwise() {
    // The portion after `.+` is a class, not a literal, so the matcher
    // probes ahead byte by byte.
    let (start, consumed, _) = try_match(b".+\\d", b"ab1").unwrap();
    assert_eq!((start, consumed), (0, 3));
    assert!(try_match(b".+\\d", b"1").is_none());
}

#[test]
fn exhausted_input_permits_only_the_optional_kinds() {
    assert!(try_match(b"ab?", b"a").is_some());
    assert!(try_match(b"a.?", b"a").is_some());
    assert!(try_match(b"a(b)?", b"a").is_some());
    assert!(try_match(b"a$", b"a").is_some());

    assert!(try_match(b"ab", b"a").is_none());
    assert!(try_match(b"ab+", b"a").is_none());
    assert!(try_match(b"a(b)", b"a").is_none());
    assert!(try_match(b"a(b)+", b"a").is_none());
}

#[test]
fn alternation_commits_to_the_first_matching_branch() {
    // `ab` matches the left side, which consumes the whole line and
    // leaves nothing for the trailing `b`; the right side is not
    // retried after that.
    assert!(try_match(b"(ab|a)b", b"ab").is_none());
    assert!(try_match(b"(a|ab)b", b"ab").is_some());
}

#[test]
fn alternation_propagates_branch_consumption() {
    let (start, consumed, store) = try_match(b"(cat|dog)s", b"dogs").unwrap();
    assert_eq!((start, consumed), (0, 4));
    assert_eq!(store.text(0), "dog");
}

#[test]
fn quantified_backreferences_count_copies() {
    assert!(try_match(b"^(ab)\\1+$", b"ababab").is_some());
    assert!(try_match(b"^(ab)\\1+$", b"ab").is_none());

    assert!(try_match(b"^(ab)\\1?$", b"abab").is_some());
    assert!(try_match(b"^(ab)\\1?$", b"ab").is_some());
    assert!(try_match(b"^(ab)\\1?$", b"ababab").is_none());
}

#[test]
fn matching_is_byte_oriented() {
    let (start, consumed, _) = try_match(b"a.c", b"a\xffc").unwrap();
    assert_eq!((start, consumed), (0, 3));
    assert!(try_match(b"[\x80\x81]+", b"\x80\x81\x80").is_some());
}
