//! Property and table tests for the token-pattern matcher
//!
//! The tables pin the documented scan semantics (element-before-stop
//! ordering, ignore skipping, subsequence matching, boundary handling);
//! the proptest blocks cover direction symmetry on palindromic input and
//! the no-panic guarantee for arbitrary streams.

use proptest::prelude::*;
use rstest::rstest;

use edify::matching::{PatternBuilder, TypePredicate};
use edify::testing::stream;
use edify::tokens::SliceCursor;

const A: u16 = 1;
const B: u16 = 2;
const S: u16 = 8;
const WS: u16 = 9;
const X: u16 = 5;

fn forward_pattern(elements: &[u16], ignore: &[u16], stop: &[u16]) -> edify::TokenPattern {
    let mut builder = PatternBuilder::forward();
    for &e in elements {
        builder = builder.expect(e);
    }
    builder = builder.ignoring(TypePredicate::any_of(ignore.iter().copied()));
    builder
        .stopping_on(TypePredicate::any_of(stop.iter().copied()))
        .unwrap()
}

#[rstest]
// single element matches its only token
#[case(&[A], &[A], true)]
// stop token arrives before the second element can match
#[case(&[A, B], &[A, S], false)]
// ignored token between the elements is skipped
#[case(&[A, B], &[A, WS, B], true)]
// unmatched non-stop token is walked over (subsequence semantics)
#[case(&[A, B], &[A, X, B], true)]
// but a stop token between the elements still fails
#[case(&[A, B], &[A, X, S, B], false)]
// pattern completing short-circuits before a later stop
#[case(&[A, B], &[A, B, S], true)]
fn test_forward_scan_table(
    #[case] elements: &[u16],
    #[case] kinds: &[u16],
    #[case] expected: bool,
) {
    let tokens = stream(kinds);
    let pattern = forward_pattern(elements, &[WS], &[S]);
    let mut cursor = SliceCursor::at_offset(&tokens, 0);
    assert_eq!(pattern.matches(&mut cursor), expected);
}

#[test]
fn test_single_element_matches_regardless_of_boundary_flag() {
    // pattern boundary: one token, one element, both directions
    let tokens = stream(&[A]);
    for boundary_ok in [false, true] {
        let mut builder = PatternBuilder::forward().expect(A);
        if boundary_ok {
            builder = builder.match_at_boundary();
        }
        let forward = builder.unstopped().unwrap();
        let mut cursor = SliceCursor::at_offset(&tokens, 0);
        assert!(forward.matches(&mut cursor));

        let mut builder = PatternBuilder::backward().expect(A);
        if boundary_ok {
            builder = builder.match_at_boundary();
        }
        let backward = builder.unstopped().unwrap();
        let mut cursor = SliceCursor::at_offset(&tokens, 1);
        assert!(backward.matches(&mut cursor));
    }
}

#[test]
fn test_empty_stream_decided_by_boundary_flag() {
    let tokens = stream(&[]);

    let loose = PatternBuilder::forward()
        .expect(A)
        .match_at_boundary()
        .unstopped()
        .unwrap();
    let mut cursor = SliceCursor::at_offset(&tokens, 0);
    assert!(loose.matches(&mut cursor));

    let strict = PatternBuilder::forward().expect(A).unstopped().unwrap();
    let mut cursor = SliceCursor::at_offset(&tokens, 0);
    assert!(!strict.matches(&mut cursor));
}

/// Build the palindromic completion of `half` (half + middle + reversed half).
fn palindrome(half: &[u16], middle: Option<u16>) -> Vec<u16> {
    let mut out = half.to_vec();
    out.extend(middle);
    out.extend(half.iter().rev());
    out
}

proptest! {
    /// Direction symmetry: on a palindromic stream, a palindromic pattern
    /// matches forward from the start exactly when it matches backward
    /// from the end.
    #[test]
    fn test_direction_symmetry_on_palindromes(
        stream_half in proptest::collection::vec(0u16..6, 0..8),
        stream_mid in proptest::option::of(0u16..6),
        pattern_half in proptest::collection::vec(0u16..6, 0..3),
        pattern_mid in 0u16..6,
        ignore in proptest::collection::vec(0u16..6, 0..3),
        stop in proptest::collection::vec(0u16..6, 0..3),
    ) {
        let kinds = palindrome(&stream_half, stream_mid);
        let pattern_kinds = palindrome(&pattern_half, Some(pattern_mid));
        let tokens = stream(&kinds);

        let mut fwd = PatternBuilder::forward();
        let mut bwd = PatternBuilder::backward();
        for &k in &pattern_kinds {
            fwd = fwd.expect(k);
            bwd = bwd.expect(k);
        }
        let ignore_pred = TypePredicate::any_of(ignore.iter().copied());
        let stop_pred = TypePredicate::any_of(stop.iter().copied());
        let fwd = fwd.ignoring(ignore_pred.clone()).stopping_on(stop_pred.clone()).unwrap();
        let bwd = bwd.ignoring(ignore_pred).stopping_on(stop_pred).unwrap();

        let mut cursor = SliceCursor::at_offset(&tokens, 0);
        let forward_result = fwd.matches(&mut cursor);
        let mut cursor = SliceCursor::at_offset(&tokens, kinds.len());
        let backward_result = bwd.matches(&mut cursor);

        prop_assert_eq!(forward_result, backward_result);
    }

    /// The scan is total and deterministic for arbitrary input.
    #[test]
    fn test_scan_never_panics_and_is_deterministic(
        kinds in proptest::collection::vec(0u16..10, 0..32),
        elements in proptest::collection::vec(0u16..10, 1..5),
        ignore in proptest::collection::vec(0u16..10, 0..4),
        stop in proptest::collection::vec(0u16..10, 0..4),
        origin in 0usize..33,
        forward in proptest::bool::ANY,
        boundary_ok in proptest::bool::ANY,
    ) {
        let tokens = stream(&kinds);
        let origin = origin.min(kinds.len());

        let mut builder = if forward {
            PatternBuilder::forward()
        } else {
            PatternBuilder::backward()
        };
        for &e in &elements {
            builder = builder.expect(e);
        }
        builder = builder.ignoring(TypePredicate::any_of(ignore.iter().copied()));
        if boundary_ok {
            builder = builder.match_at_boundary();
        }
        let pattern = builder
            .stopping_on(TypePredicate::any_of(stop.iter().copied()))
            .unwrap();

        let mut cursor = SliceCursor::at_offset(&tokens, origin);
        let first = pattern.matches(&mut cursor);
        let mut cursor = SliceCursor::at_offset(&tokens, origin);
        let second = pattern.matches(&mut cursor);
        prop_assert_eq!(first, second);
    }
}
