//! The pattern scan
//!
//! One loop, shared by both directions. Per token reached by the cursor:
//!
//! 1. ignored types are skipped before any other test;
//! 2. the token is tested against the current pattern element; a match
//!    advances the element cursor, and completing the sequence
//!    short-circuits the scan with a match;
//! 3. only when the element test fails is the token tested against the
//!    stop predicate; a stop hit fails the scan. A token passing neither
//!    test is walked over.
//!
//! The pattern therefore matches as an in-order subsequence of visible
//! tokens occurring before any stop token. Running off the stream before
//! the sequence completes yields the pattern's `boundary_ok` flag;
//! off-stream positions are never tested against the stop predicate or the
//! pattern. Backward scans compare the sequence in reverse, last element
//! first.

use crate::matching::pattern::{ScanDirection, TokenPattern};
use crate::tokens::TokenCursor;

impl TokenPattern {
    /// Scan `cursor` in this pattern's direction and report whether the
    /// pattern matches. The cursor is consumed for the duration of the
    /// call; pass a fresh cursor to scan again from the same origin.
    pub fn matches(&self, cursor: &mut dyn TokenCursor) -> bool {
        let forward = self.direction == ScanDirection::Forward;
        let mut element = if forward { 0 } else { self.elements.len() - 1 };
        loop {
            let moved = if forward {
                cursor.move_next()
            } else {
                cursor.move_previous()
            };
            if !moved {
                return self.boundary_ok;
            }
            let kind = match cursor.token_type() {
                Some(kind) => kind,
                None => return self.boundary_ok,
            };
            if self.ignore.test(kind) {
                continue;
            }
            if self.elements[element].test(kind) {
                if forward {
                    element += 1;
                    if element == self.elements.len() {
                        return true;
                    }
                } else {
                    if element == 0 {
                        return true;
                    }
                    element -= 1;
                }
            } else if self.stop.test(kind) {
                return false;
            }
        }
    }
}
