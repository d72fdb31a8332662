//! Token-pattern matching
//!
//! The heart of the engine: immutable patterns over token-type predicates,
//! scanned forward or backward from a caret position with tunable ignore
//! and stop semantics. Patterns answer one question - "does this shape of
//! tokens occur next to the caret?" - and rules combine those answers into
//! editing decisions.

pub mod matcher;
pub mod pattern;
pub mod predicate;

pub use pattern::{PatternBuilder, ScanDirection, TokenPattern};
pub use predicate::TypePredicate;
