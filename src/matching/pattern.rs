//! Token pattern specification and its staged builder
//!
//! A pattern is grammar-as-data: an ordered sequence of token-type
//! predicates, an ignore predicate, a stop predicate, a scan direction, and
//! a boundary flag. Patterns are built once at configuration time and are
//! immutable afterwards; the scan itself lives in the matcher module.
//!
//! The builder is staged so the stop predicate is fixed last:
//! `PatternBuilder::backward().expect(..).expect(..).ignoring(..)` collects
//! the sequence, and the terminal [`PatternBuilder::stopping_on`] validates
//! and produces the pattern. A zero-length sequence fails to build.

use crate::error::RuleConfigError;
use crate::matching::predicate::TypePredicate;

/// Which way a pattern scans from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Forward,
    Backward,
}

/// An immutable token pattern: predicate sequence plus scan semantics.
///
/// In backward mode the sequence is compared in reverse, last element
/// first, so a pattern reads in document order regardless of direction:
/// `expect(IDENT).expect(COLON)` scanned backward from a caret matches a
/// caret preceded by `IDENT COLON`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPattern {
    pub(crate) elements: Vec<TypePredicate>,
    pub(crate) ignore: TypePredicate,
    pub(crate) stop: TypePredicate,
    pub(crate) direction: ScanDirection,
    pub(crate) boundary_ok: bool,
}

impl TokenPattern {
    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        // never true for a built pattern; the builder rejects empty sequences
        self.elements.is_empty()
    }

    /// Whether running off the stream before completing counts as a match.
    pub fn boundary_ok(&self) -> bool {
        self.boundary_ok
    }
}

/// Staged builder for [`TokenPattern`].
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    elements: Vec<TypePredicate>,
    ignore: TypePredicate,
    direction: ScanDirection,
    boundary_ok: bool,
}

impl PatternBuilder {
    pub fn forward() -> Self {
        Self::with_direction(ScanDirection::Forward)
    }

    pub fn backward() -> Self {
        Self::with_direction(ScanDirection::Backward)
    }

    fn with_direction(direction: ScanDirection) -> Self {
        PatternBuilder {
            elements: Vec::new(),
            ignore: TypePredicate::Never,
            direction,
            boundary_ok: false,
        }
    }

    /// Append one element to the expected sequence (in document order).
    pub fn expect(mut self, pred: impl Into<TypePredicate>) -> Self {
        self.elements.push(pred.into());
        self
    }

    /// Token types the scan skips without consuming a pattern element.
    /// Repeated calls OR the predicates together.
    pub fn ignoring(mut self, pred: impl Into<TypePredicate>) -> Self {
        self.ignore = self.ignore.or(pred.into());
        self
    }

    /// Accept reaching the stream boundary as a match.
    pub fn match_at_boundary(mut self) -> Self {
        self.boundary_ok = true;
        self
    }

    /// Fix the stop predicate and build. Fails on an empty sequence.
    pub fn stopping_on(
        self,
        stop: impl Into<TypePredicate>,
    ) -> Result<TokenPattern, RuleConfigError> {
        if self.elements.is_empty() {
            return Err(RuleConfigError::EmptyPattern);
        }
        Ok(TokenPattern {
            elements: self.elements,
            ignore: self.ignore,
            stop: stop.into(),
            direction: self.direction,
            boundary_ok: self.boundary_ok,
        })
    }

    /// Build with no stop predicate: the scan only ends at the boundary or
    /// on completion.
    pub fn unstopped(self) -> Result<TokenPattern, RuleConfigError> {
        self.stopping_on(TypePredicate::Never)
    }
}
