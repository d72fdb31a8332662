//! Test support: token factories and instrumented contexts
//!
//! Shared by the in-module tests and the integration tests under `tests/`.
//! The factories build synthetic streams without running a lexer, and
//! [`RecordingContext`] counts every read the engine performs so tests can
//! assert that short-circuit paths really touch nothing.

use std::cell::Cell;
use std::ops::Range;

use crate::context::{ContextError, DocumentContext, EditContext};
use crate::tokens::{Token, TokenCursor, TokenType};

/// Unit-width tokens of the given types, spanning consecutive offsets.
pub fn stream(kinds: &[TokenType]) -> Vec<Token> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, &k)| Token::new(k, i..i + 1))
        .collect()
}

/// An [`EditContext`] wrapper that counts read queries.
pub struct RecordingContext {
    inner: DocumentContext,
    reads: Cell<usize>,
}

impl RecordingContext {
    pub fn new(text: impl Into<String>) -> Self {
        RecordingContext {
            inner: DocumentContext::new(text),
            reads: Cell::new(0),
        }
    }

    /// Number of read queries (line-end, token-before, cursor) performed
    /// through this context so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    fn record(&self) {
        self.reads.set(self.reads.get() + 1);
    }
}

impl EditContext for RecordingContext {
    fn text(&self) -> &str {
        self.inner.text()
    }

    fn caret(&self) -> usize {
        self.inner.caret()
    }

    fn is_line_end(&self, offset: usize) -> Result<bool, ContextError> {
        self.record();
        self.inner.is_line_end(offset)
    }

    fn token_before(&self, offset: usize) -> Result<Option<TokenType>, ContextError> {
        self.record();
        self.inner.token_before(offset)
    }

    fn cursor_at(&self, offset: usize) -> Result<Box<dyn TokenCursor + '_>, ContextError> {
        self.record();
        self.inner.cursor_at(offset)
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<usize, ContextError> {
        self.inner.insert(offset, text)
    }

    fn remove(&mut self, range: Range<usize>) -> Result<(), ContextError> {
        self.inner.remove(range)
    }

    fn set_caret(&mut self, offset: usize) -> Result<(), ContextError> {
        self.inner.set_caret(offset)
    }
}
