//! The host-facing edit context
//!
//! The engine never owns the document. During evaluation it reads the host
//! document through [`EditContext`], and during the apply phases the
//! selected operation mutates it through the same interface. The host is
//! responsible for serializing edits; the engine performs no locking.
//!
//! [`DocumentContext`] is the concrete in-memory implementation used by the
//! CLI and the tests: a string buffer plus a lexer function, re-tokenized
//! after every mutation so each edit sees a fresh stream.

use std::fmt;
use std::ops::Range;

use crate::tokens::{SliceCursor, Token, TokenCursor, TokenType};

/// Recoverable failures while querying or mutating the host document.
///
/// Rule evaluation converts these into "no match" for the rule at hand;
/// dispatch then continues with the next candidate. They are never fatal to
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// Offset outside the document or not on a character boundary.
    BadLocation { offset: usize, len: usize },
    /// Range endpoints out of order or outside the document.
    BadRange {
        start: usize,
        end: usize,
        len: usize,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::BadLocation { offset, len } => {
                write!(f, "offset {} invalid in document of length {}", offset, len)
            }
            ContextError::BadRange { start, end, len } => {
                write!(
                    f,
                    "range {}..{} invalid in document of length {}",
                    start, end, len
                )
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// What the engine needs from the host editor.
///
/// Read methods take `&self`: rule evaluation is read-only by contract.
/// Mutation happens only through the `&mut self` methods, and only from
/// [`TextOperation`](crate::rules::TextOperation) callbacks.
pub trait EditContext {
    /// Current document text.
    fn text(&self) -> &str;

    /// Current caret position (byte offset).
    fn caret(&self) -> usize;

    /// Whether `offset` sits at the end of its line.
    fn is_line_end(&self, offset: usize) -> Result<bool, ContextError>;

    /// Type of the token immediately preceding `offset` (the token the
    /// caret sits in or just after), if any.
    fn token_before(&self, offset: usize) -> Result<Option<TokenType>, ContextError>;

    /// A fresh token cursor positioned at `offset`.
    fn cursor_at(&self, offset: usize) -> Result<Box<dyn TokenCursor + '_>, ContextError>;

    /// Insert `text` at `offset`; returns the end offset of the insertion
    /// and leaves the caret there.
    fn insert(&mut self, offset: usize, text: &str) -> Result<usize, ContextError>;

    /// Remove `range` and leave the caret at its start.
    fn remove(&mut self, range: Range<usize>) -> Result<(), ContextError>;

    fn set_caret(&mut self, offset: usize) -> Result<(), ContextError>;
}

/// Lexer function used by [`DocumentContext`] to derive its token stream.
pub type LexerFn = fn(&str) -> Vec<Token>;

/// In-memory document: string buffer + lexer, re-tokenized per mutation.
pub struct DocumentContext {
    text: String,
    caret: usize,
    lexer: LexerFn,
    tokens: Vec<Token>,
}

impl DocumentContext {
    /// Document tokenized with the built-in grammar lexer.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_lexer(text, crate::grammar::tokenize)
    }

    pub fn with_lexer(text: impl Into<String>, lexer: LexerFn) -> Self {
        let text = text.into();
        let tokens = lexer(&text);
        DocumentContext {
            text,
            caret: 0,
            lexer,
            tokens,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn check_offset(&self, offset: usize) -> Result<(), ContextError> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(ContextError::BadLocation {
                offset,
                len: self.text.len(),
            });
        }
        Ok(())
    }

    fn relex(&mut self) {
        self.tokens = (self.lexer)(&self.text);
    }
}

impl EditContext for DocumentContext {
    fn text(&self) -> &str {
        &self.text
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn is_line_end(&self, offset: usize) -> Result<bool, ContextError> {
        self.check_offset(offset)?;
        let rest = &self.text[offset..];
        Ok(rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n"))
    }

    fn token_before(&self, offset: usize) -> Result<Option<TokenType>, ContextError> {
        self.check_offset(offset)?;
        Ok(self
            .tokens
            .iter()
            .rev()
            .find(|t| t.span.start < offset)
            .map(|t| t.kind))
    }

    fn cursor_at(&self, offset: usize) -> Result<Box<dyn TokenCursor + '_>, ContextError> {
        self.check_offset(offset)?;
        Ok(Box::new(SliceCursor::at_offset(&self.tokens, offset)))
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<usize, ContextError> {
        self.check_offset(offset)?;
        self.text.insert_str(offset, text);
        self.relex();
        let end = offset + text.len();
        self.caret = end;
        Ok(end)
    }

    fn remove(&mut self, range: Range<usize>) -> Result<(), ContextError> {
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(ContextError::BadRange {
                start: range.start,
                end: range.end,
                len: self.text.len(),
            });
        }
        self.caret = range.start;
        self.text.replace_range(range, "");
        self.relex();
        Ok(())
    }

    fn set_caret(&mut self, offset: usize) -> Result<(), ContextError> {
        self.check_offset(offset)?;
        self.caret = offset;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar;

    #[test]
    fn test_line_end_detection() {
        let doc = DocumentContext::new("rule: A;\nother");
        assert!(doc.is_line_end(8).unwrap());
        assert!(doc.is_line_end(14).unwrap());
        assert!(!doc.is_line_end(4).unwrap());
    }

    #[test]
    fn test_bad_offset_is_recoverable() {
        let doc = DocumentContext::new("ab");
        assert_eq!(
            doc.is_line_end(5),
            Err(ContextError::BadLocation { offset: 5, len: 2 })
        );
    }

    #[test]
    fn test_token_before_is_positional() {
        // "rule: " -> IDENT COLON WS; caret after the space sits after WS
        let doc = DocumentContext::new("rule: ");
        let kind = doc.token_before(6).unwrap().unwrap();
        assert_eq!(grammar::vocabulary().name(kind), Some("WS"));
        let kind = doc.token_before(5).unwrap().unwrap();
        assert_eq!(grammar::vocabulary().name(kind), Some("COLON"));
        assert_eq!(doc.token_before(0).unwrap(), None);
    }

    #[test]
    fn test_insert_moves_caret_and_relexes() {
        let mut doc = DocumentContext::new("rule ;");
        let before = doc.tokens().len();
        let end = doc.insert(4, ":").unwrap();
        assert_eq!(end, 5);
        assert_eq!(doc.caret(), 5);
        assert_eq!(doc.text(), "rule: ;");
        assert_eq!(doc.tokens().len(), before + 1);
    }

    #[test]
    fn test_remove_rejects_bad_range() {
        let mut doc = DocumentContext::new("rule");
        assert!(doc.remove(2..9).is_err());
        assert_eq!(doc.text(), "rule");
        doc.remove(0..2).unwrap();
        assert_eq!(doc.text(), "le");
        assert_eq!(doc.caret(), 0);
    }
}
