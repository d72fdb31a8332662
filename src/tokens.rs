//! Token primitives shared by the whole engine
//!
//! The engine never runs a lexer itself; it consumes tokens some external
//! lexer produced. A token is a numeric type tag plus the byte range it
//! covers in the source buffer - this is the ground truth the pattern
//! matcher and the rule predicates operate on. Token text is recovered from
//! the source buffer when needed, never stored.

use std::ops::Range;

/// Numeric token type tag, drawn from a fixed vocabulary.
pub type TokenType = u16;

/// One token as produced by the external lexer: a type tag and the byte
/// range it spans in the source. Tokens are read-only; the engine never
/// mutates or re-orders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenType, span: Range<usize>) -> Self {
        Token { kind, span }
    }

    /// Extract this token's text from the source buffer.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

/// Bidirectional single-step view over a token stream.
///
/// A cursor starts positioned *between* tokens (at a gap); the first
/// movement lands on a token. `token_type` reports the token the cursor
/// currently rests on, or `None` while it is still on a gap or has run off
/// either end of the stream. Movement past the ends reports `false` and
/// leaves the cursor off-stream; the pattern matcher folds that into its
/// boundary handling rather than reading a sentinel type.
pub trait TokenCursor {
    /// Type of the token the cursor rests on, if any.
    fn token_type(&self) -> Option<TokenType>;

    /// Step toward the end of the stream. Returns whether a token was reached.
    fn move_next(&mut self) -> bool;

    /// Step toward the start of the stream. Returns whether a token was reached.
    fn move_previous(&mut self) -> bool;
}

enum CursorState {
    /// Between tokens: `move_next` yields token `gap`, `move_previous`
    /// yields token `gap - 1`.
    Gap(usize),
    On(usize),
    OffFront,
    OffEnd,
}

/// A [`TokenCursor`] over a token slice.
pub struct SliceCursor<'a> {
    tokens: &'a [Token],
    state: CursorState,
}

impl<'a> SliceCursor<'a> {
    /// Cursor positioned before the first token.
    pub fn new(tokens: &'a [Token]) -> Self {
        SliceCursor {
            tokens,
            state: CursorState::Gap(0),
        }
    }

    /// Cursor positioned at a byte offset: `move_next` yields the first
    /// token containing or starting at/after `offset`, `move_previous` the
    /// last token ending at or before it. A caret inside a token counts
    /// that token as "next".
    pub fn at_offset(tokens: &'a [Token], offset: usize) -> Self {
        let gap = tokens
            .iter()
            .position(|t| t.span.end > offset)
            .unwrap_or(tokens.len());
        SliceCursor {
            tokens,
            state: CursorState::Gap(gap),
        }
    }
}

impl TokenCursor for SliceCursor<'_> {
    fn token_type(&self) -> Option<TokenType> {
        match self.state {
            CursorState::On(i) => Some(self.tokens[i].kind),
            _ => None,
        }
    }

    fn move_next(&mut self) -> bool {
        let next = match self.state {
            CursorState::Gap(g) => g,
            CursorState::On(i) => i + 1,
            CursorState::OffFront => 0,
            CursorState::OffEnd => {
                return false;
            }
        };
        if next < self.tokens.len() {
            self.state = CursorState::On(next);
            true
        } else {
            self.state = CursorState::OffEnd;
            false
        }
    }

    fn move_previous(&mut self) -> bool {
        let prev = match self.state {
            CursorState::Gap(g) => {
                if g == 0 {
                    self.state = CursorState::OffFront;
                    return false;
                }
                g - 1
            }
            CursorState::On(i) => {
                if i == 0 {
                    self.state = CursorState::OffFront;
                    return false;
                }
                i - 1
            }
            CursorState::OffFront => {
                return false;
            }
            CursorState::OffEnd => {
                if self.tokens.is_empty() {
                    return false;
                }
                self.tokens.len() - 1
            }
        };
        self.state = CursorState::On(prev);
        true
    }
}

/// Name table mapping token types to human-readable names and back.
///
/// A vocabulary belongs to one lexer; token types index into it. Rule
/// configuration resolves token names (and name classes) against a
/// vocabulary, and the CLI uses it for display.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    names: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from names in token-type order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vocabulary {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Name for a token type, if the type is in range.
    pub fn name(&self, kind: TokenType) -> Option<&str> {
        self.names.get(kind as usize).map(String::as_str)
    }

    /// Token type for an exact name.
    pub fn lookup(&self, name: &str) -> Option<TokenType> {
        self.names
            .iter()
            .position(|n| n.as_str() == name)
            .map(|i| i as TokenType)
    }

    /// All names in token-type order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
