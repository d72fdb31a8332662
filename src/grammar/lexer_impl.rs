//! Tokenization driver for the grammar lexer
//!
//! The actual tokenization is handled entirely by logos; this module turns
//! the logos iterator into the engine's `Token` representation. Bytes the
//! lexer does not recognize are skipped, so the driver always produces a
//! usable stream.

use logos::Logos;

use crate::grammar::tokens::GrammarToken;
use crate::tokens::Token;

/// Tokenize source text into engine tokens with byte spans.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = GrammarToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push(Token::new(token.token_type(), lexer.span()));
        }
    }

    tokens
}
