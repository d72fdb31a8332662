//! Token definitions for the grammar language
//!
//! The built-in lexer covers an ANTLR-style grammar notation: rule
//! definitions (`name : alternatives ;`), alternation, grouping, cardinality
//! suffixes, quoted literals and character sets, action braces, and the two
//! comment forms. Tokens are defined with the logos derive macro; anything
//! outside the alphabet is skipped by the lexer driver.

use logos::Logos;
use once_cell::sync::Lazy;

use crate::tokens::{TokenType, Vocabulary};

/// All tokens of the grammar notation.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarToken {
    // Rule and token names. Grammar notation does not distinguish casing
    // at the lexical level; rules about lexer-vs-parser names live above.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Int,

    // Structure
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token("|")]
    Or,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Cardinality and operators
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("->")]
    Arrow,
    #[token("=")]
    Assign,
    #[token(",")]
    Comma,
    #[token("@")]
    At,
    #[token("~")]
    Not,

    // Literals: single-quoted with backslash escapes, and bracket sets
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    Literal,
    #[regex(r"\[[^\]\n]*\]")]
    CharSet,

    // Comments
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    // Whitespace, newlines kept separate for line-position rules
    #[regex(r"[ \t\r]+")]
    Ws,
    #[token("\n")]
    Newline,
}

/// Declaration-order list of all variants; index equals the token type.
pub const ALL: &[GrammarToken] = &[
    GrammarToken::Ident,
    GrammarToken::Int,
    GrammarToken::Colon,
    GrammarToken::Semi,
    GrammarToken::Or,
    GrammarToken::LParen,
    GrammarToken::RParen,
    GrammarToken::LBrace,
    GrammarToken::RBrace,
    GrammarToken::Star,
    GrammarToken::Plus,
    GrammarToken::Question,
    GrammarToken::Arrow,
    GrammarToken::Assign,
    GrammarToken::Comma,
    GrammarToken::At,
    GrammarToken::Not,
    GrammarToken::Literal,
    GrammarToken::CharSet,
    GrammarToken::LineComment,
    GrammarToken::BlockComment,
    GrammarToken::Ws,
    GrammarToken::Newline,
];

impl GrammarToken {
    /// Numeric token type of this variant.
    pub fn token_type(self) -> TokenType {
        self as TokenType
    }

    /// Vocabulary name of this variant.
    pub fn name(self) -> &'static str {
        match self {
            GrammarToken::Ident => "IDENT",
            GrammarToken::Int => "INT",
            GrammarToken::Colon => "COLON",
            GrammarToken::Semi => "SEMI",
            GrammarToken::Or => "OR",
            GrammarToken::LParen => "LPAREN",
            GrammarToken::RParen => "RPAREN",
            GrammarToken::LBrace => "LBRACE",
            GrammarToken::RBrace => "RBRACE",
            GrammarToken::Star => "STAR",
            GrammarToken::Plus => "PLUS",
            GrammarToken::Question => "QUESTION",
            GrammarToken::Arrow => "ARROW",
            GrammarToken::Assign => "ASSIGN",
            GrammarToken::Comma => "COMMA",
            GrammarToken::At => "AT",
            GrammarToken::Not => "NOT",
            GrammarToken::Literal => "LITERAL",
            GrammarToken::CharSet => "CHAR_SET",
            GrammarToken::LineComment => "LINE_COMMENT",
            GrammarToken::BlockComment => "BLOCK_COMMENT",
            GrammarToken::Ws => "WS",
            GrammarToken::Newline => "NEWLINE",
        }
    }

    /// Whether this token is invisible filler (whitespace or comments).
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            GrammarToken::Ws
                | GrammarToken::Newline
                | GrammarToken::LineComment
                | GrammarToken::BlockComment
        )
    }
}

static VOCABULARY: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::new(ALL.iter().map(|t| t.name())));

/// The grammar lexer's vocabulary: token names in token-type order.
pub fn vocabulary() -> &'static Vocabulary {
    &VOCABULARY
}
