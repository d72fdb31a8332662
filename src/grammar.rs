//! Built-in lexer for an ANTLR-style grammar language
//!
//! The engine treats the lexer as a black box producing a token stream;
//! this module is the one concrete lexer the repository ships, giving the
//! CLI, the default rule set, and the tests a real token vocabulary. Hosts
//! embedding the engine substitute their own lexer through
//! [`DocumentContext::with_lexer`](crate::context::DocumentContext::with_lexer).

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::tokenize;
pub use tokens::{vocabulary, GrammarToken};
