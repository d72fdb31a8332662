//! # edify
//!
//! A token-pattern rule engine for editor typing aids. The engine watches
//! keystrokes in a host editor, scans the surrounding token stream forward
//! or backward against configured patterns (skipping ignorable tokens,
//! stopping at sentinels), and - when a rule's conditions all hold - hands
//! the host a text operation that inserts boilerplate and repositions the
//! caret.
//!
//! The host owns the document, the caret, and the lexer; the engine sees
//! them only through the narrow [`context::EditContext`] interface and
//! performs no mutation outside operation callbacks. Rules are configured
//! once up front, either in code through [`rules::RuleDef`] or from
//! declarative YAML/JSON files via [`config`], and dispatched per edit by
//! [`registry::RuleRegistry`] with [`registry::EditSession`] pinning the
//! selected rule across the phases of one edit.
//!
//! A typical rule file:
//!
//! ```yaml
//! rules:
//!   - name: block-skeleton
//!     trigger: "{"
//!     at-line-end: true
//!     preceded-by:
//!       pattern: [IDENT, COLON]
//!       ignoring: ["WS", "NEWLINE", "LINE_COMMENT|BLOCK_COMMENT"]
//!       stopping-on: [SEMI]
//!     insert: "\n\n}"
//!     caret-backup: 2
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod grammar;
pub mod matching;
pub mod registry;
pub mod rules;
pub mod testing;
pub mod tokens;

pub use config::{load_rules, load_rules_from_str};
pub use context::{ContextError, DocumentContext, EditContext};
pub use error::RuleConfigError;
pub use matching::{PatternBuilder, ScanDirection, TokenPattern, TypePredicate};
pub use registry::{EditSession, RuleRegistry, SessionState};
pub use rules::{BoilerplateOp, EditEvent, EditPhase, EditRule, RuleDef, TextOperation};
pub use tokens::{SliceCursor, Token, TokenCursor, TokenType, Vocabulary};
