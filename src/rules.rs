//! Rules: triggers, conditions, and the operations they produce
//!
//! A rule watches one edit phase for one set of trigger characters, checks
//! the document around the caret (line position, preceding token, backward
//! and forward token patterns), and on success hands the host a
//! [`TextOperation`] to drive through the remaining phases of the edit.

pub mod operation;
pub mod phase;
pub mod rule;

pub use operation::{BoilerplateOp, TextOperation};
pub use phase::{EditEvent, EditPhase};
pub use rule::{EditRule, RuleDef};
