//! Edit phases and the per-phase event union
//!
//! Each user edit runs through up to three phases (before / apply / after)
//! per edit family (insert, remove, line break). Rules declare the single
//! phase they initiate from; events carry only the data their phase needs
//! and are dispatched by matching on the variant.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Phase of an edit a rule can initiate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditPhase {
    BeforeInsert,
    Insert,
    AfterInsert,
    BeforeRemove,
    Remove,
    AfterRemove,
    BeforeBreak,
    Break,
    AfterBreak,
}

impl fmt::Display for EditPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditPhase::BeforeInsert => "before-insert",
            EditPhase::Insert => "insert",
            EditPhase::AfterInsert => "after-insert",
            EditPhase::BeforeRemove => "before-remove",
            EditPhase::Remove => "remove",
            EditPhase::AfterRemove => "after-remove",
            EditPhase::BeforeBreak => "before-break",
            EditPhase::Break => "break",
            EditPhase::AfterBreak => "after-break",
        };
        write!(f, "{}", name)
    }
}

/// One edit notification from the host, tagged by phase.
///
/// `Cancelled` is not a phase rules can initiate from; it aborts the
/// current edit session from any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent<'a> {
    BeforeInsert { offset: usize, text: &'a str },
    Insert { offset: usize, text: &'a str },
    AfterInsert { offset: usize, text: &'a str },
    BeforeRemove { range: Range<usize> },
    Remove { range: Range<usize> },
    AfterRemove { range: Range<usize> },
    BeforeBreak { offset: usize },
    Break { offset: usize },
    AfterBreak { offset: usize },
    Cancelled,
}

impl EditEvent<'_> {
    /// The phase this event belongs to; `None` for `Cancelled`.
    pub fn phase(&self) -> Option<EditPhase> {
        match self {
            EditEvent::BeforeInsert { .. } => Some(EditPhase::BeforeInsert),
            EditEvent::Insert { .. } => Some(EditPhase::Insert),
            EditEvent::AfterInsert { .. } => Some(EditPhase::AfterInsert),
            EditEvent::BeforeRemove { .. } => Some(EditPhase::BeforeRemove),
            EditEvent::Remove { .. } => Some(EditPhase::Remove),
            EditEvent::AfterRemove { .. } => Some(EditPhase::AfterRemove),
            EditEvent::BeforeBreak { .. } => Some(EditPhase::BeforeBreak),
            EditEvent::Break { .. } => Some(EditPhase::Break),
            EditEvent::AfterBreak { .. } => Some(EditPhase::AfterBreak),
            EditEvent::Cancelled => None,
        }
    }

    /// Document offset of the edit (start of the removed range for the
    /// remove family).
    pub fn offset(&self) -> Option<usize> {
        match self {
            EditEvent::BeforeInsert { offset, .. }
            | EditEvent::Insert { offset, .. }
            | EditEvent::AfterInsert { offset, .. }
            | EditEvent::BeforeBreak { offset }
            | EditEvent::Break { offset }
            | EditEvent::AfterBreak { offset } => Some(*offset),
            EditEvent::BeforeRemove { range }
            | EditEvent::Remove { range }
            | EditEvent::AfterRemove { range } => Some(range.start),
            EditEvent::Cancelled => None,
        }
    }

    /// The single character this event types, if it types exactly one.
    /// Break events type a newline; multi-character insertions (paste)
    /// yield `None` and never trigger rules.
    pub fn typed_char(&self) -> Option<char> {
        match self {
            EditEvent::BeforeInsert { text, .. }
            | EditEvent::Insert { text, .. }
            | EditEvent::AfterInsert { text, .. } => {
                let mut chars = text.chars();
                let first = chars.next()?;
                if chars.next().is_some() {
                    None
                } else {
                    Some(first)
                }
            }
            EditEvent::BeforeBreak { .. }
            | EditEvent::Break { .. }
            | EditEvent::AfterBreak { .. } => Some('\n'),
            _ => None,
        }
    }
}
