//! Text operations produced by matched rules
//!
//! A successful rule evaluation yields a [`TextOperation`]: a bundle of
//! phase callbacks the host drives through the rest of the edit. The
//! callbacks are the only place the engine mutates anything, and they only
//! do so through the edit context the host hands in.

use crate::context::{ContextError, EditContext};

/// Phase callbacks for one selected edit operation.
///
/// Callbacks default to no-ops so an operation implements only the family
/// it participates in. `cancelled` must leave the operation reusable-free:
/// after it runs the host discards the operation.
pub trait TextOperation {
    /// Name of the rule this operation came from, for host diagnostics.
    fn rule_name(&self) -> &str;

    fn on_before_insert(&mut self, _ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        Ok(())
    }

    fn on_insert(&mut self, _ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        Ok(())
    }

    fn on_after_insert(&mut self, _ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        Ok(())
    }

    fn on_before_remove(&mut self, _ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        Ok(())
    }

    fn on_remove(&mut self, _ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        Ok(())
    }

    fn on_after_remove(&mut self, _ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        Ok(())
    }

    fn cancelled(&mut self, _ctx: &mut dyn EditContext) {}
}

/// The boilerplate-insertion operation.
///
/// On the insert phase it inserts the rule's literal text at the caret
/// (the host leaves the caret at the end of the triggering edit), and on
/// the after-insert phase it places the caret `caret_backup` characters
/// before the insertion end, clamped to the insertion start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoilerplateOp {
    rule_name: String,
    text: String,
    caret_backup: usize,
    inserted: Option<(usize, usize)>,
}

impl BoilerplateOp {
    pub fn new(rule_name: impl Into<String>, text: impl Into<String>, caret_backup: usize) -> Self {
        BoilerplateOp {
            rule_name: rule_name.into(),
            text: text.into(),
            caret_backup,
            inserted: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret_backup(&self) -> usize {
        self.caret_backup
    }
}

impl TextOperation for BoilerplateOp {
    fn rule_name(&self) -> &str {
        &self.rule_name
    }

    fn on_insert(&mut self, ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        let start = ctx.caret();
        let end = ctx.insert(start, &self.text)?;
        self.inserted = Some((start, end));
        Ok(())
    }

    fn on_after_insert(&mut self, ctx: &mut dyn EditContext) -> Result<(), ContextError> {
        if let Some((start, end)) = self.inserted {
            let caret = end.saturating_sub(self.caret_backup).max(start);
            ctx.set_caret(caret)?;
        }
        Ok(())
    }

    fn cancelled(&mut self, _ctx: &mut dyn EditContext) {
        self.inserted = None;
    }
}
