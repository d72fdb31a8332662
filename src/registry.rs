//! Rule registry and the per-edit session
//!
//! The registry is a plain lookup structure: rules grouped by the phase
//! they initiate from, dispatched in registration order. It is configured
//! up front with an explicit rule list and not mutated while in service.
//!
//! The session is the small state machine that runs one edit through its
//! phases. The operation selected at the "before" phase is pinned for the
//! rest of the edit; later phases reuse it rather than re-dispatching, so
//! a mid-edit document change can never switch rules.

use std::collections::HashMap;

use crate::context::EditContext;
use crate::rules::phase::{EditEvent, EditPhase};
use crate::rules::rule::EditRule;
use crate::rules::TextOperation;

/// Phase-keyed rule store with registration-order dispatch.
pub struct RuleRegistry {
    by_phase: HashMap<EditPhase, Vec<EditRule>>,
    count: usize,
}

impl RuleRegistry {
    pub fn empty() -> Self {
        RuleRegistry {
            by_phase: HashMap::new(),
            count: 0,
        }
    }

    /// Registry configured with an explicit rule list. Registration order
    /// is preserved per phase and is the documented dispatch priority.
    pub fn new(rules: impl IntoIterator<Item = EditRule>) -> Self {
        let mut registry = Self::empty();
        for rule in rules {
            registry.add_rule(rule);
        }
        registry
    }

    /// Append one rule. Configuration-time only; the registry must not be
    /// mutated while edits are being dispatched.
    pub fn add_rule(&mut self, rule: EditRule) {
        self.by_phase.entry(rule.phase()).or_default().push(rule);
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Rules registered for one phase, in dispatch order.
    pub fn rules_for(&self, phase: EditPhase) -> &[EditRule] {
        self.by_phase.get(&phase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find the first rule whose conditions hold for `event` and return
    /// its operation. A phase with no rules returns `None` without
    /// touching the context at all.
    pub fn dispatch(
        &self,
        event: &EditEvent<'_>,
        ctx: &dyn EditContext,
    ) -> Option<Box<dyn TextOperation>> {
        let phase = event.phase()?;
        let candidates = self.by_phase.get(&phase)?;
        candidates.iter().find_map(|rule| rule.evaluate(event, ctx))
    }
}

/// Where one edit currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    CandidateSelected,
    TextInserted,
    CaretPlaced,
}

/// Drives one edit at a time through its phases against a registry.
///
/// `Idle -> CandidateSelected -> TextInserted -> CaretPlaced`, then back
/// to `Idle` when the next edit begins; cancellation returns to `Idle`
/// from any state and discards the pinned operation.
pub struct EditSession<'r> {
    registry: &'r RuleRegistry,
    state: SessionState,
    pinned: Option<Box<dyn TextOperation>>,
}

impl<'r> EditSession<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        EditSession {
            registry,
            state: SessionState::Idle,
            pinned: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Name of the rule pinned by the current edit, if any.
    pub fn pinned_rule(&self) -> Option<&str> {
        self.pinned.as_deref().map(TextOperation::rule_name)
    }

    /// Feed one event through the state machine and return the new state.
    ///
    /// A "before" event dispatches and pins; the matching apply and
    /// "after" events run the pinned operation's callbacks; `Cancelled`
    /// resets. Events that do not fit the current state are ignored (the
    /// host's keystroke simply proceeds unmodified). A context failure
    /// inside a callback cancels the edit rather than leaving the session
    /// half-applied.
    pub fn advance(&mut self, event: &EditEvent<'_>, ctx: &mut dyn EditContext) -> SessionState {
        match (self.state, event) {
            (SessionState::Idle, _) | (SessionState::CaretPlaced, _) => {
                self.begin(event, ctx);
            }
            (_, EditEvent::Cancelled) => {
                self.cancel(ctx);
            }
            (SessionState::CandidateSelected, EditEvent::Insert { .. })
            | (SessionState::CandidateSelected, EditEvent::Break { .. }) => {
                self.run(ctx, |op, ctx| op.on_insert(ctx));
                if self.state == SessionState::CandidateSelected {
                    self.state = SessionState::TextInserted;
                }
            }
            (SessionState::CandidateSelected, EditEvent::Remove { .. }) => {
                self.run(ctx, |op, ctx| op.on_remove(ctx));
                if self.state == SessionState::CandidateSelected {
                    self.state = SessionState::TextInserted;
                }
            }
            (SessionState::TextInserted, EditEvent::AfterInsert { .. })
            | (SessionState::TextInserted, EditEvent::AfterBreak { .. }) => {
                self.run(ctx, |op, ctx| op.on_after_insert(ctx));
                if self.state == SessionState::TextInserted {
                    self.state = SessionState::CaretPlaced;
                    self.pinned = None;
                }
            }
            (SessionState::TextInserted, EditEvent::AfterRemove { .. }) => {
                self.run(ctx, |op, ctx| op.on_after_remove(ctx));
                if self.state == SessionState::TextInserted {
                    self.state = SessionState::CaretPlaced;
                    self.pinned = None;
                }
            }
            _ => {}
        }
        self.state
    }

    /// Discard the pinned operation and return to `Idle`.
    pub fn cancel(&mut self, ctx: &mut dyn EditContext) {
        if let Some(mut op) = self.pinned.take() {
            op.cancelled(ctx);
        }
        self.state = SessionState::Idle;
    }

    fn begin(&mut self, event: &EditEvent<'_>, ctx: &mut dyn EditContext) {
        self.state = SessionState::Idle;
        self.pinned = None;
        let before = matches!(
            event,
            EditEvent::BeforeInsert { .. }
                | EditEvent::BeforeRemove { .. }
                | EditEvent::BeforeBreak { .. }
        );
        if !before {
            return;
        }
        if let Some(mut op) = self.registry.dispatch(event, ctx) {
            let outcome = match event {
                EditEvent::BeforeRemove { .. } => op.on_before_remove(ctx),
                _ => op.on_before_insert(ctx),
            };
            match outcome {
                Ok(()) => {
                    self.pinned = Some(op);
                    self.state = SessionState::CandidateSelected;
                }
                Err(_) => {
                    op.cancelled(ctx);
                }
            }
        }
    }

    fn run<F>(&mut self, ctx: &mut dyn EditContext, f: F)
    where
        F: FnOnce(&mut Box<dyn TextOperation>, &mut dyn EditContext) -> Result<(), crate::context::ContextError>,
    {
        let failed = match self.pinned.as_mut() {
            Some(op) => f(op, ctx).is_err(),
            None => false,
        };
        if failed {
            self.cancel(ctx);
        }
    }
}
