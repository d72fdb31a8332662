//! Edit rules
//!
//! A rule couples a trigger (phase + typed character) with a conjunction of
//! optional conditions on the document around the caret, and an insertion
//! action to run when they all hold. Rules are immutable value objects
//! assembled once at configuration time; invalid combinations are rejected
//! by the validating constructor, not discovered during editing.

use crate::context::EditContext;
use crate::error::RuleConfigError;
use crate::matching::{ScanDirection, TokenPattern, TypePredicate};
use crate::rules::operation::{BoilerplateOp, TextOperation};
use crate::rules::phase::{EditEvent, EditPhase};

/// Plain configuration data for one rule.
///
/// All optional fields start unset; the pattern slots are assigned through
/// the fallible setters so a double assignment fails at the call site
/// instead of silently overwriting.
#[derive(Debug, Clone)]
pub struct RuleDef {
    pub name: String,
    pub phase: EditPhase,
    pub triggers: Vec<char>,
    pub at_line_end: Option<bool>,
    pub preceding_token: Option<TypePredicate>,
    pub preceded_by: Option<TokenPattern>,
    pub followed_by: Option<TokenPattern>,
    pub insert: String,
    pub caret_backup: usize,
}

impl RuleDef {
    pub fn new(
        name: impl Into<String>,
        phase: EditPhase,
        triggers: impl IntoIterator<Item = char>,
        insert: impl Into<String>,
    ) -> Self {
        RuleDef {
            name: name.into(),
            phase,
            triggers: triggers.into_iter().collect(),
            at_line_end: None,
            preceding_token: None,
            preceded_by: None,
            followed_by: None,
            insert: insert.into(),
            caret_backup: 0,
        }
    }

    /// Require the caret to be (or not be) at the end of its line.
    pub fn at_line_end(mut self, required: bool) -> Self {
        self.at_line_end = Some(required);
        self
    }

    /// Require the token just before the caret to satisfy a predicate.
    pub fn preceding_token(mut self, pred: impl Into<TypePredicate>) -> Self {
        self.preceding_token = Some(pred.into());
        self
    }

    /// Attach the backward pattern. Fails if one is already attached.
    pub fn preceded_by(mut self, pattern: TokenPattern) -> Result<Self, RuleConfigError> {
        if self.preceded_by.is_some() {
            return Err(RuleConfigError::PatternAlreadySet {
                rule: self.name,
                which: "preceded-by",
            });
        }
        self.preceded_by = Some(pattern);
        Ok(self)
    }

    /// Attach the forward pattern. Fails if one is already attached.
    pub fn followed_by(mut self, pattern: TokenPattern) -> Result<Self, RuleConfigError> {
        if self.followed_by.is_some() {
            return Err(RuleConfigError::PatternAlreadySet {
                rule: self.name,
                which: "followed-by",
            });
        }
        self.followed_by = Some(pattern);
        Ok(self)
    }

    pub fn caret_backup(mut self, backup: usize) -> Self {
        self.caret_backup = backup;
        self
    }

    /// Validate and seal the rule.
    pub fn build(self) -> Result<EditRule, RuleConfigError> {
        EditRule::new(self)
    }
}

/// A sealed, validated rule.
#[derive(Debug, Clone)]
pub struct EditRule {
    def: RuleDef,
}

impl EditRule {
    /// The single validating constructor: rejects empty trigger sets and
    /// pattern slots whose scan direction contradicts the slot.
    pub fn new(def: RuleDef) -> Result<Self, RuleConfigError> {
        if def.triggers.is_empty() {
            return Err(RuleConfigError::NoTrigger { rule: def.name });
        }
        if let Some(p) = &def.preceded_by {
            if p.direction() != ScanDirection::Backward {
                return Err(RuleConfigError::BadPatternDirection {
                    rule: def.name,
                    which: "preceded-by",
                    expected: "backward",
                });
            }
        }
        if let Some(p) = &def.followed_by {
            if p.direction() != ScanDirection::Forward {
                return Err(RuleConfigError::BadPatternDirection {
                    rule: def.name,
                    which: "followed-by",
                    expected: "forward",
                });
            }
        }
        Ok(EditRule { def })
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// The phase this rule initiates from.
    pub fn phase(&self) -> EditPhase {
        self.def.phase
    }

    pub fn insert_text(&self) -> &str {
        &self.def.insert
    }

    /// Decide whether this rule fires for `event`.
    ///
    /// The checks run in a fixed order: phase gate, line-position
    /// constraint, trigger character, preceding-token test, backward
    /// pattern, forward pattern. Unset checks hold vacuously. Evaluation
    /// is read-only and idempotent; any host query failure counts as a
    /// mismatch for this rule only.
    pub fn evaluate(
        &self,
        event: &EditEvent<'_>,
        ctx: &dyn EditContext,
    ) -> Option<Box<dyn TextOperation>> {
        if event.phase() != Some(self.def.phase) {
            return None;
        }
        let offset = event.offset()?;

        if let Some(required) = self.def.at_line_end {
            let at_end = ctx.is_line_end(offset).ok()?;
            if at_end != required {
                return None;
            }
        }

        let typed = event.typed_char()?;
        if !self.def.triggers.contains(&typed) {
            return None;
        }

        if let Some(pred) = &self.def.preceding_token {
            let kind = ctx.token_before(offset).ok()??;
            if !pred.test(kind) {
                return None;
            }
        }

        if let Some(pattern) = &self.def.preceded_by {
            let mut cursor = ctx.cursor_at(offset).ok()?;
            if !pattern.matches(cursor.as_mut()) {
                return None;
            }
        }

        if let Some(pattern) = &self.def.followed_by {
            let mut cursor = ctx.cursor_at(offset).ok()?;
            if !pattern.matches(cursor.as_mut()) {
                return None;
            }
        }

        Some(Box::new(BoilerplateOp::new(
            self.def.name.clone(),
            self.def.insert.clone(),
            self.def.caret_backup,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DocumentContext;
    use crate::grammar::GrammarToken;
    use crate::matching::PatternBuilder;

    fn colon() -> u16 {
        GrammarToken::Colon.token_type()
    }

    fn ident() -> u16 {
        GrammarToken::Ident.token_type()
    }

    fn ws() -> u16 {
        GrammarToken::Ws.token_type()
    }

    fn semi() -> u16 {
        GrammarToken::Semi.token_type()
    }

    fn brace_rule() -> EditRule {
        let preceded = PatternBuilder::backward()
            .expect(ident())
            .expect(colon())
            .ignoring(ws())
            .stopping_on(semi())
            .unwrap();
        RuleDef::new("block-skeleton", EditPhase::BeforeInsert, ['{'], "\n  ")
            .preceded_by(preceded)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_wrong_phase_is_rejected_without_context_queries() {
        let rule = brace_rule();
        let doc = DocumentContext::new("rule: ");
        let event = EditEvent::AfterInsert {
            offset: 6,
            text: "{",
        };
        assert!(rule.evaluate(&event, &doc).is_none());
    }

    #[test]
    fn test_trigger_character_must_match() {
        let rule = brace_rule();
        let doc = DocumentContext::new("rule: ");
        let event = EditEvent::BeforeInsert {
            offset: 6,
            text: "(",
        };
        assert!(rule.evaluate(&event, &doc).is_none());
    }

    #[test]
    fn test_full_match_produces_operation() {
        let rule = brace_rule();
        let doc = DocumentContext::new("rule: ");
        let event = EditEvent::BeforeInsert {
            offset: 6,
            text: "{",
        };
        let op = rule.evaluate(&event, &doc).expect("rule should match");
        assert_eq!(op.rule_name(), "block-skeleton");
    }

    #[test]
    fn test_preceding_pattern_failure_is_a_plain_mismatch() {
        let rule = brace_rule();
        // a semicolon stands between the caret and the colon
        let doc = DocumentContext::new("rule: x; ");
        let event = EditEvent::BeforeInsert {
            offset: 9,
            text: "{",
        };
        assert!(rule.evaluate(&event, &doc).is_none());
    }

    #[test]
    fn test_line_end_constraint() {
        let preceded = PatternBuilder::backward()
            .expect(colon())
            .ignoring(ws())
            .stopping_on(semi())
            .unwrap();
        let rule = RuleDef::new("eol-only", EditPhase::BeforeInsert, ['{'], "}")
            .at_line_end(true)
            .preceded_by(preceded)
            .unwrap()
            .build()
            .unwrap();

        let doc = DocumentContext::new("rule: \nnext");
        let at_eol = EditEvent::BeforeInsert {
            offset: 6,
            text: "{",
        };
        assert!(rule.evaluate(&at_eol, &doc).is_some());

        let doc = DocumentContext::new("rule: x\n");
        let mid_line = EditEvent::BeforeInsert {
            offset: 6,
            text: "{",
        };
        assert!(rule.evaluate(&mid_line, &doc).is_none());
    }

    #[test]
    fn test_preceding_token_test() {
        let rule = RuleDef::new("after-colon", EditPhase::BeforeInsert, [' '], " ")
            .preceding_token(colon())
            .build()
            .unwrap();

        let doc = DocumentContext::new("rule:");
        let event = EditEvent::BeforeInsert {
            offset: 5,
            text: " ",
        };
        assert!(rule.evaluate(&event, &doc).is_some());

        let doc = DocumentContext::new("rule");
        let event = EditEvent::BeforeInsert {
            offset: 4,
            text: " ",
        };
        assert!(rule.evaluate(&event, &doc).is_none());
    }

    #[test]
    fn test_bad_offset_counts_as_mismatch() {
        let rule = brace_rule();
        let doc = DocumentContext::new("rule: ");
        let event = EditEvent::BeforeInsert {
            offset: 99,
            text: "{",
        };
        assert!(rule.evaluate(&event, &doc).is_none());
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let rule = brace_rule();
        let doc = DocumentContext::new("rule: ");
        let event = EditEvent::BeforeInsert {
            offset: 6,
            text: "{",
        };
        assert!(rule.evaluate(&event, &doc).is_some());
        assert!(rule.evaluate(&event, &doc).is_some());
    }

    #[test]
    fn test_double_pattern_assignment_fails() {
        let p1 = PatternBuilder::backward()
            .expect(colon())
            .unstopped()
            .unwrap();
        let p2 = p1.clone();
        let err = RuleDef::new("dup", EditPhase::BeforeInsert, ['{'], "x")
            .preceded_by(p1)
            .unwrap()
            .preceded_by(p2)
            .unwrap_err();
        assert!(matches!(err, RuleConfigError::PatternAlreadySet { .. }));
    }

    #[test]
    fn test_empty_trigger_set_fails() {
        let err = RuleDef::new("no-trigger", EditPhase::BeforeInsert, [], "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, RuleConfigError::NoTrigger { .. }));
    }

    #[test]
    fn test_pattern_direction_is_validated() {
        let forward = PatternBuilder::forward()
            .expect(colon())
            .unstopped()
            .unwrap();
        let err = RuleDef::new("wrong-way", EditPhase::BeforeInsert, ['{'], "x")
            .preceded_by(forward)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, RuleConfigError::BadPatternDirection { .. }));
    }
}
