//! Declarative rule files
//!
//! Rules are registered declaratively: a YAML (or JSON) document lists
//! them with token *names*, and resolution against a vocabulary turns the
//! names into validated [`EditRule`] values. Loading is all-or-nothing -
//! any unknown name, empty pattern, or invalid combination fails the whole
//! file with a descriptive error, and nothing is partially registered.
//!
//! Token name entries come in two forms. A plain name (`COLON`) must match
//! a vocabulary name exactly. Anything containing regex metacharacters
//! (`LINE_COMMENT|BLOCK_COMMENT`, `.*_COMMENT`) is compiled as a regular
//! expression and expands to every vocabulary name it fully matches; a
//! class matching nothing is an error, since it almost certainly means a
//! typo.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RuleConfigError;
use crate::matching::{PatternBuilder, TokenPattern, TypePredicate};
use crate::rules::{EditPhase, EditRule, RuleDef};
use crate::tokens::Vocabulary;

/// Serde model of a rule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    pub rules: Vec<RuleEntry>,
}

/// One rule as written in a rule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleEntry {
    pub name: String,
    /// Phase the rule initiates from.
    #[serde(default = "default_phase")]
    pub on: EditPhase,
    /// Characters that trigger the rule.
    pub trigger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_line_end: Option<bool>,
    /// Token-name test for the token just before the caret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preceding_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preceded_by: Option<PatternEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followed_by: Option<PatternEntry>,
    pub insert: String,
    #[serde(default)]
    pub caret_backup: usize,
}

fn default_phase() -> EditPhase {
    EditPhase::BeforeInsert
}

/// One token pattern as written in a rule file, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PatternEntry {
    pub pattern: Vec<String>,
    #[serde(default)]
    pub ignoring: Vec<String>,
    #[serde(default)]
    pub stopping_on: Vec<String>,
    #[serde(default)]
    pub match_at_boundary: bool,
}

/// Load and resolve a rule file from disk.
pub fn load_rules(
    path: impl AsRef<Path>,
    vocab: &Vocabulary,
) -> Result<Vec<EditRule>, RuleConfigError> {
    let text = fs::read_to_string(path)?;
    load_rules_from_str(&text, vocab)
}

/// Parse and resolve a YAML rule document.
pub fn load_rules_from_str(
    text: &str,
    vocab: &Vocabulary,
) -> Result<Vec<EditRule>, RuleConfigError> {
    let file: RuleFile = serde_yaml::from_str(text)?;
    resolve(&file, vocab)
}

/// Resolve a parsed rule file against a vocabulary.
pub fn resolve(file: &RuleFile, vocab: &Vocabulary) -> Result<Vec<EditRule>, RuleConfigError> {
    file.rules
        .iter()
        .map(|entry| resolve_entry(entry, vocab))
        .collect()
}

fn resolve_entry(entry: &RuleEntry, vocab: &Vocabulary) -> Result<EditRule, RuleConfigError> {
    let mut def = RuleDef::new(
        entry.name.clone(),
        entry.on,
        entry.trigger.chars(),
        entry.insert.clone(),
    )
    .caret_backup(entry.caret_backup);

    if let Some(required) = entry.at_line_end {
        def = def.at_line_end(required);
    }
    if let Some(name) = &entry.preceding_token {
        def = def.preceding_token(resolve_class(name, vocab)?);
    }
    if let Some(spec) = &entry.preceded_by {
        def = def.preceded_by(resolve_pattern(spec, vocab, PatternBuilder::backward())?)?;
    }
    if let Some(spec) = &entry.followed_by {
        def = def.followed_by(resolve_pattern(spec, vocab, PatternBuilder::forward())?)?;
    }
    def.build()
}

fn resolve_pattern(
    spec: &PatternEntry,
    vocab: &Vocabulary,
    mut builder: PatternBuilder,
) -> Result<TokenPattern, RuleConfigError> {
    for name in &spec.pattern {
        builder = builder.expect(resolve_class(name, vocab)?);
    }
    for name in &spec.ignoring {
        builder = builder.ignoring(resolve_class(name, vocab)?);
    }
    if spec.match_at_boundary {
        builder = builder.match_at_boundary();
    }
    builder.stopping_on(resolve_class_list(&spec.stopping_on, vocab)?)
}

fn resolve_class_list(
    names: &[String],
    vocab: &Vocabulary,
) -> Result<TypePredicate, RuleConfigError> {
    let mut merged = TypePredicate::Never;
    for name in names {
        merged = merged.or(resolve_class(name, vocab)?);
    }
    Ok(merged)
}

/// Resolve one token-name entry to a predicate.
fn resolve_class(class: &str, vocab: &Vocabulary) -> Result<TypePredicate, RuleConfigError> {
    if is_plain_name(class) {
        return match vocab.lookup(class) {
            Some(kind) => Ok(TypePredicate::one(kind)),
            None => Err(RuleConfigError::UnknownTokenName {
                name: class.to_string(),
            }),
        };
    }

    let re = Regex::new(&format!("^(?:{})$", class)).map_err(|error| {
        RuleConfigError::BadTokenClass {
            class: class.to_string(),
            error,
        }
    })?;
    let kinds: Vec<_> = vocab
        .names()
        .enumerate()
        .filter(|(_, name)| re.is_match(name))
        .map(|(i, _)| i as u16)
        .collect();
    if kinds.is_empty() {
        return Err(RuleConfigError::EmptyTokenClass {
            class: class.to_string(),
        });
    }
    Ok(TypePredicate::any_of(kinds))
}

fn is_plain_name(class: &str) -> bool {
    !class.is_empty()
        && class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One-line summary per resolved rule, for `check`-style reporting.
pub fn summarize(rules: &[EditRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&format!(
            "{} [{}] inserts {:?}\n",
            rule.name(),
            rule.phase(),
            rule.insert_text()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar;

    const BLOCK_RULE: &str = r#"
rules:
  - name: block-skeleton
    trigger: "{"
    at-line-end: true
    preceded-by:
      pattern: [IDENT, COLON]
      ignoring: ["WS", "NEWLINE", "LINE_COMMENT|BLOCK_COMMENT"]
      stopping-on: [SEMI]
    insert: "\n\n}"
    caret-backup: 2
"#;

    #[test]
    fn test_load_and_resolve() {
        let rules = load_rules_from_str(BLOCK_RULE, grammar::vocabulary()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name(), "block-skeleton");
        assert_eq!(rules[0].phase(), EditPhase::BeforeInsert);
        assert_eq!(rules[0].insert_text(), "\n\n}");
    }

    #[test]
    fn test_unknown_token_name_fails_the_load() {
        let text = BLOCK_RULE.replace("IDENT", "IDNET");
        let err = load_rules_from_str(&text, grammar::vocabulary()).unwrap_err();
        assert!(matches!(err, RuleConfigError::UnknownTokenName { ref name } if name == "IDNET"));
    }

    #[test]
    fn test_empty_pattern_fails_the_load() {
        let text = "rules:\n  - name: empty\n    trigger: \"{\"\n    preceded-by:\n      pattern: []\n    insert: x\n";
        let err = load_rules_from_str(text, grammar::vocabulary()).unwrap_err();
        assert!(matches!(err, RuleConfigError::EmptyPattern));
    }

    #[test]
    fn test_class_matching_nothing_fails() {
        let text = BLOCK_RULE.replace("LINE_COMMENT|BLOCK_COMMENT", "NO_SUCH_.*");
        let err = load_rules_from_str(&text, grammar::vocabulary()).unwrap_err();
        assert!(matches!(err, RuleConfigError::EmptyTokenClass { .. }));
    }

    #[test]
    fn test_regex_class_expands_to_names() {
        let pred = resolve_class("LINE_COMMENT|BLOCK_COMMENT", grammar::vocabulary()).unwrap();
        let line = grammar::vocabulary().lookup("LINE_COMMENT").unwrap();
        let block = grammar::vocabulary().lookup("BLOCK_COMMENT").unwrap();
        let ws = grammar::vocabulary().lookup("WS").unwrap();
        assert!(pred.test(line));
        assert!(pred.test(block));
        assert!(!pred.test(ws));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let text = "rules:\n  - name: x\n    trigger: \"{\"\n    insert: y\n    caret-bakup: 1\n";
        assert!(load_rules_from_str(text, grammar::vocabulary()).is_err());
    }

    #[test]
    fn test_json_rule_files_share_the_model() {
        let json = r#"{"rules":[{"name":"semi","trigger":";","insert":";"}]}"#;
        let file: RuleFile = serde_json::from_str(json).unwrap();
        let rules = resolve(&file, grammar::vocabulary()).unwrap();
        assert_eq!(rules[0].name(), "semi");
    }

    #[test]
    fn test_summary_lines() {
        let rules = load_rules_from_str(BLOCK_RULE, grammar::vocabulary()).unwrap();
        let summary = summarize(&rules);
        assert_eq!(summary, "block-skeleton [before-insert] inserts \"\\n\\n}\"\n");
    }
}
