//! Configuration-time error types
//!
//! Everything here is raised while patterns, rules, or rule files are being
//! built - never during evaluation. Evaluation mismatches are not errors
//! (they yield "no match"), and host I/O failures are modeled separately as
//! [`crate::context::ContextError`].

use std::fmt;
use std::io;

/// Errors raised while building patterns and rules or loading rule files.
#[derive(Debug)]
pub enum RuleConfigError {
    /// A pattern was built with a zero-length predicate sequence.
    EmptyPattern,
    /// The same pattern slot was assigned twice on one rule.
    PatternAlreadySet { rule: String, which: &'static str },
    /// A pattern was attached to the slot of the opposite scan direction.
    BadPatternDirection {
        rule: String,
        which: &'static str,
        expected: &'static str,
    },
    /// A rule was built with an empty trigger character set.
    NoTrigger { rule: String },
    /// A rule file named a token that is not in the vocabulary.
    UnknownTokenName { name: String },
    /// A token-name class matched nothing in the vocabulary.
    EmptyTokenClass { class: String },
    /// A token-name class failed to compile as a regular expression.
    BadTokenClass { class: String, error: regex::Error },
    /// The rule file failed to deserialize.
    Parse(serde_yaml::Error),
    Io(io::Error),
}

impl fmt::Display for RuleConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleConfigError::EmptyPattern => {
                write!(f, "token pattern must have at least one element")
            }
            RuleConfigError::PatternAlreadySet { rule, which } => {
                write!(f, "rule '{}': {} pattern assigned twice", rule, which)
            }
            RuleConfigError::BadPatternDirection {
                rule,
                which,
                expected,
            } => {
                write!(
                    f,
                    "rule '{}': {} pattern must scan {}",
                    rule, which, expected
                )
            }
            RuleConfigError::NoTrigger { rule } => {
                write!(f, "rule '{}': trigger character set is empty", rule)
            }
            RuleConfigError::UnknownTokenName { name } => {
                write!(f, "unknown token name '{}'", name)
            }
            RuleConfigError::EmptyTokenClass { class } => {
                write!(f, "token class '{}' matches no token name", class)
            }
            RuleConfigError::BadTokenClass { class, error } => {
                write!(f, "token class '{}' is not a valid pattern: {}", class, error)
            }
            RuleConfigError::Parse(e) => write!(f, "rule file parse error: {}", e),
            RuleConfigError::Io(e) => write!(f, "rule file read error: {}", e),
        }
    }
}

impl std::error::Error for RuleConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleConfigError::BadTokenClass { error, .. } => Some(error),
            RuleConfigError::Parse(e) => Some(e),
            RuleConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for RuleConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        RuleConfigError::Parse(e)
    }
}

impl From<io::Error> for RuleConfigError {
    fn from(e: io::Error) -> Self {
        RuleConfigError::Io(e)
    }
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, RuleConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_name_the_rule() {
        let err = RuleConfigError::PatternAlreadySet {
            rule: "close-brace".into(),
            which: "preceded-by",
        };
        let msg = err.to_string();
        assert!(msg.contains("close-brace"));
        assert!(msg.contains("preceded-by"));
    }

    #[test]
    fn test_unknown_token_message() {
        let err = RuleConfigError::UnknownTokenName {
            name: "IDNET".into(),
        };
        assert_eq!(err.to_string(), "unknown token name 'IDNET'");
    }
}
