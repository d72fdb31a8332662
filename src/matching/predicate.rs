//! Token-type predicates
//!
//! A predicate is a pure test over token types, built once at configuration
//! time. Predicates compose via logical OR only; that is all the rule
//! format needs, and it keeps the merged form flat (no predicate trees).

use crate::tokens::TokenType;

/// Pure `TokenType -> bool` test. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePredicate {
    /// Matches nothing. The identity for [`TypePredicate::or`].
    Never,
    /// Matches every token type.
    Any,
    One(TokenType),
    AnyOf(Vec<TokenType>),
}

impl TypePredicate {
    pub fn one(kind: TokenType) -> Self {
        TypePredicate::One(kind)
    }

    /// Predicate matching any of the given types. Collapses to the cheaper
    /// variants for zero or one element.
    pub fn any_of<I: IntoIterator<Item = TokenType>>(kinds: I) -> Self {
        let mut kinds: Vec<TokenType> = kinds.into_iter().collect();
        kinds.sort_unstable();
        kinds.dedup();
        match kinds.len() {
            0 => TypePredicate::Never,
            1 => TypePredicate::One(kinds[0]),
            _ => TypePredicate::AnyOf(kinds),
        }
    }

    pub fn test(&self, kind: TokenType) -> bool {
        match self {
            TypePredicate::Never => false,
            TypePredicate::Any => true,
            TypePredicate::One(k) => *k == kind,
            TypePredicate::AnyOf(ks) => ks.binary_search(&kind).is_ok(),
        }
    }

    /// Logical OR of two predicates.
    pub fn or(self, other: TypePredicate) -> TypePredicate {
        match (self, other) {
            (TypePredicate::Any, _) | (_, TypePredicate::Any) => TypePredicate::Any,
            (TypePredicate::Never, p) | (p, TypePredicate::Never) => p,
            (a, b) => {
                let mut kinds = a.into_kinds();
                kinds.extend(b.into_kinds());
                TypePredicate::any_of(kinds)
            }
        }
    }

    fn into_kinds(self) -> Vec<TokenType> {
        match self {
            TypePredicate::Never | TypePredicate::Any => vec![],
            TypePredicate::One(k) => vec![k],
            TypePredicate::AnyOf(ks) => ks,
        }
    }
}

impl From<TokenType> for TypePredicate {
    fn from(kind: TokenType) -> Self {
        TypePredicate::One(kind)
    }
}
