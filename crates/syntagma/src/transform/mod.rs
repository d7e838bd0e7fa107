//! # Grammar Transformations
//!
//! Named, reversible rewrites of a [`ProductionSet`].
//!
//! ## Overview
//!
//! Every rewrite of a production set goes through a [`SetTransformation`]: a
//! named group of [`SetOperation`]s staged on a [`TransformationBuilder`] and
//! applied atomically. The set logs each transformation, and inverting a
//! logged transformation restores the exact production multiset it started
//! from.
//!
//! The transformations themselves implement [`GrammarTransform`]:
//!
//! - [`MacroExpansion`]: rewrite macro symbols into plain productions
//! - [`DuplicateRemoval`]: drop structurally equal repeats
//! - [`UnreachableRemoval`]: drop rules not reachable from the start symbol
//! - [`UnitExpansion`]: inline `A -> B` chains
//! - [`LeftRecursionRemoval`]: unfold direct and indirect left recursion
//! - [`LeftFactoring`]: split common prefixes into primed helper rules
//!
//! All of them follow the same shape: check preconditions, reset the set's
//! log, walk a snapshot of the rules, stage one transformation per qualifying
//! rule or group, and return the log.

use compact_str::CompactString;
use thiserror::Error;

use crate::rule::{ProductionRule, ProductionSet};
use crate::symbol::{NonTerminal, Notation, NotationStyle};
use crate::token::TokenKind;

mod duplicates;
mod factoring;
mod left_recursion;
mod macro_expansion;
mod op;
mod transformation;
mod unit_expansion;
mod unreachable;

pub use duplicates::DuplicateRemoval;
pub use factoring::LeftFactoring;
pub use left_recursion::LeftRecursionRemoval;
pub use macro_expansion::MacroExpansion;
pub use op::{SetOperation, SetOperationKind};
pub use transformation::{SetTransformation, TransformationBuilder};
pub use unit_expansion::UnitExpansion;
pub use unreachable::UnreachableRemoval;

/// A grammar rewrite that records everything it does.
///
/// Implementations reset the set's log, stage their rewrites through
/// [`ProductionSet::transformation`], and hand the resulting log back to the
/// caller. Running a transform on a set it does not apply to returns an empty
/// list and leaves the set untouched.
pub trait GrammarTransform<K: TokenKind> {
    /// Name recorded in pipeline reports.
    fn name(&self) -> &'static str;

    /// Rewrite `set`, returning the transformations logged while doing so.
    fn execute(
        &self,
        set: &mut ProductionSet<K>,
    ) -> Result<Vec<SetTransformation<K>>, TransformError>;
}

/// Errors raised while applying transformations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The set has no start symbol but the rewrite needs one.
    #[error("the production set has no start symbol")]
    MissingStart,

    /// A non-terminal was looked up but has no productions.
    #[error("non-terminal `{head}` has no productions")]
    EmptyLookup { head: NonTerminal },

    /// A rule still carries a macro symbol where none is allowed.
    #[error("unexpected macro symbol in `{production}`")]
    UnexpectedMacro { production: CompactString },

    /// A rule scheduled for removal is not in the set.
    #[error("production `{production}` is not in the set")]
    MissingProduction { production: CompactString },

    /// A rule scheduled for addition is structurally present already.
    #[error("production `{production}` is already in the set")]
    DuplicateProduction { production: CompactString },
}

impl TransformError {
    /// Create an empty lookup error.
    #[must_use]
    pub const fn empty_lookup(head: NonTerminal) -> Self {
        Self::EmptyLookup { head }
    }

    /// Create an unexpected macro error naming the offending rule.
    #[must_use]
    pub fn unexpected_macro<K: TokenKind>(rule: &ProductionRule<K>) -> Self {
        Self::UnexpectedMacro {
            production: rule.render(NotationStyle::Sentential).into(),
        }
    }

    /// Create a missing production error naming the absent rule.
    #[must_use]
    pub fn missing_production<K: TokenKind>(rule: &ProductionRule<K>) -> Self {
        Self::MissingProduction {
            production: rule.render(NotationStyle::Sentential).into(),
        }
    }

    /// Create a duplicate production error naming the repeated rule.
    #[must_use]
    pub fn duplicate_production<K: TokenKind>(rule: &ProductionRule<K>) -> Self {
        Self::DuplicateProduction {
            production: rule.render(NotationStyle::Sentential).into(),
        }
    }
}
