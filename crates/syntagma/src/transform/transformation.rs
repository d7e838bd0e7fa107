//! Named groups of set operations.

use compact_str::CompactString;

use crate::rule::{ProductionRule, ProductionSet};
use crate::symbol::{NonTerminal, Symbol};
use crate::token::TokenKind;
use crate::transform::TransformError;
use crate::transform::op::{SetOperation, SetOperationKind};

/// A named, ordered group of operations applied to a production set.
///
/// Transformations come out of a [`TransformationBuilder`] and land in the
/// set's log. Replaying one with [`Self::apply`] repeats the rewrite on
/// another set; [`Self::revert`] undoes it operation by operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTransformation<K> {
    name: CompactString,
    operations: Vec<SetOperation<K>>,
}

impl<K: TokenKind> SetTransformation<K> {
    /// The name given when the transformation was staged.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The operations in application order.
    #[must_use]
    pub fn operations(&self) -> &[SetOperation<K>] {
        &self.operations
    }

    /// Apply all operations in order.
    ///
    /// Fails fast on the first failing operation, leaving earlier ones
    /// applied. Use a [`TransformationBuilder`] when the set must stay
    /// untouched on failure.
    pub fn apply(&self, set: &mut ProductionSet<K>) -> Result<(), TransformError> {
        for operation in &self.operations {
            operation.apply(set)?;
        }
        Ok(())
    }

    /// Undo the transformation by applying every inverse in reverse order.
    ///
    /// Re-added rules skip the duplicate check: the rule being restored may
    /// have a structural twin the forward run never touched.
    pub fn revert(&self, set: &mut ProductionSet<K>) -> Result<(), TransformError> {
        for operation in self.operations.iter().rev() {
            operation.inverted().apply_unchecked(set)?;
        }
        Ok(())
    }
}

/// Stages operations for one named transformation and applies them all at
/// once.
///
/// Nothing touches the set until [`Self::build`]. If an operation fails
/// mid-sequence, the operations already applied are rolled back and the error
/// returned, leaving the set exactly as it was.
#[derive(Debug)]
pub struct TransformationBuilder<'set, K: TokenKind> {
    set: &'set mut ProductionSet<K>,
    name: CompactString,
    operations: Vec<SetOperation<K>>,
    pending_start: Option<NonTerminal>,
}

impl<'set, K: TokenKind> TransformationBuilder<'set, K> {
    pub(crate) fn new(set: &'set mut ProductionSet<K>, name: CompactString) -> Self {
        let pending_start = set.start().cloned();
        Self {
            set,
            name,
            operations: Vec::new(),
            pending_start,
        }
    }

    /// Stage the addition of one production.
    #[must_use]
    pub fn add_production(mut self, rule: ProductionRule<K>) -> Self {
        self.operations
            .push(SetOperation::new(SetOperationKind::AddProduction(rule)));
        self
    }

    /// Stage the addition of several productions, in order.
    #[must_use]
    pub fn add_productions(mut self, rules: impl IntoIterator<Item = ProductionRule<K>>) -> Self {
        for rule in rules {
            self = self.add_production(rule);
        }
        self
    }

    /// Stage the addition of `rule` unless the set, or an earlier staged
    /// addition, already holds a structural twin.
    ///
    /// Rewrites use this for replacement rules that may coincide with what
    /// the grammar already says; the redundant copy is simply not staged.
    #[must_use]
    pub fn add_missing_production(self, rule: ProductionRule<K>) -> Self {
        let staged = self.operations.iter().any(|operation| {
            matches!(operation.kind(), SetOperationKind::AddProduction(existing) if existing == &rule)
        });
        if staged || self.set.contains(&rule) {
            return self;
        }
        self.add_production(rule)
    }

    /// Stage the addition of several productions, skipping structural twins.
    #[must_use]
    pub fn add_missing_productions(
        mut self,
        rules: impl IntoIterator<Item = ProductionRule<K>>,
    ) -> Self {
        for rule in rules {
            self = self.add_missing_production(rule);
        }
        self
    }

    /// Stage the removal of one production occurrence.
    #[must_use]
    pub fn remove_production(mut self, rule: ProductionRule<K>) -> Self {
        self.operations
            .push(SetOperation::new(SetOperationKind::RemoveProduction(rule)));
        self
    }

    /// Stage the removal of several production occurrences, in order.
    #[must_use]
    pub fn remove_productions(
        mut self,
        rules: impl IntoIterator<Item = ProductionRule<K>>,
    ) -> Self {
        for rule in rules {
            self = self.remove_production(rule);
        }
        self
    }

    /// Stage the replacement of every body occurrence of `old` with `new`.
    #[must_use]
    pub fn replace_symbol(mut self, old: Symbol<K>, new: Symbol<K>) -> Self {
        self.operations
            .push(SetOperation::new(SetOperationKind::ReplaceSymbol {
                old,
                new,
            }));
        self
    }

    /// Stage a start symbol change. The current start is captured as the
    /// `from` side, so chains of start changes invert correctly.
    #[must_use]
    pub fn set_start(mut self, to: impl Into<Option<NonTerminal>>) -> Self {
        let to = to.into();
        let from = std::mem::replace(&mut self.pending_start, to.clone());
        self.operations
            .push(SetOperation::new(SetOperationKind::SetStart { from, to }));
        self
    }

    /// Attach an explanation to the most recently staged operation.
    #[must_use]
    pub fn note(mut self, note: impl Into<CompactString>) -> Self {
        if let Some(last) = self.operations.last_mut() {
            last.set_note(note);
        }
        self
    }

    /// Apply every staged operation and log the transformation on the set.
    pub fn build(self) -> Result<(), TransformError> {
        let Self {
            set,
            name,
            operations,
            ..
        } = self;
        for (index, operation) in operations.iter().enumerate() {
            if let Err(error) = operation.apply(set) {
                // Inverses of freshly applied operations cannot fail.
                for applied in operations[..index].iter().rev() {
                    let _ = applied.inverted().apply_unchecked(set);
                }
                return Err(error);
            }
        }
        set.record(SetTransformation { name, operations });
        Ok(())
    }
}
