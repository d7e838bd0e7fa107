//! Primitive set operations.

use compact_str::CompactString;

use crate::rule::{ProductionRule, ProductionSet};
use crate::symbol::{NonTerminal, Notation, NotationStyle, Symbol};
use crate::token::TokenKind;
use crate::transform::TransformError;

/// What a [`SetOperation`] does to the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOperationKind<K> {
    /// Append one production. Adding a rule the set already holds
    /// structurally is an error.
    AddProduction(ProductionRule<K>),

    /// Remove one structural occurrence of a production.
    RemoveProduction(ProductionRule<K>),

    /// Replace every body occurrence of `old` with `new`. Zero matches
    /// applies cleanly as a no-op.
    ReplaceSymbol { old: Symbol<K>, new: Symbol<K> },

    /// Change the start symbol. Both sides are recorded so the operation
    /// inverts without consulting the set.
    SetStart {
        from: Option<NonTerminal>,
        to: Option<NonTerminal>,
    },
}

/// One primitive rewrite step with an optional explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOperation<K> {
    kind: SetOperationKind<K>,
    note: Option<CompactString>,
}

impl<K: TokenKind> SetOperation<K> {
    pub(crate) const fn new(kind: SetOperationKind<K>) -> Self {
        Self { kind, note: None }
    }

    pub(crate) fn set_note(&mut self, note: impl Into<CompactString>) {
        self.note = Some(note.into());
    }

    /// The operation payload.
    #[must_use]
    pub const fn kind(&self) -> &SetOperationKind<K> {
        &self.kind
    }

    /// The attached explanation, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// The operation that undoes this one.
    ///
    /// Additions and removals swap, and both symbol replacements and start
    /// changes swap their sides. The note carries over unchanged.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let kind = match &self.kind {
            SetOperationKind::AddProduction(rule) => {
                SetOperationKind::RemoveProduction(rule.clone())
            }
            SetOperationKind::RemoveProduction(rule) => {
                SetOperationKind::AddProduction(rule.clone())
            }
            SetOperationKind::ReplaceSymbol { old, new } => SetOperationKind::ReplaceSymbol {
                old: new.clone(),
                new: old.clone(),
            },
            SetOperationKind::SetStart { from, to } => SetOperationKind::SetStart {
                from: to.clone(),
                to: from.clone(),
            },
        };
        Self {
            kind,
            note: self.note.clone(),
        }
    }

    /// Apply the operation to `set`.
    ///
    /// Adding a structurally present rule and removing an absent one both
    /// fail without touching the set.
    pub(crate) fn apply(&self, set: &mut ProductionSet<K>) -> Result<(), TransformError> {
        if let SetOperationKind::AddProduction(rule) = &self.kind
            && set.contains(rule)
        {
            return Err(TransformError::duplicate_production(rule));
        }
        self.apply_unchecked(set)
    }

    /// Apply the operation without the duplicate-addition check.
    ///
    /// Reverts and rollbacks re-add rules whose structural twins may
    /// legitimately still be in the set, so they bypass the check.
    pub(crate) fn apply_unchecked(&self, set: &mut ProductionSet<K>) -> Result<(), TransformError> {
        match &self.kind {
            SetOperationKind::AddProduction(rule) => {
                set.push(rule.clone());
                Ok(())
            }
            SetOperationKind::RemoveProduction(rule) => set.remove_rule(rule),
            SetOperationKind::ReplaceSymbol { old, new } => {
                set.replace_symbol(old, new);
                Ok(())
            }
            SetOperationKind::SetStart { to, .. } => {
                set.set_start(to.clone());
                Ok(())
            }
        }
    }

    /// A one-line rendering used by reports and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        match &self.kind {
            SetOperationKind::AddProduction(rule) => {
                out.push_str("add `");
                out.push_str(&rule.render(NotationStyle::Sentential));
                out.push('`');
            }
            SetOperationKind::RemoveProduction(rule) => {
                out.push_str("remove `");
                out.push_str(&rule.render(NotationStyle::Sentential));
                out.push('`');
            }
            SetOperationKind::ReplaceSymbol { old, new } => {
                out.push_str("replace `");
                out.push_str(&old.render(NotationStyle::Sentential));
                out.push_str("` with `");
                out.push_str(&new.render(NotationStyle::Sentential));
                out.push('`');
            }
            SetOperationKind::SetStart { to: Some(to), .. } => {
                out.push_str("set start to `");
                out.push_str(to.name());
                out.push('`');
            }
            SetOperationKind::SetStart { to: None, .. } => {
                out.push_str("clear start");
            }
        }
        if let Some(note) = &self.note {
            out.push_str(": ");
            out.push_str(note);
        }
        out
    }
}

impl<K: TokenKind> std::fmt::Display for SetOperation<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
