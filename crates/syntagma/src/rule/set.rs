//! Production sets.
//!
//! A [`ProductionSet`] owns the rules of one grammar together with its start
//! symbol, the augmentation marker, and a log of every [`SetTransformation`]
//! applied to it.

use std::collections::BTreeSet;

use compact_str::CompactString;

use crate::rule::{ProductionRule, Sentence};
use crate::symbol::{NonTerminal, Notation, NotationStyle, Symbol};
use crate::token::TokenKind;
use crate::transform::{SetTransformation, TransformError, TransformationBuilder};

/// The production the LR(1) construction starts from.
///
/// When the start symbol already has exactly one production and never occurs
/// in any body, that production is reused directly. Otherwise a synthetic
/// primed rule is added and flagged as such, so the parse driver can unwrap
/// the extra tree node it would otherwise produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation<K> {
    rule: ProductionRule<K>,
    synthetic: bool,
}

impl<K: TokenKind> Augmentation<K> {
    /// The production the automaton is seeded with.
    #[must_use]
    pub const fn rule(&self) -> &ProductionRule<K> {
        &self.rule
    }

    /// True when the rule was added by [`ProductionSet::augment`] rather than
    /// taken from the grammar.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

/// An ordered multiset of production rules with a transformation log.
///
/// Rules keep their insertion order, and duplicates are legal: transformations
/// add and remove single occurrences, which keeps every logged operation
/// exactly invertible.
#[derive(Debug, Clone)]
pub struct ProductionSet<K> {
    rules: Vec<ProductionRule<K>>,
    start: Option<NonTerminal>,
    augmented: Option<Augmentation<K>>,
    log: Vec<SetTransformation<K>>,
}

impl<K: TokenKind> ProductionSet<K> {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: Vec::new(),
            start: None,
            augmented: None,
            log: Vec::new(),
        }
    }

    /// Append a rule without logging. Duplicates are allowed.
    pub fn push(&mut self, rule: ProductionRule<K>) {
        self.rules.push(rule);
    }

    /// All rules in insertion order.
    #[must_use]
    pub fn rules(&self) -> &[ProductionRule<K>] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The start symbol, if one was set.
    #[must_use]
    pub fn start(&self) -> Option<&NonTerminal> {
        self.start.as_ref()
    }

    /// Set or clear the start symbol, returning the previous one.
    pub fn set_start(&mut self, start: Option<NonTerminal>) -> Option<NonTerminal> {
        std::mem::replace(&mut self.start, start)
    }

    /// All rules with the given head, in insertion order.
    pub fn productions_of(&self, head: &NonTerminal) -> impl Iterator<Item = &ProductionRule<K>> {
        self.rules.iter().filter(move |rule| rule.head() == head)
    }

    /// Like [`Self::productions_of`], but an empty result is an error.
    pub fn productions_of_required(
        &self,
        head: &NonTerminal,
    ) -> Result<Vec<&ProductionRule<K>>, TransformError> {
        let found: Vec<_> = self.productions_of(head).collect();
        if found.is_empty() {
            return Err(TransformError::empty_lookup(head.clone()));
        }
        Ok(found)
    }

    /// True when the set contains a rule structurally equal to `rule`.
    #[must_use]
    pub fn contains(&self, rule: &ProductionRule<K>) -> bool {
        self.rules.contains(rule)
    }

    /// Remove the last rule structurally equal to `rule`.
    ///
    /// Removing from the back keeps the slots of earlier occurrences stable,
    /// so dropping a repeat never reorders the survivors.
    pub(crate) fn remove_rule(&mut self, rule: &ProductionRule<K>) -> Result<(), TransformError> {
        let Some(index) = self.rules.iter().rposition(|existing| existing == rule) else {
            return Err(TransformError::missing_production(rule));
        };
        self.rules.remove(index);
        Ok(())
    }

    /// Replace every top-level body occurrence of `old` with `new`, returning
    /// the number of positions rewritten. Macro interiors are left untouched.
    pub(crate) fn replace_symbol(&mut self, old: &Symbol<K>, new: &Symbol<K>) -> usize {
        let mut replaced = 0;
        for rule in &mut self.rules {
            let hits = rule.body().symbols().iter().filter(|s| *s == old).count();
            if hits == 0 {
                continue;
            }
            replaced += hits;
            let body = Sentence::new(rule.body().symbols().iter().map(|symbol| {
                if symbol == old {
                    new.clone()
                } else {
                    symbol.clone()
                }
            }));
            *rule = ProductionRule::new(rule.head().clone(), body);
        }
        replaced
    }

    /// True when any body contains a macro symbol.
    #[must_use]
    pub fn contains_macro(&self) -> bool {
        self.rules.iter().any(ProductionRule::contains_macro)
    }

    /// Fail with the first macro-carrying rule, if any.
    pub fn ensure_macro_free(&self) -> Result<(), TransformError> {
        match self.rules.iter().find(|rule| rule.contains_macro()) {
            Some(rule) => Err(TransformError::unexpected_macro(rule)),
            None => Ok(()),
        }
    }

    /// Every non-terminal mentioned anywhere: heads, bodies, macro interiors,
    /// the start symbol, and the augmented head.
    #[must_use]
    pub fn non_terminals(&self) -> BTreeSet<NonTerminal> {
        let mut names = BTreeSet::new();
        if let Some(start) = &self.start {
            names.insert(start.clone());
        }
        if let Some(augmentation) = &self.augmented {
            names.insert(augmentation.rule.head().clone());
        }
        for rule in &self.rules {
            names.insert(rule.head().clone());
            collect_non_terminals(rule.body(), &mut names);
        }
        names
    }

    /// A detached copy of the current rules, safe to iterate while mutating
    /// the set.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ProductionRule<K>> {
        self.rules.clone()
    }

    /// Mark the production the LR(1) construction starts from.
    ///
    /// Reuses the sole start production when the start symbol never occurs in
    /// a body; otherwise appends a synthetic primed rule. Augmenting twice is
    /// a no-op.
    pub fn augment(&mut self) -> Result<(), TransformError> {
        if self.augmented.is_some() {
            return Ok(());
        }
        let start = self.start.clone().ok_or(TransformError::MissingStart)?;
        let occurs_in_body = self
            .rules
            .iter()
            .any(|rule| rule.body().contains_non_terminal(&start));
        if !occurs_in_body {
            let sole = {
                let mut own = self.productions_of(&start);
                match (own.next(), own.next()) {
                    (Some(rule), None) => Some(rule.clone()),
                    _ => None,
                }
            };
            if let Some(rule) = sole {
                self.augmented = Some(Augmentation {
                    rule,
                    synthetic: false,
                });
                return Ok(());
            }
        }
        let head = start.derived(&self.non_terminals());
        let rule = ProductionRule::new(head, Sentence::new([Symbol::NonTerminal(start)]));
        self.push(rule.clone());
        self.augmented = Some(Augmentation {
            rule,
            synthetic: true,
        });
        Ok(())
    }

    /// The augmentation marker, if [`Self::augment`] has run.
    #[must_use]
    pub fn augmentation(&self) -> Option<&Augmentation<K>> {
        self.augmented.as_ref()
    }

    /// True once [`Self::augment`] has run.
    #[must_use]
    pub fn is_augmented(&self) -> bool {
        self.augmented.is_some()
    }

    /// The production the automaton is seeded with, if augmented.
    #[must_use]
    pub fn augmented_rule(&self) -> Option<&ProductionRule<K>> {
        self.augmented.as_ref().map(Augmentation::rule)
    }

    /// The transformations applied since the last [`Self::reset_log`].
    #[must_use]
    pub fn log(&self) -> &[SetTransformation<K>] {
        &self.log
    }

    /// Clear the transformation log.
    pub fn reset_log(&mut self) {
        self.log.clear();
    }

    /// Drain the transformation log.
    pub fn take_log(&mut self) -> Vec<SetTransformation<K>> {
        std::mem::take(&mut self.log)
    }

    pub(crate) fn record(&mut self, transformation: SetTransformation<K>) {
        self.log.push(transformation);
    }

    /// Start a named transformation against this set.
    ///
    /// The builder stages operations and applies them all at once on
    /// [`TransformationBuilder::build`], logging the result here.
    pub fn transformation(
        &mut self,
        name: impl Into<CompactString>,
    ) -> TransformationBuilder<'_, K> {
        TransformationBuilder::new(self, name.into())
    }
}

impl<K: TokenKind> Default for ProductionSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKind> Notation for ProductionSet<K> {
    fn render_into(&self, style: NotationStyle, out: &mut String) {
        for (index, rule) in self.rules.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            rule.render_into(style, out);
        }
    }
}

impl<K: TokenKind> std::fmt::Display for ProductionSet<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(NotationStyle::Sentential))
    }
}

fn collect_non_terminals<K: TokenKind>(sentence: &Sentence<K>, out: &mut BTreeSet<NonTerminal>) {
    for symbol in sentence.symbols() {
        match symbol {
            Symbol::NonTerminal(non_terminal) => {
                out.insert(non_terminal.clone());
            }
            Symbol::Macro(inner) => {
                for body in inner.sentences() {
                    collect_non_terminals(body, out);
                }
            }
            Symbol::Terminal(_) | Symbol::Epsilon | Symbol::Eoi => {}
        }
    }
}

/// A fluent authoring front end for [`ProductionSet`].
#[derive(Debug, Clone)]
pub struct GrammarDefinition<K> {
    start: NonTerminal,
    rules: Vec<ProductionRule<K>>,
}

impl<K: TokenKind> GrammarDefinition<K> {
    /// Begin a grammar rooted at `start`.
    #[must_use]
    pub const fn new(start: NonTerminal) -> Self {
        Self {
            start,
            rules: Vec::new(),
        }
    }

    /// Add a rule. Repeated calls with the same head build up alternatives.
    #[must_use]
    pub fn rule(mut self, head: NonTerminal, body: impl IntoIterator<Item = Symbol<K>>) -> Self {
        self.rules
            .push(ProductionRule::new(head, body.into_iter().collect()));
        self
    }

    /// Add an already-built rule.
    #[must_use]
    pub fn production(mut self, rule: ProductionRule<K>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Finish authoring and produce the set, start symbol included.
    #[must_use]
    pub fn into_set(self) -> ProductionSet<K> {
        let mut set = ProductionSet::new();
        set.set_start(Some(self.start));
        for rule in self.rules {
            set.push(rule);
        }
        set
    }
}
