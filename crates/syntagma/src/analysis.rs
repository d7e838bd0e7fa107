//! # Grammar Analysis
//!
//! Read-only facts about a production set: which non-terminals are nullable,
//! what their first sets are, and where left recursion hides.
//!
//! ## Overview
//!
//! - [`GrammarAnalysis`] precomputes nullability and first sets by fixed-point
//!   iteration and answers `FIRST(suffix · lookaheads)` queries, the workhorse
//!   of LR(1) closure construction
//! - [`find_left_recursion`] walks leftmost non-terminal chains and reports
//!   every production that starts a directly or indirectly left-recursive
//!   derivation branch

use std::collections::BTreeSet;

use hashbrown::{HashMap, HashSet};

use crate::lr::LookaheadSymbol;
use crate::rule::{ProductionRule, ProductionSet};
use crate::symbol::{NonTerminal, Symbol, Terminal};
use crate::token::TokenKind;

/// Precomputed nullability and first sets for one production set.
///
/// The set is expected to be macro-free; a macro symbol encountered during
/// analysis is treated as an opaque, non-nullable symbol with an empty first
/// set. Results are detached from the set, so the set may be mutated freely
/// afterwards.
#[derive(Debug, Clone)]
pub struct GrammarAnalysis<K> {
    nullable: HashSet<NonTerminal, ahash::RandomState>,
    first: HashMap<NonTerminal, BTreeSet<Terminal<K>>, ahash::RandomState>,
}

impl<K: TokenKind> GrammarAnalysis<K> {
    /// Analyze `set`.
    #[must_use]
    pub fn new(set: &ProductionSet<K>) -> Self {
        let nullable = compute_nullable(set);
        let first = compute_first(set, &nullable);
        Self { nullable, first }
    }

    /// True when `non_terminal` derives the empty sentence.
    #[must_use]
    pub fn is_nullable(&self, non_terminal: &NonTerminal) -> bool {
        self.nullable.contains(non_terminal)
    }

    /// The terminals that can begin a derivation of `non_terminal`.
    #[must_use]
    pub fn first_of(&self, non_terminal: &NonTerminal) -> BTreeSet<Terminal<K>> {
        self.first.get(non_terminal).cloned().unwrap_or_default()
    }

    /// `FIRST(symbols · lookaheads)`: the lookaheads that can begin a
    /// derivation of `symbols`, falling through to `lookaheads` when the
    /// whole suffix is nullable.
    #[must_use]
    pub fn first_of_suffix(
        &self,
        symbols: &[Symbol<K>],
        lookaheads: &BTreeSet<LookaheadSymbol<K>>,
    ) -> BTreeSet<LookaheadSymbol<K>> {
        let mut result = BTreeSet::new();
        for symbol in symbols {
            match symbol {
                Symbol::Terminal(terminal) => {
                    result.insert(LookaheadSymbol::Terminal(terminal.clone()));
                    return result;
                }
                Symbol::NonTerminal(non_terminal) => {
                    if let Some(first) = self.first.get(non_terminal) {
                        result.extend(first.iter().cloned().map(LookaheadSymbol::Terminal));
                    }
                    if !self.nullable.contains(non_terminal) {
                        return result;
                    }
                }
                Symbol::Epsilon => {}
                Symbol::Eoi => {
                    result.insert(LookaheadSymbol::Eoi);
                    return result;
                }
                Symbol::Macro(_) => return result,
            }
        }
        result.extend(lookaheads.iter().cloned());
        result
    }
}

fn compute_nullable<K: TokenKind>(
    set: &ProductionSet<K>,
) -> HashSet<NonTerminal, ahash::RandomState> {
    let mut nullable: HashSet<NonTerminal, ahash::RandomState> = HashSet::default();
    let mut changed = true;
    while changed {
        changed = false;
        for rule in set.rules() {
            if nullable.contains(rule.head()) {
                continue;
            }
            let body_nullable = rule.body().symbols().iter().all(|symbol| match symbol {
                Symbol::Epsilon => true,
                Symbol::NonTerminal(non_terminal) => nullable.contains(non_terminal),
                Symbol::Terminal(_) | Symbol::Eoi | Symbol::Macro(_) => false,
            });
            if body_nullable {
                nullable.insert(rule.head().clone());
                changed = true;
            }
        }
    }
    nullable
}

fn compute_first<K: TokenKind>(
    set: &ProductionSet<K>,
    nullable: &HashSet<NonTerminal, ahash::RandomState>,
) -> HashMap<NonTerminal, BTreeSet<Terminal<K>>, ahash::RandomState> {
    let mut first: HashMap<NonTerminal, BTreeSet<Terminal<K>>, ahash::RandomState> =
        HashMap::default();
    for rule in set.rules() {
        first.entry(rule.head().clone()).or_default();
    }
    let mut changed = true;
    while changed {
        changed = false;
        for rule in set.rules() {
            let mut additions: Vec<Terminal<K>> = Vec::new();
            for symbol in rule.body().symbols() {
                match symbol {
                    Symbol::Terminal(terminal) => {
                        additions.push(terminal.clone());
                        break;
                    }
                    Symbol::NonTerminal(non_terminal) => {
                        if let Some(inner) = first.get(non_terminal) {
                            additions.extend(inner.iter().cloned());
                        }
                        if !nullable.contains(non_terminal) {
                            break;
                        }
                    }
                    Symbol::Epsilon => {}
                    Symbol::Eoi | Symbol::Macro(_) => break,
                }
            }
            let entry = first.entry(rule.head().clone()).or_default();
            for terminal in additions {
                changed |= entry.insert(terminal);
            }
        }
    }
    first
}

/// How a recursive derivation branch loops back to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionKind {
    /// The head is itself the first body symbol.
    Direct,
    /// The head reappears leftmost through a chain of non-terminal-initial
    /// productions.
    Indirect,
}

/// One production that starts a left-recursive derivation branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursionBranch<K> {
    head: NonTerminal,
    production: ProductionRule<K>,
    kind: RecursionKind,
}

impl<K: TokenKind> RecursionBranch<K> {
    /// The recursive head.
    #[must_use]
    pub const fn head(&self) -> &NonTerminal {
        &self.head
    }

    /// The production the branch starts with.
    #[must_use]
    pub const fn production(&self) -> &ProductionRule<K> {
        &self.production
    }

    /// Direct or indirect.
    #[must_use]
    pub const fn kind(&self) -> RecursionKind {
        self.kind
    }
}

/// Finds every production that starts a left-recursive branch.
///
/// A branch is direct when the production's first symbol is its own head, and
/// indirect when the head reappears as the leftmost symbol somewhere down a
/// chain of non-terminal-initial productions. A leading terminal always stops
/// the chain. Results come back in rule order.
#[must_use]
pub fn find_left_recursion<K: TokenKind>(set: &ProductionSet<K>) -> Vec<RecursionBranch<K>> {
    let mut branches = Vec::new();
    for rule in set.rules() {
        let Some(leading) = rule.body().first_symbol().and_then(Symbol::as_non_terminal) else {
            continue;
        };
        let kind = if leading == rule.head() {
            RecursionKind::Direct
        } else if reaches_leftmost(set, leading, rule.head()) {
            RecursionKind::Indirect
        } else {
            continue;
        };
        branches.push(RecursionBranch {
            head: rule.head().clone(),
            production: rule.clone(),
            kind,
        });
    }
    branches
}

fn reaches_leftmost<K: TokenKind>(
    set: &ProductionSet<K>,
    from: &NonTerminal,
    target: &NonTerminal,
) -> bool {
    let mut visited: HashSet<NonTerminal, ahash::RandomState> = HashSet::default();
    let mut stack = vec![from.clone()];
    visited.insert(from.clone());
    while let Some(current) = stack.pop() {
        for rule in set.productions_of(&current) {
            let Some(leading) = rule.body().first_symbol().and_then(Symbol::as_non_terminal)
            else {
                continue;
            };
            if leading == target {
                return true;
            }
            if visited.insert(leading.clone()) {
                stack.push(leading.clone());
            }
        }
    }
    false
}
