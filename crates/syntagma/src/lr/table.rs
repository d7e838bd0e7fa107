//! LR(1) parsing tables.

use std::fmt;

use hashbrown::HashMap;

use crate::lr::Lr1Error;
use crate::lr::automaton::Lr1Automaton;
use crate::lr::item::LookaheadSymbol;
use crate::rule::{Augmentation, ProductionRule, ProductionSet};
use crate::symbol::{NonTerminal, Notation, NotationStyle, Symbol, Terminal};
use crate::token::{Token, TokenKind};

/// One table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lr1Action {
    /// Consume the current token and move to the state.
    Shift(usize),
    /// Pop the production's body off the stack and push its head.
    Reduce(usize),
    /// Move to the state after a reduction pushed the keyed non-terminal.
    Goto(usize),
    /// The input is a complete derivation of the start symbol.
    Accept,
}

impl fmt::Display for Lr1Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift(state) => write!(f, "shift({state})"),
            Self::Reduce(index) => write!(f, "reduce({index})"),
            Self::Goto(state) => write!(f, "goto({state})"),
            Self::Accept => f.write_str("accept"),
        }
    }
}

/// What a table column is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKey<K> {
    Terminal(Terminal<K>),
    NonTerminal(NonTerminal),
    Eoi,
}

impl<K: TokenKind> TableKey<K> {
    fn from_lookahead(lookahead: &LookaheadSymbol<K>) -> Self {
        match lookahead {
            LookaheadSymbol::Terminal(terminal) => Self::Terminal(terminal.clone()),
            LookaheadSymbol::Eoi => Self::Eoi,
        }
    }
}

impl<K: TokenKind> fmt::Display for TableKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(terminal) => {
                f.write_str(&terminal.render(NotationStyle::Sentential))
            }
            Self::NonTerminal(non_terminal) => f.write_str(non_terminal.name()),
            Self::Eoi => f.write_str("$"),
        }
    }
}

/// Shift/reduce/goto/accept actions for every automaton state.
///
/// Cells are keyed by `(state, symbol)` and each may hold at most one action.
/// A second, different action arriving for an occupied cell is a grammar
/// conflict and aborts the build; re-inserting the identical action is a
/// no-op. Reduce actions index into [`productions`](Self::productions).
#[derive(Debug, Clone)]
pub struct Lr1ParsingTable<K> {
    entries: Vec<HashMap<TableKey<K>, Lr1Action, ahash::RandomState>>,
    productions: Vec<ProductionRule<K>>,
    augmentation: Augmentation<K>,
}

impl<K: TokenKind> Lr1ParsingTable<K> {
    /// Compute the automaton of `set` and turn it into a table.
    pub fn build(set: &ProductionSet<K>) -> Result<Self, Lr1Error<K>> {
        let automaton = Lr1Automaton::compute(set)?;
        Self::from_automaton(&automaton)
    }

    /// Turn an already computed automaton into a table.
    ///
    /// Per state: the accepting state gets `Accept` on end of input, every
    /// complete item contributes one `Reduce` per lookahead (except end of
    /// input on the accepting item itself, whose slot `Accept` owns), and
    /// every other item contributes a `Shift` or `Goto` towards the
    /// automaton's goto target over the symbol at its dot.
    pub fn from_automaton(automaton: &Lr1Automaton<K>) -> Result<Self, Lr1Error<K>> {
        let augmented = automaton.augmentation().rule();
        let mut entries = Vec::with_capacity(automaton.state_count());

        for state in automaton.states() {
            let mut actions: HashMap<TableKey<K>, Lr1Action, ahash::RandomState> =
                HashMap::default();
            let accepting = state.is_accepting(augmented);
            if accepting {
                insert_action(state.id(), &mut actions, TableKey::Eoi, Lr1Action::Accept)?;
            }
            for item in state.items() {
                if item.is_complete() {
                    let index = production_index(automaton.productions(), item.production())?;
                    for lookahead in item.lookaheads() {
                        if accepting && lookahead.is_eoi() && item.production() == augmented {
                            continue;
                        }
                        insert_action(
                            state.id(),
                            &mut actions,
                            TableKey::from_lookahead(lookahead),
                            Lr1Action::Reduce(index),
                        )?;
                    }
                    continue;
                }
                let Some(symbol) = item.symbol_at_dot() else {
                    continue;
                };
                let next = automaton
                    .transition(state.id(), symbol)
                    .ok_or_else(|| Lr1Error::missing_next_state(state.id(), symbol))?;
                let (key, action) = match symbol {
                    Symbol::Terminal(terminal) => {
                        (TableKey::Terminal(terminal.clone()), Lr1Action::Shift(next))
                    }
                    Symbol::NonTerminal(non_terminal) => (
                        TableKey::NonTerminal(non_terminal.clone()),
                        Lr1Action::Goto(next),
                    ),
                    Symbol::Epsilon | Symbol::Eoi | Symbol::Macro(_) => continue,
                };
                insert_action(state.id(), &mut actions, key, action)?;
            }
            entries.push(actions);
        }

        Ok(Self {
            entries,
            productions: automaton.productions().to_vec(),
            augmentation: automaton.augmentation().clone(),
        })
    }

    /// The action for `token` in `state`, preferring an exact-literal column
    /// over the token's bare kind.
    #[must_use]
    pub fn action_for_token(&self, state: usize, token: &Token<K>) -> Option<Lr1Action> {
        let entry = self.entries.get(state)?;
        let literal = TableKey::Terminal(Terminal::with_literal(
            token.kind().clone(),
            token.text(),
        ));
        if let Some(action) = entry.get(&literal) {
            return Some(*action);
        }
        entry
            .get(&TableKey::Terminal(Terminal::of_kind(token.kind().clone())))
            .copied()
    }

    /// The action for a reduced non-terminal in `state`.
    #[must_use]
    pub fn action_for_non_terminal(
        &self,
        state: usize,
        non_terminal: &NonTerminal,
    ) -> Option<Lr1Action> {
        self.entries
            .get(state)?
            .get(&TableKey::NonTerminal(non_terminal.clone()))
            .copied()
    }

    /// The action for end of input in `state`.
    #[must_use]
    pub fn action_for_eoi(&self, state: usize) -> Option<Lr1Action> {
        self.entries.get(state)?.get(&TableKey::Eoi).copied()
    }

    /// All populated cells of `state`, in no particular order.
    pub fn actions(&self, state: usize) -> impl Iterator<Item = (&TableKey<K>, Lr1Action)> {
        self.entries
            .get(state)
            .into_iter()
            .flat_map(|entry| entry.iter().map(|(key, action)| (key, *action)))
    }

    /// The production a reduce action refers to.
    #[must_use]
    pub fn production(&self, index: usize) -> Option<&ProductionRule<K>> {
        self.productions.get(index)
    }

    /// The flattened production list, in rule order.
    #[must_use]
    pub fn productions(&self) -> &[ProductionRule<K>] {
        &self.productions
    }

    /// Number of states the table covers.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.entries.len()
    }

    /// The production the automaton was seeded with.
    #[must_use]
    pub const fn augmentation(&self) -> &Augmentation<K> {
        &self.augmentation
    }
}

fn insert_action<K: TokenKind>(
    state: usize,
    actions: &mut HashMap<TableKey<K>, Lr1Action, ahash::RandomState>,
    key: TableKey<K>,
    action: Lr1Action,
) -> Result<(), Lr1Error<K>> {
    match actions.get(&key) {
        None => {
            actions.insert(key, action);
            Ok(())
        }
        Some(existing) if *existing == action => Ok(()),
        Some(existing) => Err(Lr1Error::conflict(state, key, *existing, action)),
    }
}

fn production_index<K: TokenKind>(
    productions: &[ProductionRule<K>],
    production: &ProductionRule<K>,
) -> Result<usize, Lr1Error<K>> {
    productions
        .iter()
        .position(|candidate| candidate == production)
        .ok_or_else(|| Lr1Error::unknown_production(production))
}
