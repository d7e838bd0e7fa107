//! LR(1) state-graph construction.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use hashbrown::HashMap;

use crate::analysis::GrammarAnalysis;
use crate::lr::Lr1Error;
use crate::lr::item::{LookaheadSymbol, Lr1Item};
use crate::lr::state::Lr1State;
use crate::rule::{Augmentation, ProductionRule, ProductionSet};
use crate::symbol::Symbol;
use crate::token::TokenKind;

/// The complete LR(1) state graph for one augmented production set.
///
/// Construction seeds state 0 with the augmented production, dot at the
/// start, end-of-input as the only lookahead, then runs a fixed-point walk:
/// each state's items are grouped by the symbol after the dot, and every
/// group is advanced as one unit into a candidate kernel. A kernel that
/// matches an existing state routes to that state; anything else becomes a
/// new state. Groups are never split, so every `(state, symbol)` pair has
/// exactly one goto target, and kernel signatures stay unique across the
/// whole graph.
#[derive(Debug, Clone)]
pub struct Lr1Automaton<K> {
    states: Vec<Lr1State<K>>,
    transitions: Vec<BTreeMap<Symbol<K>, usize>>,
    productions: Vec<ProductionRule<K>>,
    augmentation: Augmentation<K>,
}

impl<K: TokenKind> Lr1Automaton<K> {
    /// Compute the state graph of `set`.
    ///
    /// The set must be macro-free, augmented, and free of end-of-input
    /// symbols in rule bodies.
    pub fn compute(set: &ProductionSet<K>) -> Result<Self, Lr1Error<K>> {
        if let Some(offender) = set.rules().iter().find(|rule| rule.body().contains_macro()) {
            return Err(Lr1Error::unexpanded_macros(offender));
        }
        if let Some(offender) = set
            .rules()
            .iter()
            .find(|rule| rule.body().symbols().iter().any(Symbol::is_eoi))
        {
            return Err(Lr1Error::eoi_in_body(offender));
        }
        let augmentation = set.augmentation().cloned().ok_or(Lr1Error::NotAugmented)?;

        let analysis = GrammarAnalysis::new(set);
        let initial: BTreeSet<Lr1Item<K>> = [Lr1Item::new(
            augmentation.rule().clone(),
            0,
            [LookaheadSymbol::Eoi],
        )]
        .into();

        let mut known: HashMap<BTreeSet<Lr1Item<K>>, usize, ahash::RandomState> =
            HashMap::default();
        known.insert(initial.clone(), 0);
        let closure = closure_of(&initial, set, &analysis);
        let mut states = vec![Lr1State::new(0, initial, closure)];
        let mut transitions: Vec<BTreeMap<Symbol<K>, usize>> = vec![BTreeMap::new()];
        let mut queue: VecDeque<usize> = VecDeque::from([0]);

        while let Some(id) = queue.pop_front() {
            let groups = advanced_groups(&states[id]);
            for (symbol, advanced) in groups {
                let kernel: BTreeSet<Lr1Item<K>> = advanced.into_iter().collect();
                let target = match known.get(&kernel) {
                    Some(existing) => *existing,
                    None => {
                        let next_id = states.len();
                        known.insert(kernel.clone(), next_id);
                        let closure = closure_of(&kernel, set, &analysis);
                        states.push(Lr1State::new(next_id, kernel, closure));
                        transitions.push(BTreeMap::new());
                        queue.push_back(next_id);
                        next_id
                    }
                };
                transitions[id].insert(symbol, target);
            }
        }

        Ok(Self {
            states,
            transitions,
            productions: set.rules().to_vec(),
            augmentation,
        })
    }

    /// All states in discovery order. State ids index this slice.
    #[must_use]
    pub fn states(&self) -> &[Lr1State<K>] {
        &self.states
    }

    /// The state with the given id, if any.
    #[must_use]
    pub fn state(&self, id: usize) -> Option<&Lr1State<K>> {
        self.states.get(id)
    }

    /// Number of states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The goto target for `symbol` out of state `from`, if any.
    #[must_use]
    pub fn transition(&self, from: usize, symbol: &Symbol<K>) -> Option<usize> {
        self.transitions.get(from)?.get(symbol).copied()
    }

    /// The productions the automaton was computed from, in rule order.
    #[must_use]
    pub fn productions(&self) -> &[ProductionRule<K>] {
        &self.productions
    }

    /// The production the construction started from.
    #[must_use]
    pub const fn augmentation(&self) -> &Augmentation<K> {
        &self.augmentation
    }
}

/// Items advanced over their dot symbol, grouped by that symbol.
fn advanced_groups<K: TokenKind>(state: &Lr1State<K>) -> BTreeMap<Symbol<K>, Vec<Lr1Item<K>>> {
    let mut groups: BTreeMap<Symbol<K>, Vec<Lr1Item<K>>> = BTreeMap::new();
    for item in state.items() {
        if let Some(symbol) = item.symbol_at_dot()
            && let Some(advanced) = item.advanced()
        {
            groups.entry(symbol.clone()).or_default().push(advanced);
        }
    }
    groups
}

/// Expands every non-terminal after a dot until no new item appears.
///
/// Items are keyed by production and position; a second arrival at the same
/// core unions the lookaheads and, when that union grew, re-enqueues the core
/// so the growth propagates. This is what keeps the automaton minimal on
/// cyclic grammars instead of spawning one item per lookahead path.
fn closure_of<K: TokenKind>(
    kernel: &BTreeSet<Lr1Item<K>>,
    set: &ProductionSet<K>,
    analysis: &GrammarAnalysis<K>,
) -> BTreeSet<Lr1Item<K>> {
    let mut merged: BTreeMap<(ProductionRule<K>, usize), BTreeSet<LookaheadSymbol<K>>> =
        BTreeMap::new();
    let mut queue: VecDeque<(ProductionRule<K>, usize)> = VecDeque::new();
    for item in kernel {
        let core = (item.production().clone(), item.position());
        merged
            .entry(core.clone())
            .or_default()
            .extend(item.lookaheads().iter().cloned());
        queue.push_back(core);
    }

    while let Some((production, position)) = queue.pop_front() {
        let Some(lookaheads) = merged.get(&(production.clone(), position)).cloned() else {
            continue;
        };
        let Some(Symbol::NonTerminal(next)) = production.body().get(position) else {
            continue;
        };
        let rest = production
            .body()
            .symbols()
            .get(position + 1..)
            .unwrap_or(&[]);
        let follow = analysis.first_of_suffix(rest, &lookaheads);
        for candidate in set.productions_of(next) {
            let core = (candidate.clone(), 0);
            match merged.entry(core.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(follow.clone());
                    queue.push_back(core);
                }
                Entry::Occupied(mut slot) => {
                    let entry = slot.get_mut();
                    let before = entry.len();
                    entry.extend(follow.iter().cloned());
                    if entry.len() > before {
                        queue.push_back(core);
                    }
                }
            }
        }
    }

    let mut closure = BTreeSet::new();
    for ((production, position), lookaheads) in merged {
        let in_kernel = kernel
            .iter()
            .any(|item| item.production() == &production && item.position() == position);
        if !in_kernel {
            closure.insert(Lr1Item::new(production, position, lookaheads));
        }
    }
    closure
}
