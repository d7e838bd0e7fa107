//! # LR(1) Engine
//!
//! Items, states, the state-graph automaton, parsing tables, and the parse
//! driver.
//!
//! ## Overview
//!
//! - [`Lr1Item`]: a production with a dot position and a lookahead set
//! - [`Lr1State`]: one automaton state, split into kernel and closure items
//! - [`Lr1Automaton`]: the full state graph, grown by fixed-point iteration
//!   over goto transitions with global kernel deduplication
//! - [`Lr1ParsingTable`]: per-state action maps keyed by terminal,
//!   non-terminal, or end of input
//! - [`parse`]: the table-driven shift/reduce loop producing a [`ParseTree`]
//!
//! Construction wants a macro-free, augmented production set and fails fast:
//! a grammar conflict or an internal inconsistency aborts the build with an
//! [`Lr1Error`] instead of yielding a partial table.

use compact_str::CompactString;
use thiserror::Error;

use crate::rule::ProductionRule;
use crate::symbol::{Notation, NotationStyle, Symbol};
use crate::token::TokenKind;

mod automaton;
mod driver;
mod item;
mod state;
mod table;

pub use automaton::Lr1Automaton;
pub use driver::{Lr1Stack, ParseError, ParseTree, parse};
pub use item::{LookaheadSymbol, Lr1Item};
pub use state::Lr1State;
pub use table::{Lr1Action, Lr1ParsingTable, TableKey};

/// Errors raised while computing LR(1) states or building the parsing table.
///
/// [`Conflict`](Lr1Error::Conflict) is the one a grammar author acts on; the
/// next-state and production variants signal an inconsistency in the computed
/// state graph itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Lr1Error<K: TokenKind> {
    /// A rule still carries a macro symbol.
    #[error("unexpanded macro symbol in `{production}`")]
    UnexpandedMacros { production: CompactString },

    /// The production set has not been augmented.
    #[error("the production set is not augmented")]
    NotAugmented,

    /// A rule body contains the end-of-input symbol.
    #[error("end of input cannot appear in a rule body: `{production}`")]
    EoiInBody { production: CompactString },

    /// Two different actions compete for the same state and symbol.
    #[error("conflict in state {state} on `{symbol}`: {existing} vs {offered}")]
    Conflict {
        state: usize,
        symbol: TableKey<K>,
        existing: Lr1Action,
        offered: Lr1Action,
    },

    /// The automaton has no goto target for a shiftable item's dot symbol.
    #[error("no next state from state {state} over `{symbol}`")]
    MissingNextState { state: usize, symbol: CompactString },

    /// An item references a production the automaton does not carry.
    #[error("production `{production}` is not part of the automaton")]
    UnknownProduction { production: CompactString },
}

impl<K: TokenKind> Lr1Error<K> {
    /// Create an unexpanded macro error naming the offending rule.
    #[must_use]
    pub fn unexpanded_macros(rule: &ProductionRule<K>) -> Self {
        Self::UnexpandedMacros {
            production: rule.render(NotationStyle::Sentential).into(),
        }
    }

    /// Create an end-of-input error naming the offending rule.
    #[must_use]
    pub fn eoi_in_body(rule: &ProductionRule<K>) -> Self {
        Self::EoiInBody {
            production: rule.render(NotationStyle::Sentential).into(),
        }
    }

    /// Create a conflict error for one table slot.
    #[must_use]
    pub const fn conflict(
        state: usize,
        symbol: TableKey<K>,
        existing: Lr1Action,
        offered: Lr1Action,
    ) -> Self {
        Self::Conflict {
            state,
            symbol,
            existing,
            offered,
        }
    }

    /// Create a missing next-state error for an advanced item.
    #[must_use]
    pub fn missing_next_state(state: usize, symbol: &Symbol<K>) -> Self {
        Self::MissingNextState {
            state,
            symbol: symbol.render(NotationStyle::Sentential).into(),
        }
    }

    /// Create an unknown production error.
    #[must_use]
    pub fn unknown_production(rule: &ProductionRule<K>) -> Self {
        Self::UnknownProduction {
            production: rule.render(NotationStyle::Sentential).into(),
        }
    }
}
