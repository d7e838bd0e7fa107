//! LR(1) items.

use std::collections::BTreeSet;
use std::fmt;

use crate::rule::ProductionRule;
use crate::symbol::{Notation, NotationStyle, Symbol, Terminal};
use crate::token::TokenKind;

/// A lookahead: either a terminal or the end of the input.
///
/// Lookahead sets live in [`BTreeSet`]s so that item comparison, hashing, and
/// rendering are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LookaheadSymbol<K> {
    Terminal(Terminal<K>),
    Eoi,
}

impl<K: TokenKind> LookaheadSymbol<K> {
    /// True for the end-of-input lookahead.
    #[must_use]
    pub const fn is_eoi(&self) -> bool {
        matches!(self, Self::Eoi)
    }
}

impl<K: TokenKind> fmt::Display for LookaheadSymbol<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(terminal) => {
                f.write_str(&terminal.render(NotationStyle::Sentential))
            }
            Self::Eoi => f.write_str("$"),
        }
    }
}

/// One LR(1) item: a production, a dot position, and a lookahead set.
///
/// The dot sits before the body symbol at `position`; an item whose dot has
/// moved past the last symbol is complete (reduce-ready). Equality, ordering,
/// and hashing take the lookaheads into account, which is exactly the
/// signature the state graph deduplicates by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lr1Item<K> {
    production: ProductionRule<K>,
    position: usize,
    lookaheads: BTreeSet<LookaheadSymbol<K>>,
}

impl<K: TokenKind> Lr1Item<K> {
    /// Create an item with its dot before the body symbol at `position`.
    #[must_use]
    pub fn new(
        production: ProductionRule<K>,
        position: usize,
        lookaheads: impl IntoIterator<Item = LookaheadSymbol<K>>,
    ) -> Self {
        Self {
            production,
            position,
            lookaheads: lookaheads.into_iter().collect(),
        }
    }

    /// The underlying production.
    #[must_use]
    pub const fn production(&self) -> &ProductionRule<K> {
        &self.production
    }

    /// The dot position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The lookahead set.
    #[must_use]
    pub const fn lookaheads(&self) -> &BTreeSet<LookaheadSymbol<K>> {
        &self.lookaheads
    }

    /// The symbol right after the dot, if the dot is not at the end.
    #[must_use]
    pub fn symbol_at_dot(&self) -> Option<&Symbol<K>> {
        self.production.body().get(self.position)
    }

    /// True when the dot has passed the whole body.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.symbol_at_dot().is_none()
    }

    /// The body symbols after the one at the dot.
    #[must_use]
    pub fn rest_after_dot(&self) -> &[Symbol<K>] {
        self.production
            .body()
            .symbols()
            .get(self.position + 1..)
            .unwrap_or(&[])
    }

    /// The same item with the dot moved one symbol to the right, or `None`
    /// when the item is already complete.
    #[must_use]
    pub fn advanced(&self) -> Option<Self> {
        if self.is_complete() {
            return None;
        }
        Some(Self {
            production: self.production.clone(),
            position: self.position + 1,
            lookaheads: self.lookaheads.clone(),
        })
    }

    /// True when `other` covers the same production and dot position,
    /// regardless of lookaheads.
    #[must_use]
    pub fn shares_core(&self, other: &Self) -> bool {
        self.position == other.position && self.production == other.production
    }
}

impl<K: TokenKind> fmt::Display for Lr1Item<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.production.head().render(NotationStyle::Sentential))?;
        for (index, symbol) in self.production.body().symbols().iter().enumerate() {
            if index == self.position {
                f.write_str(" •")?;
            }
            write!(f, " {}", symbol.render(NotationStyle::Sentential))?;
        }
        if self.position >= self.production.body().len() {
            f.write_str(" •")?;
        }
        f.write_str(", {")?;
        for (index, lookahead) in self.lookaheads.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{lookahead}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ident, non_terminal, plus, rule};

    fn sample_item(position: usize) -> Lr1Item<crate::testing::DemoKind> {
        let production = rule(
            "E",
            [
                Symbol::NonTerminal(non_terminal("T")),
                Symbol::Terminal(plus()),
                Symbol::NonTerminal(non_terminal("E")),
            ],
        );
        Lr1Item::new(
            production,
            position,
            [LookaheadSymbol::Terminal(plus()), LookaheadSymbol::Eoi],
        )
    }

    #[test]
    fn test_symbol_at_dot_tracks_the_position() {
        let item = sample_item(1);
        assert_eq!(item.symbol_at_dot(), Some(&Symbol::Terminal(plus())));
        assert!(!item.is_complete());
        assert_eq!(item.rest_after_dot().len(), 1);

        let item = sample_item(3);
        assert!(item.is_complete());
        assert!(item.rest_after_dot().is_empty());
    }

    #[test]
    fn test_advanced_moves_the_dot_once() {
        let item = sample_item(2);
        let advanced = item.advanced().expect("advanced");
        assert_eq!(advanced.position(), 3);
        assert!(advanced.is_complete());
        assert_eq!(advanced.lookaheads(), item.lookaheads());
        assert!(advanced.advanced().is_none());
        assert!(advanced.shares_core(&sample_item(3)));
    }

    #[test]
    fn test_display_marks_dot_and_lookaheads() {
        assert_eq!(format!("{}", sample_item(1)), "E -> T • + E, {+, $}");
        assert_eq!(format!("{}", sample_item(3)), "E -> T + E •, {+, $}");
    }

    #[test]
    fn test_empty_body_item_is_born_complete() {
        let item: Lr1Item<crate::testing::DemoKind> =
            Lr1Item::new(rule("A", []), 0, [LookaheadSymbol::Eoi]);
        assert!(item.is_complete());
        assert_eq!(format!("{item}"), "A -> •, {$}");
    }

    #[test]
    fn test_items_differing_only_in_lookaheads_are_distinct() {
        let narrow = Lr1Item::new(
            rule("A", [Symbol::Terminal(ident())]),
            0,
            [LookaheadSymbol::Eoi],
        );
        let wide = Lr1Item::new(
            rule("A", [Symbol::Terminal(ident())]),
            0,
            [LookaheadSymbol::Terminal(plus()), LookaheadSymbol::Eoi],
        );
        assert_ne!(narrow, wide);
        assert!(narrow.shares_core(&wide));
    }
}
