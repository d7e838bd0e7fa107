//! LR(1) states.

use std::collections::BTreeSet;
use std::fmt;

use crate::lr::item::Lr1Item;
use crate::rule::ProductionRule;
use crate::token::TokenKind;

/// One state of the LR(1) automaton.
///
/// The kernel is the item set that identifies the state; the closure holds
/// everything derived from it by expanding non-terminals after the dot. No
/// two states of one automaton share a kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lr1State<K> {
    id: usize,
    kernel: BTreeSet<Lr1Item<K>>,
    closure: BTreeSet<Lr1Item<K>>,
}

impl<K: TokenKind> Lr1State<K> {
    pub(crate) const fn new(
        id: usize,
        kernel: BTreeSet<Lr1Item<K>>,
        closure: BTreeSet<Lr1Item<K>>,
    ) -> Self {
        Self {
            id,
            kernel,
            closure,
        }
    }

    /// The state's position in the automaton.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The items that identify this state.
    #[must_use]
    pub const fn kernel(&self) -> &BTreeSet<Lr1Item<K>> {
        &self.kernel
    }

    /// The items derived from the kernel.
    #[must_use]
    pub const fn closure(&self) -> &BTreeSet<Lr1Item<K>> {
        &self.closure
    }

    /// Kernel and closure items together.
    pub fn items(&self) -> impl Iterator<Item = &Lr1Item<K>> {
        self.kernel.iter().chain(self.closure.iter())
    }

    /// True when any kernel item is complete.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.kernel.iter().any(Lr1Item::is_complete)
    }

    /// True when a kernel item has completed the augmented production.
    #[must_use]
    pub fn is_accepting(&self, augmented: &ProductionRule<K>) -> bool {
        self.kernel
            .iter()
            .any(|item| item.is_complete() && item.production() == augmented)
    }
}

impl<K: TokenKind> fmt::Display for Lr1State<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state {}", self.id)?;
        for item in self.items() {
            write!(f, "\n  {item}")?;
        }
        Ok(())
    }
}
