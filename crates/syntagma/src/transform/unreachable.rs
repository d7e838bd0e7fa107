//! Unreachable rule removal.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::rule::ProductionSet;
use crate::symbol::NonTerminal;
use crate::token::TokenKind;
use crate::transform::{GrammarTransform, SetTransformation, TransformError};

/// Removes every rule whose head cannot be reached from the root.
///
/// The root is the augmented head when the set is augmented, the start symbol
/// otherwise. Reachability is closed over heads: a reachable head keeps all
/// of its rules, so removal always takes whole head groups. Requires a
/// macro-free set with a start symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableRemoval;

impl<K: TokenKind> GrammarTransform<K> for UnreachableRemoval {
    fn name(&self) -> &'static str {
        "unreachable removal"
    }

    fn execute(
        &self,
        set: &mut ProductionSet<K>,
    ) -> Result<Vec<SetTransformation<K>>, TransformError> {
        set.ensure_macro_free()?;
        let root = match set.augmented_rule() {
            Some(rule) => rule.head().clone(),
            None => set.start().cloned().ok_or(TransformError::MissingStart)?,
        };
        set.reset_log();

        let reachable = reachable_heads(set, root);

        let mut handled: HashSet<NonTerminal, ahash::RandomState> = HashSet::default();
        for rule in set.snapshot() {
            if reachable.contains(rule.head()) || !handled.insert(rule.head().clone()) {
                continue;
            }
            let doomed: Vec<_> = set.productions_of(rule.head()).cloned().collect();
            set.transformation("remove unreachable")
                .remove_productions(doomed)
                .build()?;
        }
        Ok(set.log().to_vec())
    }
}

fn reachable_heads<K: TokenKind>(
    set: &ProductionSet<K>,
    root: NonTerminal,
) -> HashSet<NonTerminal, ahash::RandomState> {
    let mut reachable: HashSet<NonTerminal, ahash::RandomState> = HashSet::default();
    let mut queue = VecDeque::new();
    reachable.insert(root.clone());
    queue.push_back(root);
    while let Some(head) = queue.pop_front() {
        for rule in set.productions_of(&head) {
            for symbol in rule.body().symbols() {
                if let Some(non_terminal) = symbol.as_non_terminal()
                    && reachable.insert(non_terminal.clone())
                {
                    queue.push_back(non_terminal.clone());
                }
            }
        }
    }
    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;
    use crate::rule::GrammarDefinition;
    use crate::testing::{ident, non_terminal, plus, rule};

    #[test]
    fn test_removes_rules_not_reached_from_start() {
        let mut set = GrammarDefinition::new(non_terminal("S"))
            .rule(non_terminal("S"), [Symbol::Terminal(ident())])
            .rule(non_terminal("X"), [Symbol::Terminal(plus())])
            .into_set();

        let log = UnreachableRemoval.execute(&mut set).expect("execute");
        assert_eq!(log.len(), 1);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&rule("S", [Symbol::Terminal(ident())])));
    }

    #[test]
    fn test_keeps_transitively_reachable_heads() {
        let mut set = GrammarDefinition::new(non_terminal("S"))
            .rule(non_terminal("S"), [Symbol::NonTerminal(non_terminal("A"))])
            .rule(non_terminal("A"), [Symbol::Terminal(ident())])
            .rule(non_terminal("B"), [Symbol::Terminal(plus())])
            .into_set();

        UnreachableRemoval.execute(&mut set).expect("execute");
        assert_eq!(set.len(), 2);
        assert!(set.productions_of(&non_terminal("B")).next().is_none());
    }

    #[test]
    fn test_whole_head_group_goes_at_once() {
        let mut set = GrammarDefinition::new(non_terminal("S"))
            .rule(non_terminal("S"), [Symbol::Terminal(ident())])
            .rule(non_terminal("X"), [Symbol::Terminal(plus())])
            .rule(non_terminal("X"), [Symbol::Terminal(ident())])
            .into_set();

        let log = UnreachableRemoval.execute(&mut set).expect("execute");
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].operations().len(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_requires_a_start_symbol() {
        let mut set = ProductionSet::new();
        set.push(rule("A", [Symbol::Terminal(ident())]));
        let result = UnreachableRemoval.execute(&mut set);
        assert!(matches!(result, Err(TransformError::MissingStart)));
    }

    #[test]
    fn test_fully_reachable_set_is_untouched() {
        let mut set = crate::testing::arithmetic_grammar();
        let log = UnreachableRemoval.execute(&mut set).expect("execute");
        assert!(log.is_empty());
        assert_eq!(set.len(), 7);
    }
}
