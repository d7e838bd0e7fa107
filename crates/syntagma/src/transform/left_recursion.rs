//! Left-recursion removal.

use hashbrown::HashSet;

use crate::analysis::{RecursionKind, find_left_recursion};
use crate::rule::{ProductionRule, ProductionSet};
use crate::symbol::Symbol;
use crate::token::TokenKind;
use crate::transform::{GrammarTransform, SetTransformation, TransformError};

/// Unfolds left-recursive derivation branches until none remain.
///
/// Each flagged production `A -> X β` (where `X` starts a branch that loops
/// back to `A`) is removed and replaced by `A -> γ β` for every alternative
/// `X -> γ` that is not itself flagged. A branch whose leading non-terminal
/// has no unflagged alternative is removed outright. The rewrite is an
/// unfolding: recursive nesting is cut off, so the result derives a subset of
/// the original language. Requires a macro-free set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftRecursionRemoval;

impl<K: TokenKind> GrammarTransform<K> for LeftRecursionRemoval {
    fn name(&self) -> &'static str {
        "left recursion removal"
    }

    fn execute(
        &self,
        set: &mut ProductionSet<K>,
    ) -> Result<Vec<SetTransformation<K>>, TransformError> {
        set.ensure_macro_free()?;
        set.reset_log();

        loop {
            let branches = find_left_recursion(set);
            if branches.is_empty() {
                break;
            }
            let flagged: HashSet<ProductionRule<K>, ahash::RandomState> = branches
                .iter()
                .map(|branch| branch.production().clone())
                .collect();
            let snapshot = set.snapshot();
            for branch in &branches {
                let production = branch.production();
                let Some(leading) = production
                    .body()
                    .first_symbol()
                    .and_then(Symbol::as_non_terminal)
                else {
                    continue;
                };
                let replacements: Vec<ProductionRule<K>> = snapshot
                    .iter()
                    .filter(|alternative| {
                        alternative.head() == leading && !flagged.contains(*alternative)
                    })
                    .map(|alternative| {
                        ProductionRule::new(
                            production.head().clone(),
                            production.body().spliced(0, alternative.body().symbols()),
                        )
                    })
                    .collect();
                set.transformation("unfold left recursion")
                    .remove_production(production.clone())
                    .note(match branch.kind() {
                        RecursionKind::Direct => "directly recursive branch",
                        RecursionKind::Indirect => "indirectly recursive branch",
                    })
                    .add_missing_productions(replacements)
                    .build()?;
            }
        }
        Ok(set.log().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::GrammarDefinition;
    use crate::symbol::MacroSymbol;
    use crate::testing::{
        arithmetic_grammar, ident, non_terminal, plus, rule, sorted_rules, star,
    };

    #[test]
    fn test_unfolds_direct_recursion() {
        let mut set = arithmetic_grammar();
        let log = LeftRecursionRemoval.execute(&mut set).expect("execute");

        assert_eq!(log.len(), 2);
        assert_eq!(set.len(), 7);
        assert!(find_left_recursion(&set).is_empty());
        assert!(set.contains(&rule(
            "E",
            [
                Symbol::NonTerminal(non_terminal("T")),
                Symbol::Terminal(plus()),
                Symbol::NonTerminal(non_terminal("T")),
            ],
        )));
        assert!(!set.contains(&rule(
            "E",
            [
                Symbol::NonTerminal(non_terminal("E")),
                Symbol::Terminal(plus()),
                Symbol::NonTerminal(non_terminal("T")),
            ],
        )));
    }

    #[test]
    fn test_unfolds_indirect_recursion() {
        let mut set = GrammarDefinition::new(non_terminal("S"))
            .rule(
                non_terminal("S"),
                [
                    Symbol::NonTerminal(non_terminal("A")),
                    Symbol::Terminal(ident()),
                ],
            )
            .rule(
                non_terminal("A"),
                [
                    Symbol::NonTerminal(non_terminal("S")),
                    Symbol::Terminal(plus()),
                ],
            )
            .rule(non_terminal("A"), [Symbol::Terminal(star())])
            .into_set();

        let log = LeftRecursionRemoval.execute(&mut set).expect("execute");

        assert_eq!(log.len(), 2);
        let expected = GrammarDefinition::new(non_terminal("S"))
            .rule(
                non_terminal("S"),
                [Symbol::Terminal(star()), Symbol::Terminal(ident())],
            )
            .rule(non_terminal("A"), [Symbol::Terminal(star())])
            .into_set();
        assert_eq!(sorted_rules(&set), sorted_rules(&expected));
    }

    #[test]
    fn test_branch_without_alternatives_is_removed() {
        let mut set = GrammarDefinition::new(non_terminal("A"))
            .rule(
                non_terminal("A"),
                [
                    Symbol::NonTerminal(non_terminal("A")),
                    Symbol::Terminal(ident()),
                ],
            )
            .into_set();

        let log = LeftRecursionRemoval.execute(&mut set).expect("execute");

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].operations().len(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_recursion_free_set_is_untouched() {
        let mut set = GrammarDefinition::new(non_terminal("S"))
            .rule(
                non_terminal("S"),
                [Symbol::Terminal(ident()), Symbol::NonTerminal(non_terminal("S"))],
            )
            .rule(non_terminal("S"), [Symbol::Terminal(ident())])
            .into_set();

        let log = LeftRecursionRemoval.execute(&mut set).expect("execute");
        assert!(log.is_empty());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_rejects_macro_carrying_sets() {
        let optional = MacroSymbol::optional([Symbol::Terminal(ident())].into_iter().collect())
            .expect("optional");
        let mut set = ProductionSet::new();
        set.push(rule("A", [Symbol::Macro(optional)]));

        let result = LeftRecursionRemoval.execute(&mut set);
        assert!(matches!(result, Err(TransformError::UnexpectedMacro { .. })));
    }
}
