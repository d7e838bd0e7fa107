//! Macro expansion.

use crate::rule::{ProductionRule, ProductionSet};
use crate::symbol::{MacroSymbol, Symbol};
use crate::token::TokenKind;
use crate::transform::{GrammarTransform, SetTransformation, TransformError};

/// Rewrites macro symbols into plain productions.
///
/// Optionals and alternations splice their bodies into the carrying rule.
/// Repetitions introduce a fresh primed helper non-terminal that recurses on
/// itself and ends in epsilon:
///
/// ```text
/// A -> α {β} γ   becomes   A -> α H γ
///                          H -> β H
///                          H -> ε
/// ```
///
/// Macro bodies are macro-free by construction, so every expansion lowers the
/// macro count of the rules it derives and the rewrite terminates. Running it
/// on a macro-free set does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroExpansion;

impl<K: TokenKind> GrammarTransform<K> for MacroExpansion {
    fn name(&self) -> &'static str {
        "macro expansion"
    }

    fn execute(
        &self,
        set: &mut ProductionSet<K>,
    ) -> Result<Vec<SetTransformation<K>>, TransformError> {
        set.reset_log();
        while set.contains_macro() {
            for rule in set.snapshot() {
                let Some((index, symbol)) = first_macro(&rule) else {
                    continue;
                };
                if symbol.is_repetition() {
                    expand_repetition(set, &rule, index, symbol)?;
                } else {
                    expand_in_place(set, &rule, index, symbol)?;
                }
            }
        }
        Ok(set.log().to_vec())
    }
}

fn first_macro<K: TokenKind>(rule: &ProductionRule<K>) -> Option<(usize, &MacroSymbol<K>)> {
    rule.body()
        .symbols()
        .iter()
        .enumerate()
        .find_map(|(index, symbol)| symbol.as_macro().map(|inner| (index, inner)))
}

fn expand_in_place<K: TokenKind>(
    set: &mut ProductionSet<K>,
    rule: &ProductionRule<K>,
    index: usize,
    symbol: &MacroSymbol<K>,
) -> Result<(), TransformError> {
    let name = if symbol.is_optional() {
        "expand optional"
    } else {
        "expand alternation"
    };
    let replacements: Vec<_> = symbol
        .expand(rule.head())
        .into_iter()
        .map(|alternative| {
            ProductionRule::new(
                rule.head().clone(),
                rule.body().spliced(index, alternative.symbols()),
            )
        })
        .collect();
    set.transformation(name)
        .remove_production(rule.clone())
        .add_missing_productions(replacements)
        .build()
}

fn expand_repetition<K: TokenKind>(
    set: &mut ProductionSet<K>,
    rule: &ProductionRule<K>,
    index: usize,
    symbol: &MacroSymbol<K>,
) -> Result<(), TransformError> {
    let helper = rule.head().derived(&set.non_terminals());
    let replacement = ProductionRule::new(
        rule.head().clone(),
        rule.body()
            .spliced(index, &[Symbol::NonTerminal(helper.clone())]),
    );
    let helper_rules: Vec<_> = symbol
        .expand(&helper)
        .into_iter()
        .map(|body| ProductionRule::new(helper.clone(), body))
        .collect();
    set.transformation("expand repetition")
        .remove_production(rule.clone())
        .add_production(replacement)
        .add_productions(helper_rules)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::GrammarDefinition;
    use crate::testing::{
        DemoKind, arithmetic_grammar, ident, non_terminal, plus, rule, sorted_rules,
    };
    use crate::Sentence;

    fn optional(body: impl IntoIterator<Item = Symbol<DemoKind>>) -> Symbol<DemoKind> {
        Symbol::Macro(MacroSymbol::optional(body.into_iter().collect()).expect("optional"))
    }

    #[test]
    fn test_optional_splices_in_place() {
        let mut set = GrammarDefinition::new(non_terminal("A"))
            .rule(
                non_terminal("A"),
                [
                    Symbol::Terminal(ident()),
                    optional([Symbol::Terminal(plus()), Symbol::Terminal(ident())]),
                ],
            )
            .into_set();

        let log = MacroExpansion.execute(&mut set).expect("execute");
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].name(), "expand optional");
        assert_eq!(log[0].operations().len(), 3);

        let expected = [
            rule(
                "A",
                [
                    Symbol::Terminal(ident()),
                    Symbol::Terminal(plus()),
                    Symbol::Terminal(ident()),
                ],
            ),
            rule("A", [Symbol::Terminal(ident())]),
        ];
        assert_eq!(set.len(), 2);
        for rule in expected {
            assert!(set.contains(&rule), "missing `{rule}`");
        }
    }

    #[test]
    fn test_repetition_introduces_helper() {
        let repetition = MacroSymbol::repetition(Sentence::new([
            Symbol::Terminal(plus()),
            Symbol::Terminal(ident()),
        ]))
        .expect("repetition");
        let mut set = GrammarDefinition::new(non_terminal("A"))
            .rule(
                non_terminal("A"),
                [Symbol::Terminal(ident()), Symbol::Macro(repetition)],
            )
            .into_set();

        MacroExpansion.execute(&mut set).expect("execute");

        let helper = non_terminal("A'");
        let expected = [
            rule(
                "A",
                [
                    Symbol::Terminal(ident()),
                    Symbol::NonTerminal(helper.clone()),
                ],
            ),
            rule(
                "A'",
                [
                    Symbol::Terminal(plus()),
                    Symbol::Terminal(ident()),
                    Symbol::NonTerminal(helper),
                ],
            ),
            rule("A'", []),
        ];
        assert_eq!(set.len(), 3);
        for rule in expected {
            assert!(set.contains(&rule), "missing `{rule}`");
        }
    }

    #[test]
    fn test_alternation_expands_to_branches() {
        let alternation = MacroSymbol::alternation([
            Sentence::new([Symbol::Terminal(ident())]),
            Sentence::new([Symbol::Terminal(plus())]),
        ])
        .expect("alternation");
        let mut set = GrammarDefinition::new(non_terminal("A"))
            .rule(
                non_terminal("A"),
                [Symbol::Macro(alternation), Symbol::Terminal(ident())],
            )
            .into_set();

        MacroExpansion.execute(&mut set).expect("execute");

        assert_eq!(set.len(), 2);
        assert!(set.contains(&rule(
            "A",
            [Symbol::Terminal(ident()), Symbol::Terminal(ident())]
        )));
        assert!(set.contains(&rule(
            "A",
            [Symbol::Terminal(plus()), Symbol::Terminal(ident())]
        )));
    }

    #[test]
    fn test_macro_free_set_is_untouched() {
        let mut set = arithmetic_grammar();
        let before = sorted_rules(&set);

        let log = MacroExpansion.execute(&mut set).expect("execute");
        assert!(log.is_empty());
        assert_eq!(sorted_rules(&set), before);
    }

    #[test]
    fn test_rule_with_two_macros_expands_fully() {
        let mut set = GrammarDefinition::new(non_terminal("A"))
            .rule(
                non_terminal("A"),
                [
                    optional([Symbol::Terminal(ident())]),
                    optional([Symbol::Terminal(plus())]),
                ],
            )
            .into_set();

        let log = MacroExpansion.execute(&mut set).expect("execute");
        assert_eq!(log.len(), 3);
        assert!(!set.contains_macro());

        let expected = [
            rule("A", [Symbol::Terminal(ident()), Symbol::Terminal(plus())]),
            rule("A", [Symbol::Terminal(ident())]),
            rule("A", [Symbol::Terminal(plus())]),
            rule("A", []),
        ];
        assert_eq!(set.len(), 4);
        for rule in expected {
            assert!(set.contains(&rule), "missing `{rule}`");
        }
    }
}
