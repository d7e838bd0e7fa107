//! Integration tests for the grammar transformation engine.

use syntagma::testing::{
    DemoKind, arithmetic_grammar, ident, lparen, non_terminal, plus, rule, sorted_rules, star,
};
use syntagma::{
    DuplicateRemoval, GrammarDefinition, GrammarTransform, LeftFactoring, LeftRecursionRemoval,
    MacroExpansion, MacroSymbol, ProductionSet, Sentence, Symbol, UnitExpansion,
    UnreachableRemoval, find_left_recursion,
};

/// Replays every logged transformation backwards and checks the original
/// multiset comes back.
fn assert_revertible(
    original: &ProductionSet<DemoKind>,
    transformed: &mut ProductionSet<DemoKind>,
) {
    let log = transformed.take_log();
    for transformation in log.iter().rev() {
        transformation.revert(transformed).expect("revert");
    }
    assert_eq!(sorted_rules(transformed), sorted_rules(original));
}

#[test]
fn factoring_splits_the_shared_prefix_into_a_primed_head() {
    // A -> a A B | a B c | a, as in the classic factorization example.
    let a = non_terminal("A");
    let b = non_terminal("B");
    let mut set = GrammarDefinition::new(a.clone())
        .rule(
            a.clone(),
            [
                Symbol::Terminal(ident()),
                Symbol::NonTerminal(a.clone()),
                Symbol::NonTerminal(b.clone()),
            ],
        )
        .rule(
            a.clone(),
            [
                Symbol::Terminal(ident()),
                Symbol::NonTerminal(b.clone()),
                Symbol::Terminal(star()),
            ],
        )
        .rule(a.clone(), [Symbol::Terminal(ident())])
        .into_set();
    let original = set.clone();

    let log = LeftFactoring.execute(&mut set).expect("execute");
    assert_eq!(log.len(), 1);

    let primed = non_terminal("A'");
    let expected = GrammarDefinition::new(a.clone())
        .rule(
            a,
            [
                Symbol::Terminal(ident()),
                Symbol::NonTerminal(primed.clone()),
            ],
        )
        .rule(
            primed.clone(),
            [
                Symbol::NonTerminal(non_terminal("A")),
                Symbol::NonTerminal(b.clone()),
            ],
        )
        .rule(
            primed.clone(),
            [Symbol::NonTerminal(b), Symbol::Terminal(star())],
        )
        .rule(primed, [])
        .into_set();
    assert_eq!(sorted_rules(&set), sorted_rules(&expected));

    assert_revertible(&original, &mut set);
}

#[test]
fn unreachable_removal_deletes_exactly_the_orphaned_rules() {
    let mut set = GrammarDefinition::new(non_terminal("S"))
        .rule(non_terminal("S"), [Symbol::NonTerminal(non_terminal("A"))])
        .rule(non_terminal("A"), [Symbol::Terminal(ident())])
        // X is referenced by nothing on any path from S.
        .rule(non_terminal("X"), [Symbol::NonTerminal(non_terminal("Y"))])
        .rule(non_terminal("Y"), [Symbol::Terminal(plus())])
        .into_set();
    let original = set.clone();

    let log = UnreachableRemoval.execute(&mut set).expect("execute");
    assert_eq!(log.len(), 2);

    let expected = GrammarDefinition::new(non_terminal("S"))
        .rule(non_terminal("S"), [Symbol::NonTerminal(non_terminal("A"))])
        .rule(non_terminal("A"), [Symbol::Terminal(ident())])
        .into_set();
    assert_eq!(sorted_rules(&set), sorted_rules(&expected));

    assert_revertible(&original, &mut set);
}

#[test]
fn macro_expansion_reaches_a_macro_free_fixed_point() {
    let list = non_terminal("List");
    let item = Sentence::new([Symbol::Terminal(ident())]);
    let tail = Sentence::new([Symbol::Terminal(plus()), Symbol::Terminal(ident())]);
    let repetition = MacroSymbol::repetition(tail).expect("repetition");
    let optional = MacroSymbol::optional(item.clone()).expect("optional");

    let mut set = GrammarDefinition::new(list.clone())
        .rule(
            list,
            [
                Symbol::Terminal(ident()),
                Symbol::Macro(repetition),
                Symbol::Macro(optional),
            ],
        )
        .into_set();
    let original = set.clone();

    let log = MacroExpansion.execute(&mut set).expect("execute");
    assert!(!log.is_empty());
    assert!(!set.contains_macro());

    // Idempotence: a second run has nothing to do.
    let again = MacroExpansion.execute(&mut set).expect("re-execute");
    assert!(again.is_empty());

    // The first run's log, reverted in order, restores the macro-carrying
    // original. The second run reset the set's own log, so revert from the
    // returned one.
    for transformation in log.iter().rev() {
        transformation.revert(&mut set).expect("revert");
    }
    assert_eq!(sorted_rules(&set), sorted_rules(&original));
}

#[test]
fn left_recursion_removal_leaves_no_leftmost_cycle() {
    let mut set = arithmetic_grammar();
    let original = set.clone();

    LeftRecursionRemoval.execute(&mut set).expect("execute");

    assert!(find_left_recursion(&set).is_empty());
    // Postcondition holds under the stricter reading too: no body starts
    // with its own head.
    for produced in set.rules() {
        assert_ne!(
            produced.body().first_symbol(),
            Some(&Symbol::NonTerminal(produced.head().clone()))
        );
    }

    assert_revertible(&original, &mut set);
}

#[test]
fn unit_expansion_survives_cyclic_unit_chains() {
    // A -> B, B -> A, plus one real alternative each.
    let mut set = GrammarDefinition::new(non_terminal("A"))
        .rule(non_terminal("A"), [Symbol::NonTerminal(non_terminal("B"))])
        .rule(non_terminal("A"), [Symbol::Terminal(ident())])
        .rule(non_terminal("B"), [Symbol::NonTerminal(non_terminal("A"))])
        .rule(non_terminal("B"), [Symbol::Terminal(plus())])
        .into_set();
    let original = set.clone();

    UnitExpansion.execute(&mut set).expect("execute");

    // No unit production other than trivial self-loops may survive.
    for produced in set.rules() {
        let is_unit = produced.body().len() == 1
            && produced.body().first_symbol().is_some_and(Symbol::is_non_terminal);
        assert!(!is_unit, "unit production survived: {produced}");
    }
    assert!(set.contains(&rule("A", [Symbol::Terminal(ident())])));
    assert!(set.contains(&rule("A", [Symbol::Terminal(plus())])));
    assert!(set.contains(&rule("B", [Symbol::Terminal(ident())])));
    assert!(set.contains(&rule("B", [Symbol::Terminal(plus())])));

    assert_revertible(&original, &mut set);
}

#[test]
fn duplicate_removal_keeps_the_first_occurrence_only() {
    let mut set = GrammarDefinition::new(non_terminal("S"))
        .rule(non_terminal("S"), [Symbol::Terminal(ident())])
        .rule(non_terminal("S"), [Symbol::Terminal(ident())])
        .rule(non_terminal("S"), [Symbol::Terminal(lparen())])
        .rule(non_terminal("S"), [Symbol::Terminal(ident())])
        .into_set();
    let original = set.clone();

    let log = DuplicateRemoval.execute(&mut set).expect("execute");
    assert_eq!(log.len(), 2);
    // The first occurrence survives in its original slot.
    assert_eq!(
        set.rules().to_vec(),
        vec![
            rule("S", [Symbol::Terminal(ident())]),
            rule("S", [Symbol::Terminal(lparen())]),
        ]
    );

    assert_revertible(&original, &mut set);
}

#[test]
fn transforms_refuse_macro_carrying_sets() {
    let optional = MacroSymbol::optional(Sentence::new([Symbol::Terminal(ident())]))
        .expect("optional");
    let mut set = GrammarDefinition::new(non_terminal("S"))
        .rule(non_terminal("S"), [Symbol::Macro(optional)])
        .into_set();

    let transforms: Vec<Box<dyn GrammarTransform<DemoKind>>> = vec![
        Box::new(DuplicateRemoval),
        Box::new(UnreachableRemoval),
        Box::new(UnitExpansion),
        Box::new(LeftRecursionRemoval),
        Box::new(LeftFactoring),
    ];
    for transform in transforms {
        let result = transform.execute(&mut set);
        assert!(result.is_err(), "{} accepted a macro", transform.name());
    }
}
