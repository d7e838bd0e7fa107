//! Integration tests for LR(1) state and table construction.

use syntagma::testing::{
    DemoKind, arithmetic_grammar, ident, literal, non_terminal, plus, rparen,
};
use syntagma::{
    GrammarDefinition, Lr1Action, Lr1Automaton, Lr1Error, Lr1ParsingTable, ProductionSet, Symbol,
    TableKey, Token,
};

fn augmented(mut set: ProductionSet<DemoKind>) -> ProductionSet<DemoKind> {
    set.augment().expect("augment");
    set
}

#[test]
fn tiny_grammar_yields_two_states_shift_then_accept() {
    // S -> "c" with a single-terminal body.
    let set = augmented(
        GrammarDefinition::new(non_terminal("S"))
            .rule(non_terminal("S"), [Symbol::Terminal(literal("c"))])
            .into_set(),
    );

    let automaton = Lr1Automaton::compute(&set).expect("compute");
    assert_eq!(automaton.state_count(), 2);

    let table = Lr1ParsingTable::from_automaton(&automaton).expect("table");
    let token = Token::new(DemoKind::Ident, "c");
    assert_eq!(table.action_for_token(0, &token), Some(Lr1Action::Shift(1)));
    assert_eq!(table.action_for_eoi(1), Some(Lr1Action::Accept));
}

#[test]
fn state_count_is_stable_across_repeated_runs() {
    let set = augmented(arithmetic_grammar());

    let baseline = Lr1Automaton::compute(&set).expect("compute");
    for _ in 0..3 {
        let again = Lr1Automaton::compute(&set).expect("compute");
        assert_eq!(again.state_count(), baseline.state_count());
        for (left, right) in baseline.states().iter().zip(again.states()) {
            assert_eq!(left.kernel(), right.kernel());
            assert_eq!(left.closure(), right.closure());
        }
    }
}

#[test]
fn no_two_states_share_a_kernel_signature() {
    let set = augmented(arithmetic_grammar());
    let automaton = Lr1Automaton::compute(&set).expect("compute");

    for state in automaton.states() {
        for other in automaton.states() {
            if state.id() != other.id() {
                assert_ne!(
                    state.kernel(),
                    other.kernel(),
                    "states {} and {} share a kernel",
                    state.id(),
                    other.id()
                );
            }
        }
    }
}

#[test]
fn unambiguous_grammar_fills_each_cell_exactly_once() {
    let set = augmented(arithmetic_grammar());
    let table = Lr1ParsingTable::build(&set).expect("build");

    let mut populated = 0;
    for state in 0..table.state_count() {
        let keys: Vec<_> = table.actions(state).map(|(key, _)| key.clone()).collect();
        populated += keys.len();
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }
    assert!(populated > table.state_count());
}

#[test]
fn shift_reduce_conflict_names_state_and_symbol() {
    // The dangling-suffix shape: after `( S`, a `+` can extend the longer
    // alternative or end the shorter one.
    let set = augmented(
        GrammarDefinition::new(non_terminal("S"))
            .rule(
                non_terminal("S"),
                [
                    Symbol::Terminal(literal("(")),
                    Symbol::NonTerminal(non_terminal("S")),
                    Symbol::Terminal(plus()),
                    Symbol::NonTerminal(non_terminal("S")),
                ],
            )
            .rule(
                non_terminal("S"),
                [
                    Symbol::Terminal(literal("(")),
                    Symbol::NonTerminal(non_terminal("S")),
                ],
            )
            .rule(non_terminal("S"), [Symbol::Terminal(ident())])
            .into_set(),
    );

    match Lr1ParsingTable::build(&set) {
        Err(Lr1Error::Conflict { state, symbol, .. }) => {
            assert!(state < 32, "conflict state id out of range: {state}");
            assert_eq!(symbol, TableKey::Terminal(plus()));
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[test]
fn reduce_reduce_conflict_is_reported_on_the_lookahead() {
    let set = augmented(
        GrammarDefinition::new(non_terminal("S"))
            .rule(non_terminal("S"), [Symbol::NonTerminal(non_terminal("A"))])
            .rule(non_terminal("S"), [Symbol::NonTerminal(non_terminal("B"))])
            .rule(non_terminal("A"), [Symbol::Terminal(ident())])
            .rule(non_terminal("B"), [Symbol::Terminal(ident())])
            .into_set(),
    );

    match Lr1ParsingTable::build(&set) {
        Err(Lr1Error::Conflict {
            symbol,
            existing: Lr1Action::Reduce(_),
            offered: Lr1Action::Reduce(_),
            ..
        }) => assert_eq!(symbol, TableKey::Eoi),
        other => panic!("expected a reduce/reduce conflict, got {other:?}"),
    }
}

#[test]
fn lookaheads_distinguish_reductions_in_lr1_but_not_lr0_grammars() {
    // S -> A a | B b, A -> c, B -> c: after shifting `c` the choice between
    // reducing to A or B rests entirely on the lookahead.
    let a = non_terminal("A");
    let b = non_terminal("B");
    let set = augmented(
        GrammarDefinition::new(non_terminal("S"))
            .rule(
                non_terminal("S"),
                [Symbol::NonTerminal(a.clone()), Symbol::Terminal(ident())],
            )
            .rule(
                non_terminal("S"),
                [Symbol::NonTerminal(b.clone()), Symbol::Terminal(plus())],
            )
            .rule(a, [Symbol::Terminal(literal("c"))])
            .rule(b, [Symbol::Terminal(literal("c"))])
            .into_set(),
    );

    let table = Lr1ParsingTable::build(&set).expect("build");

    // Find the state reached by shifting `c` from state 0.
    let c = Token::new(DemoKind::Ident, "c");
    let Some(Lr1Action::Shift(after_c)) = table.action_for_token(0, &c) else {
        panic!("state 0 must shift on c");
    };
    let id = Token::new(DemoKind::Ident, "id");
    let plus_token = Token::new(DemoKind::Plus, "+");
    let on_id = table.action_for_token(after_c, &id);
    let on_plus = table.action_for_token(after_c, &plus_token);
    match (on_id, on_plus) {
        (Some(Lr1Action::Reduce(to_a)), Some(Lr1Action::Reduce(to_b))) => {
            assert_ne!(to_a, to_b);
            assert_eq!(table.production(to_a).map(|r| r.head().name()), Some("A"));
            assert_eq!(table.production(to_b).map(|r| r.head().name()), Some("B"));
        }
        other => panic!("expected two distinct reductions, got {other:?}"),
    }
}

#[test]
fn empty_bodies_reduce_without_consuming_input() {
    // S -> ( E ), E -> id | ε.
    let set = augmented(
        GrammarDefinition::new(non_terminal("S"))
            .rule(
                non_terminal("S"),
                [
                    Symbol::Terminal(literal("(")),
                    Symbol::NonTerminal(non_terminal("E")),
                    Symbol::Terminal(rparen()),
                ],
            )
            .rule(non_terminal("E"), [Symbol::Terminal(ident())])
            .rule(non_terminal("E"), [])
            .into_set(),
    );

    let table = Lr1ParsingTable::build(&set).expect("build");
    let tokens = vec![
        Token::new(DemoKind::LParen, "("),
        Token::new(DemoKind::RParen, ")"),
    ];
    let tree = syntagma::parse(&table, &tokens).expect("parse");
    assert_eq!(tree.non_terminal(), Some(&non_terminal("S")));
    // ( E ): the middle child is the empty E node.
    assert_eq!(tree.children().len(), 3);
    assert_eq!(tree.children()[1].non_terminal(), Some(&non_terminal("E")));
    assert!(tree.children()[1].children().is_empty());
}
