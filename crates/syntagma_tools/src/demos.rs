//! Built-in demo grammars.
//!
//! The core has no textual grammar format, so the CLI ships a few grammars
//! built through the library API, each showing off a different part of the
//! pipeline.

use syntagma::testing::{DemoKind, ident, literal, non_terminal, number, plus, star};
use syntagma::{GrammarDefinition, MacroSymbol, ProductionSet, Sentence, Symbol};

/// The grammars the CLI knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    /// `S -> id`: the smallest grammar with a two-state automaton.
    Tiny,
    /// The classic left-recursive arithmetic grammar.
    Arithmetic,
    /// A right-recursive expression grammar with shared prefixes for the
    /// factoring stage.
    Expression,
    /// A call grammar using optional and repetition macros.
    Calls,
}

impl Demo {
    /// Build the demo's production set.
    #[must_use]
    pub fn build(self) -> ProductionSet<DemoKind> {
        match self {
            Self::Tiny => tiny(),
            Self::Arithmetic => syntagma::testing::arithmetic_grammar(),
            Self::Expression => expression(),
            Self::Calls => calls(),
        }
    }
}

fn tiny() -> ProductionSet<DemoKind> {
    GrammarDefinition::new(non_terminal("S"))
        .rule(non_terminal("S"), [Symbol::Terminal(ident())])
        .into_set()
}

fn expression() -> ProductionSet<DemoKind> {
    let expr = non_terminal("Expr");
    let term = non_terminal("Term");
    let factor = non_terminal("Factor");
    GrammarDefinition::new(expr.clone())
        .rule(
            expr.clone(),
            [
                Symbol::NonTerminal(term.clone()),
                Symbol::Terminal(plus()),
                Symbol::NonTerminal(expr.clone()),
            ],
        )
        .rule(expr, [Symbol::NonTerminal(term.clone())])
        .rule(
            term.clone(),
            [
                Symbol::NonTerminal(factor.clone()),
                Symbol::Terminal(star()),
                Symbol::NonTerminal(term.clone()),
            ],
        )
        .rule(term, [Symbol::NonTerminal(factor.clone())])
        .rule(factor.clone(), [Symbol::Terminal(ident())])
        .rule(factor, [Symbol::Terminal(number())])
        .into_set()
}

fn calls() -> ProductionSet<DemoKind> {
    let call = non_terminal("Call");
    let args = non_terminal("Args");
    let optional_args =
        MacroSymbol::optional(Sentence::new([Symbol::NonTerminal(args.clone())]))
            .expect("macro-free body");
    let more_args = MacroSymbol::repetition(Sentence::new([
        Symbol::Terminal(literal(",")),
        Symbol::Terminal(ident()),
    ]))
    .expect("macro-free body");
    GrammarDefinition::new(call.clone())
        .rule(
            call,
            [
                Symbol::Terminal(ident()),
                Symbol::Terminal(literal("(")),
                Symbol::Macro(optional_args),
                Symbol::Terminal(literal(")")),
            ],
        )
        .rule(args, [Symbol::Terminal(ident()), Symbol::Macro(more_args)])
        .into_set()
}
