//! Production rules.

use crate::rule::Sentence;
use crate::symbol::{NonTerminal, Notation, NotationStyle, Symbol};
use crate::token::TokenKind;

/// A rewrite rule `Head -> Body`.
///
/// Rules have value equality and are never mutated in place: replacing a rule
/// means removing it and adding its replacement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionRule<K> {
    head: NonTerminal,
    body: Sentence<K>,
}

impl<K: TokenKind> ProductionRule<K> {
    /// Create a rule.
    #[must_use]
    pub const fn new(head: NonTerminal, body: Sentence<K>) -> Self {
        Self { head, body }
    }

    /// The head non-terminal.
    #[must_use]
    pub const fn head(&self) -> &NonTerminal {
        &self.head
    }

    /// The body sentence.
    #[must_use]
    pub const fn body(&self) -> &Sentence<K> {
        &self.body
    }

    /// True when the body is exactly one non-terminal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.body.len() == 1 && self.body.first_symbol().is_some_and(Symbol::is_non_terminal)
    }

    /// True for the epsilon production.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True when the body contains a macro symbol.
    #[must_use]
    pub fn contains_macro(&self) -> bool {
        self.body.contains_macro()
    }
}

impl<K: TokenKind> Notation for ProductionRule<K> {
    fn render_into(&self, style: NotationStyle, out: &mut String) {
        self.head.render_into(style, out);
        match style {
            NotationStyle::Sentential => out.push_str(" -> "),
            NotationStyle::Bnf => out.push_str(" ::= "),
            NotationStyle::Ebnf | NotationStyle::EbnfKleene => out.push_str(" = "),
        }
        self.body.render_into(style, out);
        if matches!(style, NotationStyle::Ebnf | NotationStyle::EbnfKleene) {
            out.push_str(" ;");
        }
    }
}

impl<K: TokenKind> std::fmt::Display for ProductionRule<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(NotationStyle::Sentential))
    }
}
