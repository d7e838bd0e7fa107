//! # Testing Utilities
//!
//! Shared fixtures for the test suite: a small demo token kind with a
//! whitespace-splitting tokenizer, shorthand symbol constructors, and a few
//! well-known grammars.
//!
//! The shorthands panic on invalid input, which keeps test bodies free of
//! construction plumbing. Production code never goes through this module.

use compact_str::CompactString;
use thiserror::Error;

use crate::rule::{GrammarDefinition, ProductionRule, ProductionSet};
use crate::symbol::{NonTerminal, Symbol, Terminal};
use crate::token::{Token, TokenKind, Tokenizer};

/// Token kinds of the demo language used across the test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DemoKind {
    Ident,
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Semi,
}

impl TokenKind for DemoKind {}

/// Error from [`DemoTokenizer`] on text it cannot classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized fragment `{fragment}`")]
pub struct DemoTokenError {
    fragment: CompactString,
}

/// Whitespace-splitting tokenizer for [`DemoKind`].
///
/// Fragments are classified as punctuation, numbers, or identifiers; anything
/// else fails. Good enough to bootstrap literal-backed terminals in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoTokenizer;

impl Tokenizer<DemoKind> for DemoTokenizer {
    type Error = DemoTokenError;

    fn tokenize(&self, text: &str) -> Result<Vec<Token<DemoKind>>, Self::Error> {
        text.split_whitespace().map(classify).collect()
    }
}

fn classify(fragment: &str) -> Result<Token<DemoKind>, DemoTokenError> {
    let kind = match fragment {
        "+" => DemoKind::Plus,
        "-" => DemoKind::Minus,
        "*" => DemoKind::Star,
        "/" => DemoKind::Slash,
        "(" => DemoKind::LParen,
        ")" => DemoKind::RParen,
        "," => DemoKind::Comma,
        ";" => DemoKind::Semi,
        _ if fragment.chars().all(|c| c.is_ascii_digit()) => DemoKind::Number,
        _ if fragment.starts_with(|c: char| c.is_ascii_alphabetic())
            && fragment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            DemoKind::Ident
        }
        _ => {
            return Err(DemoTokenError {
                fragment: fragment.into(),
            });
        }
    };
    Ok(Token::new(kind, fragment))
}

/// A non-terminal, panicking on invalid names.
#[must_use]
pub fn non_terminal(name: &str) -> NonTerminal {
    NonTerminal::new(name).expect("valid non-terminal name")
}

/// A kind-only terminal.
#[must_use]
pub const fn terminal(kind: DemoKind) -> Terminal<DemoKind> {
    Terminal::of_kind(kind)
}

/// A literal-backed terminal classified through [`DemoTokenizer`].
#[must_use]
pub fn literal(text: &str) -> Terminal<DemoKind> {
    Terminal::from_literal(text, &DemoTokenizer).expect("literal tokenizes to one token")
}

/// The `id` identifier terminal.
#[must_use]
pub fn ident() -> Terminal<DemoKind> {
    literal("id")
}

/// A terminal matching any number token.
#[must_use]
pub const fn number() -> Terminal<DemoKind> {
    terminal(DemoKind::Number)
}

/// The `+` terminal.
#[must_use]
pub fn plus() -> Terminal<DemoKind> {
    literal("+")
}

/// The `*` terminal.
#[must_use]
pub fn star() -> Terminal<DemoKind> {
    literal("*")
}

/// The `(` terminal.
#[must_use]
pub fn lparen() -> Terminal<DemoKind> {
    literal("(")
}

/// The `)` terminal.
#[must_use]
pub fn rparen() -> Terminal<DemoKind> {
    literal(")")
}

/// A production rule with a named head.
#[must_use]
pub fn rule(
    head: &str,
    body: impl IntoIterator<Item = Symbol<DemoKind>>,
) -> ProductionRule<DemoKind> {
    ProductionRule::new(non_terminal(head), body.into_iter().collect())
}

/// The classic left-recursive arithmetic grammar:
///
/// ```text
/// E -> E + T | T
/// T -> T * F | F
/// F -> ( E ) | id | Number
/// ```
#[must_use]
pub fn arithmetic_grammar() -> ProductionSet<DemoKind> {
    let e = non_terminal("E");
    let t = non_terminal("T");
    let f = non_terminal("F");
    GrammarDefinition::new(e.clone())
        .rule(
            e.clone(),
            [
                Symbol::NonTerminal(e.clone()),
                Symbol::Terminal(plus()),
                Symbol::NonTerminal(t.clone()),
            ],
        )
        .rule(e, [Symbol::NonTerminal(t.clone())])
        .rule(
            t.clone(),
            [
                Symbol::NonTerminal(t.clone()),
                Symbol::Terminal(star()),
                Symbol::NonTerminal(f.clone()),
            ],
        )
        .rule(t, [Symbol::NonTerminal(f.clone())])
        .rule(
            f.clone(),
            [
                Symbol::Terminal(lparen()),
                Symbol::NonTerminal(non_terminal("E")),
                Symbol::Terminal(rparen()),
            ],
        )
        .rule(f.clone(), [Symbol::Terminal(ident())])
        .rule(f, [Symbol::Terminal(number())])
        .into_set()
}

/// The rules of `set`, sorted structurally. Multiset comparisons in tests go
/// through this, since reverting a transformation restores occurrences but
/// not positions.
#[must_use]
pub fn sorted_rules<K: TokenKind>(set: &ProductionSet<K>) -> Vec<ProductionRule<K>> {
    let mut rules = set.snapshot();
    rules.sort();
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_covers_punctuation_numbers_idents() {
        let tokens = DemoTokenizer.tokenize("( x1 + 42 ) ;").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| *t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                DemoKind::LParen,
                DemoKind::Ident,
                DemoKind::Plus,
                DemoKind::Number,
                DemoKind::RParen,
                DemoKind::Semi,
            ]
        );
    }

    #[test]
    fn test_classify_rejects_unknown_fragments() {
        assert!(DemoTokenizer.tokenize("a § b").is_err());
        assert!(DemoTokenizer.tokenize("1x").is_err());
    }

    #[test]
    fn test_arithmetic_grammar_shape() {
        let set = arithmetic_grammar();
        assert_eq!(set.len(), 7);
        assert_eq!(set.start(), Some(&non_terminal("E")));
        assert_eq!(set.productions_of(&non_terminal("F")).count(), 3);
    }
}
