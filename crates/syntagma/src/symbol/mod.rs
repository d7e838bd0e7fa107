//! # Symbol Model
//!
//! Grammar symbols as a closed sum type: [`Terminal`], [`NonTerminal`],
//! epsilon, end-of-input, and the macro shorthands that expand into plain
//! productions before table construction.
//!
//! All symbols have value equality, a stable hash, a total order (used for
//! canonical item-set ordering), and render in the four [`NotationStyle`]s.

mod macros;
mod nonterminal;
pub(crate) mod notation;
mod terminal;

pub use macros::MacroSymbol;
pub use nonterminal::NonTerminal;
pub use notation::{Notation, NotationStyle};
pub use terminal::Terminal;

use compact_str::CompactString;
use thiserror::Error;

use crate::token::TokenKind;

/// A grammar symbol.
///
/// `Epsilon` never appears inside a [`Sentence`](crate::rule::Sentence); the
/// empty sentence is the epsilon body. The variant exists for symbol-level
/// rendering and for building bodies, where it is filtered out on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol<K> {
    Terminal(Terminal<K>),
    NonTerminal(NonTerminal),
    Epsilon,
    Eoi,
    Macro(MacroSymbol<K>),
}

impl<K: TokenKind> Symbol<K> {
    /// True for the [`Terminal`] variant.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// True for the [`NonTerminal`] variant.
    #[must_use]
    pub const fn is_non_terminal(&self) -> bool {
        matches!(self, Self::NonTerminal(_))
    }

    /// True for the epsilon symbol.
    #[must_use]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Self::Epsilon)
    }

    /// True for the end-of-input symbol.
    #[must_use]
    pub const fn is_eoi(&self) -> bool {
        matches!(self, Self::Eoi)
    }

    /// True for the macro variant.
    #[must_use]
    pub const fn is_macro(&self) -> bool {
        matches!(self, Self::Macro(_))
    }

    /// The contained terminal, if any.
    #[must_use]
    pub const fn as_terminal(&self) -> Option<&Terminal<K>> {
        match self {
            Self::Terminal(terminal) => Some(terminal),
            _ => None,
        }
    }

    /// The contained non-terminal, if any.
    #[must_use]
    pub const fn as_non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Self::NonTerminal(non_terminal) => Some(non_terminal),
            _ => None,
        }
    }

    /// The contained macro, if any.
    #[must_use]
    pub const fn as_macro(&self) -> Option<&MacroSymbol<K>> {
        match self {
            Self::Macro(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl<K> From<Terminal<K>> for Symbol<K> {
    fn from(terminal: Terminal<K>) -> Self {
        Self::Terminal(terminal)
    }
}

impl<K> From<NonTerminal> for Symbol<K> {
    fn from(non_terminal: NonTerminal) -> Self {
        Self::NonTerminal(non_terminal)
    }
}

impl<K> From<MacroSymbol<K>> for Symbol<K> {
    fn from(symbol: MacroSymbol<K>) -> Self {
        Self::Macro(symbol)
    }
}

impl<K: TokenKind> Notation for Symbol<K> {
    fn render_into(&self, style: NotationStyle, out: &mut String) {
        match self {
            Self::Terminal(terminal) => terminal.render_into(style, out),
            Self::NonTerminal(non_terminal) => non_terminal.render_into(style, out),
            Self::Epsilon => out.push_str(notation::EPSILON_GLYPH),
            Self::Eoi => out.push_str(notation::EOI_GLYPH),
            Self::Macro(symbol) => symbol.render_into(style, out),
        }
    }
}

impl<K: TokenKind> std::fmt::Display for Symbol<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(NotationStyle::Sentential))
    }
}

/// Errors raised by malformed symbol construction. All are fatal at
/// construction time.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("terminal literal is empty")]
    EmptyLiteral,

    #[error("terminal literal `{literal}` tokenizes to {count} tokens; exactly one is required")]
    AmbiguousLiteral { literal: CompactString, count: usize },

    #[error("failed to tokenize terminal literal `{literal}`")]
    Tokenize {
        literal: CompactString,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("non-terminal name is empty")]
    EmptyName,

    #[error("non-terminal name `{name}` contains whitespace")]
    WhitespaceInName { name: CompactString },

    #[error("non-terminal name `{name}` collides with the epsilon notation")]
    ReservedName { name: CompactString },

    #[error("macro body may not contain another macro")]
    NestedMacro,

    #[error("macro body is empty")]
    EmptyMacroBody,

    #[error("alternation requires at least two alternatives, got {count}")]
    TooFewAlternatives { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Sentence;
    use crate::testing::{DemoKind, ident, non_terminal};

    #[test]
    fn test_symbol_classification() {
        let terminal: Symbol<DemoKind> = Symbol::Terminal(ident());
        let non_term: Symbol<DemoKind> = Symbol::NonTerminal(non_terminal("E"));
        let eps: Symbol<DemoKind> = Symbol::Epsilon;
        let eoi: Symbol<DemoKind> = Symbol::Eoi;

        assert!(terminal.is_terminal());
        assert!(!terminal.is_non_terminal());
        assert!(non_term.is_non_terminal());
        assert!(eps.is_epsilon());
        assert!(eoi.is_eoi());
        assert!(!eoi.is_macro());
    }

    #[test]
    fn test_symbol_value_equality() {
        let a: Symbol<DemoKind> = Symbol::NonTerminal(non_terminal("E"));
        let b: Symbol<DemoKind> = Symbol::NonTerminal(non_terminal("E"));
        let c: Symbol<DemoKind> = Symbol::NonTerminal(non_terminal("T"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_symbol_display_glyphs() {
        let eps: Symbol<DemoKind> = Symbol::Epsilon;
        let eoi: Symbol<DemoKind> = Symbol::Eoi;
        assert_eq!(format!("{eps}"), "ε");
        assert_eq!(format!("{eoi}"), "$");
    }

    #[test]
    fn test_macro_symbol_is_macro() {
        let body = Sentence::new([Symbol::Terminal(ident())]);
        let optional = MacroSymbol::optional(body).unwrap();
        let symbol: Symbol<DemoKind> = Symbol::Macro(optional);
        assert!(symbol.is_macro());
        assert!(symbol.as_macro().is_some());
    }
}
