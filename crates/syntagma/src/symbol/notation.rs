//! Notation styles for rendering symbols, sentences, and productions.

use crate::symbol::Symbol;
use crate::token::TokenKind;

pub(crate) const EPSILON_GLYPH: &str = "ε";
pub(crate) const EOI_GLYPH: &str = "$";

/// The four supported notation styles.
///
/// - `Sentential`: bare names, `E -> T + E`, macros as `[..]` / `{..}` / `(..|..)`
/// - `Bnf`: angle-bracketed non-terminals and `::=`, `<E> ::= <T> "+" <E>`
/// - `Ebnf`: `E = T "+" E ;` with native `[..]` / `{..}` option and repetition
/// - `EbnfKleene`: like `Ebnf` but with `?` and `*` suffixes instead of brackets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NotationStyle {
    #[default]
    Sentential,
    Bnf,
    Ebnf,
    EbnfKleene,
}

/// Rendering in a chosen [`NotationStyle`].
///
/// `Display` implementations throughout the crate delegate to the sentential
/// style.
pub trait Notation {
    /// Append the rendering of `self` to `out`.
    fn render_into(&self, style: NotationStyle, out: &mut String);

    /// Render `self` to a fresh string.
    fn render(&self, style: NotationStyle) -> String {
        let mut out = String::new();
        self.render_into(style, &mut out);
        out
    }
}

/// Render `symbols` space-separated into `out`. An empty slice renders as the
/// epsilon glyph.
pub(crate) fn join_symbols<K: TokenKind>(
    symbols: &[Symbol<K>],
    style: NotationStyle,
    out: &mut String,
) {
    if symbols.is_empty() {
        out.push_str(EPSILON_GLYPH);
        return;
    }
    for (index, symbol) in symbols.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        symbol.render_into(style, out);
    }
}
