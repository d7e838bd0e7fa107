//! Sentences: ordered symbol sequences forming production bodies.

use smallvec::SmallVec;

use crate::symbol::notation::join_symbols;
use crate::symbol::{NonTerminal, Notation, NotationStyle, Symbol};
use crate::token::TokenKind;

/// An immutable, possibly-empty symbol sequence.
///
/// Epsilon symbols are filtered out on construction: the empty sentence is
/// the epsilon body, and no sentence ever stores `Epsilon` next to other
/// symbols. Equality is sequence equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sentence<K> {
    symbols: SmallVec<[Symbol<K>; 4]>,
}

impl<K: TokenKind> Sentence<K> {
    /// Build a sentence from symbols, dropping any epsilon symbols.
    #[must_use]
    pub fn new(symbols: impl IntoIterator<Item = Symbol<K>>) -> Self {
        Self {
            symbols: symbols
                .into_iter()
                .filter(|symbol| !symbol.is_epsilon())
                .collect(),
        }
    }

    /// The empty sentence, standing for epsilon.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            symbols: SmallVec::new(),
        }
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when this sentence is the epsilon body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbols as a slice.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol<K>] {
        &self.symbols
    }

    /// The symbol at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol<K>> {
        self.symbols.get(index)
    }

    /// The first symbol, if any.
    #[must_use]
    pub fn first_symbol(&self) -> Option<&Symbol<K>> {
        self.symbols.first()
    }

    /// Iterate over the symbols.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol<K>> {
        self.symbols.iter()
    }

    /// True when any symbol is a macro.
    #[must_use]
    pub fn contains_macro(&self) -> bool {
        self.symbols.iter().any(Symbol::is_macro)
    }

    /// True when `non_terminal` occurs anywhere in the sentence, including
    /// inside macro bodies.
    #[must_use]
    pub fn contains_non_terminal(&self, non_terminal: &NonTerminal) -> bool {
        self.symbols.iter().any(|symbol| match symbol {
            Symbol::NonTerminal(candidate) => candidate == non_terminal,
            Symbol::Macro(symbol) => symbol
                .sentences()
                .any(|sentence| sentence.contains_non_terminal(non_terminal)),
            _ => false,
        })
    }

    /// A copy of this sentence with `symbol` appended.
    #[must_use]
    pub fn with_appended(&self, symbol: Symbol<K>) -> Self {
        let mut symbols = self.symbols.clone();
        if !symbol.is_epsilon() {
            symbols.push(symbol);
        }
        Self { symbols }
    }

    /// A copy of this sentence with the symbol at `index` replaced by
    /// `replacement`, spliced in place.
    #[must_use]
    pub fn spliced(&self, index: usize, replacement: &[Symbol<K>]) -> Self {
        let mut symbols = SmallVec::with_capacity(self.symbols.len() + replacement.len());
        symbols.extend(self.symbols[..index].iter().cloned());
        symbols.extend(replacement.iter().filter(|s| !s.is_epsilon()).cloned());
        if index < self.symbols.len() {
            symbols.extend(self.symbols[index + 1..].iter().cloned());
        }
        Self { symbols }
    }

    /// The suffix starting at `index`.
    #[must_use]
    pub fn suffix_from(&self, index: usize) -> Self {
        Self {
            symbols: self.symbols.iter().skip(index).cloned().collect(),
        }
    }
}

impl<K: TokenKind> FromIterator<Symbol<K>> for Sentence<K> {
    fn from_iter<I: IntoIterator<Item = Symbol<K>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, K: TokenKind> IntoIterator for &'a Sentence<K> {
    type Item = &'a Symbol<K>;
    type IntoIter = std::slice::Iter<'a, Symbol<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl<K: TokenKind> Notation for Sentence<K> {
    fn render_into(&self, style: NotationStyle, out: &mut String) {
        join_symbols(&self.symbols, style, out);
    }
}

impl<K: TokenKind> std::fmt::Display for Sentence<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(NotationStyle::Sentential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DemoKind, ident, non_terminal, plus};

    #[test]
    fn test_construction_filters_epsilon() {
        let sentence: Sentence<DemoKind> = Sentence::new([
            Symbol::Epsilon,
            Symbol::Terminal(ident()),
            Symbol::Epsilon,
        ]);
        assert_eq!(sentence.len(), 1);

        let only_epsilon: Sentence<DemoKind> = Sentence::new([Symbol::Epsilon]);
        assert!(only_epsilon.is_empty());
        assert_eq!(only_epsilon, Sentence::empty());
    }

    #[test]
    fn test_sequence_equality() {
        let a: Sentence<DemoKind> =
            Sentence::new([Symbol::Terminal(ident()), Symbol::Terminal(plus())]);
        let b: Sentence<DemoKind> =
            Sentence::new([Symbol::Terminal(ident()), Symbol::Terminal(plus())]);
        let c: Sentence<DemoKind> =
            Sentence::new([Symbol::Terminal(plus()), Symbol::Terminal(ident())]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_spliced_replaces_one_symbol() {
        let sentence: Sentence<DemoKind> = Sentence::new([
            Symbol::Terminal(ident()),
            Symbol::NonTerminal(non_terminal("X")),
            Symbol::Terminal(plus()),
        ]);
        let replacement = [
            Symbol::Terminal(plus()),
            Symbol::Terminal(plus()),
        ];
        let spliced = sentence.spliced(1, &replacement);
        assert_eq!(spliced.len(), 4);
        assert_eq!(spliced.get(1), Some(&Symbol::Terminal(plus())));
        assert_eq!(spliced.get(3), Some(&Symbol::Terminal(plus())));
    }

    #[test]
    fn test_spliced_with_empty_replacement_removes_symbol() {
        let sentence: Sentence<DemoKind> = Sentence::new([
            Symbol::Terminal(ident()),
            Symbol::NonTerminal(non_terminal("X")),
        ]);
        let spliced = sentence.spliced(1, &[]);
        assert_eq!(spliced.len(), 1);
        assert_eq!(spliced.first_symbol(), Some(&Symbol::Terminal(ident())));
    }

    #[test]
    fn test_contains_non_terminal_sees_into_macros() {
        use crate::symbol::MacroSymbol;

        let inner = Sentence::new([Symbol::NonTerminal(non_terminal("X"))]);
        let optional = MacroSymbol::optional(inner).unwrap();
        let sentence: Sentence<DemoKind> = Sentence::new([Symbol::Macro(optional)]);

        assert!(sentence.contains_non_terminal(&non_terminal("X")));
        assert!(!sentence.contains_non_terminal(&non_terminal("Y")));
    }

    #[test]
    fn test_empty_sentence_renders_as_epsilon() {
        let sentence: Sentence<DemoKind> = Sentence::empty();
        assert_eq!(format!("{sentence}"), "ε");
    }
}
