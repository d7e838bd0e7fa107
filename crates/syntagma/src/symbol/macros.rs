//! Macro symbols: optional, repetition, and alternation shorthands.

use smallvec::{SmallVec, smallvec};

use crate::rule::Sentence;
use crate::symbol::notation::{Notation, NotationStyle};
use crate::symbol::{NonTerminal, Symbol, SymbolError};
use crate::token::TokenKind;

/// A macro symbol standing for a set of alternative bodies.
///
/// Macro bodies are themselves macro-free; this is enforced at construction
/// and is what guarantees macro expansion terminates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MacroSymbol<K> {
    /// Zero or one occurrence of the body.
    Optional(Box<Sentence<K>>),
    /// Zero or more occurrences of the body.
    Repetition(Box<Sentence<K>>),
    /// Exactly one of the alternatives.
    Alternation(Vec<Sentence<K>>),
}

impl<K: TokenKind> MacroSymbol<K> {
    /// An optional occurrence of `body`.
    pub fn optional(body: Sentence<K>) -> Result<Self, SymbolError> {
        Self::check_body(&body)?;
        Ok(Self::Optional(Box::new(body)))
    }

    /// Zero or more occurrences of `body`.
    pub fn repetition(body: Sentence<K>) -> Result<Self, SymbolError> {
        Self::check_body(&body)?;
        Ok(Self::Repetition(Box::new(body)))
    }

    /// One of at least two `alternatives`. An empty alternative stands for
    /// epsilon.
    pub fn alternation(
        alternatives: impl IntoIterator<Item = Sentence<K>>,
    ) -> Result<Self, SymbolError> {
        let alternatives: Vec<_> = alternatives.into_iter().collect();
        if alternatives.len() < 2 {
            return Err(SymbolError::TooFewAlternatives {
                count: alternatives.len(),
            });
        }
        for alternative in &alternatives {
            if alternative.contains_macro() {
                return Err(SymbolError::NestedMacro);
            }
        }
        Ok(Self::Alternation(alternatives))
    }

    fn check_body(body: &Sentence<K>) -> Result<(), SymbolError> {
        if body.is_empty() {
            return Err(SymbolError::EmptyMacroBody);
        }
        if body.contains_macro() {
            return Err(SymbolError::NestedMacro);
        }
        Ok(())
    }

    /// True for the optional variant.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// True for the repetition variant.
    #[must_use]
    pub const fn is_repetition(&self) -> bool {
        matches!(self, Self::Repetition(_))
    }

    /// True for the alternation variant.
    #[must_use]
    pub const fn is_alternation(&self) -> bool {
        matches!(self, Self::Alternation(_))
    }

    /// The body sentences contained in this macro.
    pub fn sentences(&self) -> std::slice::Iter<'_, Sentence<K>> {
        match self {
            Self::Optional(body) | Self::Repetition(body) => std::slice::from_ref(&**body).iter(),
            Self::Alternation(alternatives) => alternatives.iter(),
        }
    }

    /// The alternative bodies this macro stands for.
    ///
    /// `head` is the non-terminal the alternatives will be attached to. Only
    /// the repetition variant uses it: `{β}` expands under a fresh helper
    /// head `H` into `β H` and `ε`, so the helper can recurse.
    #[must_use]
    pub fn expand(&self, head: &NonTerminal) -> SmallVec<[Sentence<K>; 2]> {
        match self {
            Self::Optional(body) => smallvec![(**body).clone(), Sentence::empty()],
            Self::Repetition(body) => smallvec![
                body.with_appended(Symbol::NonTerminal(head.clone())),
                Sentence::empty(),
            ],
            Self::Alternation(alternatives) => alternatives.iter().cloned().collect(),
        }
    }
}

impl<K: TokenKind> Notation for MacroSymbol<K> {
    fn render_into(&self, style: NotationStyle, out: &mut String) {
        match (self, style) {
            (Self::Optional(body), NotationStyle::EbnfKleene) => {
                render_suffixed(body, '?', style, out);
            }
            (Self::Repetition(body), NotationStyle::EbnfKleene) => {
                render_suffixed(body, '*', style, out);
            }
            (Self::Optional(body), _) => {
                out.push('[');
                body.render_into(style, out);
                out.push(']');
            }
            (Self::Repetition(body), _) => {
                out.push('{');
                body.render_into(style, out);
                out.push('}');
            }
            (Self::Alternation(alternatives), _) => {
                out.push('(');
                for (index, alternative) in alternatives.iter().enumerate() {
                    if index > 0 {
                        out.push_str(" | ");
                    }
                    alternative.render_into(style, out);
                }
                out.push(')');
            }
        }
    }
}

fn render_suffixed<K: TokenKind>(
    body: &Sentence<K>,
    suffix: char,
    style: NotationStyle,
    out: &mut String,
) {
    if body.len() == 1 {
        body.render_into(style, out);
    } else {
        out.push('(');
        body.render_into(style, out);
        out.push(')');
    }
    out.push(suffix);
}

impl<K: TokenKind> std::fmt::Display for MacroSymbol<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(NotationStyle::Sentential))
    }
}
