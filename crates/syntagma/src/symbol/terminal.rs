//! Terminal symbols.

use compact_str::CompactString;

use crate::symbol::notation::{Notation, NotationStyle};
use crate::symbol::SymbolError;
use crate::token::{Token, TokenKind, Tokenizer};

/// A terminal symbol: a token kind, optionally narrowed to one exact literal.
///
/// A kind-only terminal matches every token of its kind. A literal-backed
/// terminal matches only tokens whose text equals the literal, which is how
/// keywords and punctuation are told apart from the broader kind they share.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Terminal<K> {
    kind: K,
    literal: Option<CompactString>,
}

impl<K: TokenKind> Terminal<K> {
    /// A terminal matching every token of `kind`.
    #[must_use]
    pub const fn of_kind(kind: K) -> Self {
        Self {
            kind,
            literal: None,
        }
    }

    /// A terminal backed by an exact literal.
    ///
    /// The literal is tokenized to infer its kind. The literal must be
    /// non-empty and must tokenize to exactly one token; anything else is a
    /// construction error.
    pub fn from_literal<T>(literal: &str, tokenizer: &T) -> Result<Self, SymbolError>
    where
        T: Tokenizer<K>,
    {
        if literal.is_empty() {
            return Err(SymbolError::EmptyLiteral);
        }
        let tokens = tokenizer
            .tokenize(literal)
            .map_err(|source| SymbolError::Tokenize {
                literal: literal.into(),
                source: Box::new(source),
            })?;
        match tokens.as_slice() {
            [token] => Ok(Self {
                kind: token.kind().clone(),
                literal: Some(literal.into()),
            }),
            _ => Err(SymbolError::AmbiguousLiteral {
                literal: literal.into(),
                count: tokens.len(),
            }),
        }
    }

    /// A literal-backed terminal whose kind is already known.
    pub(crate) fn with_literal(kind: K, literal: impl Into<CompactString>) -> Self {
        Self {
            kind,
            literal: Some(literal.into()),
        }
    }

    /// The token kind this terminal matches.
    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }

    /// The exact literal, when this terminal is literal-backed.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    /// Whether `token` is matched by this terminal.
    #[must_use]
    pub fn matches(&self, token: &Token<K>) -> bool {
        if self.kind != *token.kind() {
            return false;
        }
        self.literal.as_ref().is_none_or(|literal| literal == token.text())
    }
}

impl<K: TokenKind> Notation for Terminal<K> {
    fn render_into(&self, style: NotationStyle, out: &mut String) {
        match (&self.literal, style) {
            (Some(literal), NotationStyle::Sentential) => out.push_str(literal),
            (Some(literal), _) => {
                out.push('"');
                out.push_str(literal);
                out.push('"');
            }
            (None, _) => out.push_str(&self.kind.label()),
        }
    }
}

impl<K: TokenKind> std::fmt::Display for Terminal<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(NotationStyle::Sentential))
    }
}
