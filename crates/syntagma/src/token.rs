//! # Token Boundary
//!
//! The grammar core never scans source text itself. Tokens arrive from an
//! external front-end as an ordered sequence of [`Token`] values, and the only
//! point where the core invokes a tokenizer is when a [`Terminal`] is
//! bootstrapped from a literal string.
//!
//! [`Terminal`]: crate::symbol::Terminal

use compact_str::CompactString;

/// Trait for token kind types.
///
/// Implementations are usually small fieldless enums produced by a lexer.
/// `Ord` is required so lookahead and item sets have a canonical order,
/// which keeps state numbering reproducible across runs.
pub trait TokenKind:
    Clone + std::fmt::Debug + std::hash::Hash + Eq + Ord + Send + Sync + 'static
{
    /// Human-readable label for this kind, used in notation rendering and
    /// error messages.
    ///
    /// The default implementation uses Debug formatting.
    fn label(&self) -> CompactString {
        format!("{self:?}").into()
    }
}

/// A single token produced by an external tokenizer: a kind plus the exact
/// source text it covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<K> {
    pub kind: K,
    pub text: CompactString,
}

impl<K: TokenKind> Token<K> {
    /// Create a new token.
    #[must_use]
    pub fn new(kind: K, text: impl Into<CompactString>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// The kind of this token.
    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }

    /// The source text of this token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<K: TokenKind> std::fmt::Display for Token<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind.label())
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// The tokenizer contract the core consumes.
///
/// A tokenizer turns a string into a finite token sequence. The core calls it
/// exactly once per literal-backed terminal, to infer the terminal's token
/// kind from its literal text.
pub trait Tokenizer<K: TokenKind> {
    /// Error produced when the input cannot be tokenized.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Tokenize `text` into an ordered token sequence.
    fn tokenize(&self, text: &str) -> Result<Vec<Token<K>>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DemoKind, DemoTokenizer};

    #[test]
    fn test_token_display_prefers_text() {
        let token = Token::new(DemoKind::Ident, "total");
        assert_eq!(format!("{token}"), "total");
    }

    #[test]
    fn test_token_display_falls_back_to_label() {
        let token = Token::new(DemoKind::Plus, "");
        assert_eq!(format!("{token}"), "Plus");
    }

    #[test]
    fn test_tokenizer_splits_on_whitespace() {
        let tokens = DemoTokenizer.tokenize("a + 12").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| *t.kind()).collect();
        assert_eq!(kinds, vec![DemoKind::Ident, DemoKind::Plus, DemoKind::Number]);
    }
}
