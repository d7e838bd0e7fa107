//! Non-terminal symbols.

use std::collections::BTreeSet;

use compact_str::{CompactString, format_compact};

use crate::symbol::notation::{EPSILON_GLYPH, Notation, NotationStyle};
use crate::symbol::SymbolError;

/// A non-terminal symbol, identified by name.
///
/// Names are validated on construction: non-empty, no whitespace, and not the
/// epsilon notation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminal {
    name: CompactString,
}

impl NonTerminal {
    /// Create a non-terminal with a validated name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, SymbolError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(SymbolError::EmptyName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(SymbolError::WhitespaceInName { name: name.into() });
        }
        if name == EPSILON_GLYPH {
            return Err(SymbolError::ReservedName { name: name.into() });
        }
        Ok(Self { name: name.into() })
    }

    /// The name of this non-terminal.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A fresh primed non-terminal derived from this one.
    ///
    /// Appends apostrophes until the result is absent from `taken`. Used when
    /// factoring, repetition expansion, or augmentation needs a new head that
    /// cannot collide with an existing one.
    #[must_use]
    pub fn derived(&self, taken: &BTreeSet<NonTerminal>) -> NonTerminal {
        let mut candidate = Self {
            name: format_compact!("{}'", self.name),
        };
        while taken.contains(&candidate) {
            candidate.name.push('\'');
        }
        candidate
    }
}

impl Notation for NonTerminal {
    fn render_into(&self, style: NotationStyle, out: &mut String) {
        match style {
            NotationStyle::Bnf => {
                out.push('<');
                out.push_str(&self.name);
                out.push('>');
            }
            _ => out.push_str(&self.name),
        }
    }
}

impl std::fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
