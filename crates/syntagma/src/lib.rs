//! # Syntagma
//!
//! Context-free grammar analysis, transformation, and LR(1) parsing-table
//! construction.
//!
//! ## Overview
//!
//! Syntagma takes a programmatically built grammar and turns it into an LR(1)
//! parsing table, with every rewrite along the way recorded as a reversible
//! operation log. It provides:
//!
//! - **Symbol model**: terminals, non-terminals, epsilon, end-of-input, and
//!   macro symbols (optional, repetition, alternation) with four notation
//!   rendering styles
//! - **Transformation engine**: named, reversible grammar rewrites (macro
//!   expansion, duplicate removal, unreachable removal, unit expansion,
//!   left-recursion removal, left factoring)
//! - **LR(1) engine**: item-set closure, state-graph construction with global
//!   kernel deduplication, and table generation with conflict detection
//! - **Driver**: a table-driven shift/reduce loop producing a parse tree
//! - **Rendering**: ASCII trees for production sets and parse trees
//!
//! ## Quick Start
//!
//! ```rust
//! use syntagma::{
//!     GrammarDefinition, NonTerminal, Pipeline, Symbol, Terminal, Token, TokenKind,
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
//! enum Kind {
//!     Number,
//!     Plus,
//! }
//!
//! impl TokenKind for Kind {}
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let expr = NonTerminal::new("Expr")?;
//! let number = Terminal::of_kind(Kind::Number);
//! let plus = Terminal::of_kind(Kind::Plus);
//!
//! // Expr -> Number + Expr | Number
//! let mut set = GrammarDefinition::new(expr.clone())
//!     .rule(
//!         expr.clone(),
//!         [
//!             Symbol::Terminal(number.clone()),
//!             Symbol::Terminal(plus),
//!             Symbol::NonTerminal(expr.clone()),
//!         ],
//!     )
//!     .rule(expr.clone(), [Symbol::Terminal(number)])
//!     .into_set();
//!
//! let table = Pipeline::standard().build_table(&mut set)?;
//!
//! let tokens = vec![
//!     Token::new(Kind::Number, "1"),
//!     Token::new(Kind::Plus, "+"),
//!     Token::new(Kind::Number, "2"),
//! ];
//! let tree = syntagma::parse(&table, &tokens)?;
//! assert_eq!(tree.non_terminal().map(NonTerminal::name), Some("Expr"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`token`] - Token kinds and the tokenizer boundary
//! - [`symbol`] - Grammar symbols and notation rendering
//! - [`rule`] - Sentences, production rules, and production sets
//! - [`transform`] - Reversible grammar transformations
//! - [`analysis`] - Nullability, first sets, and recursion detection
//! - [`lr`] - LR(1) items, states, tables, and the parse driver
//! - [`render`] - ASCII tree rendering
//! - [`pipeline`] - Transformation chains ending in a parsing table
//! - [`error`] - Error types

pub mod analysis;
pub mod error;
pub mod lr;
pub mod pipeline;
pub mod render;
pub mod rule;
pub mod symbol;
pub mod testing;
pub mod token;
pub mod transform;

// Re-export commonly used types
pub use analysis::{GrammarAnalysis, RecursionBranch, RecursionKind, find_left_recursion};
pub use error::Error;
pub use lr::{
    Lr1Action, Lr1Automaton, Lr1Error, Lr1Item, Lr1ParsingTable, Lr1Stack, Lr1State,
    LookaheadSymbol, ParseError, ParseTree, TableKey, parse,
};
pub use pipeline::{Pipeline, PipelineReport, StageReport};
pub use render::{GraphBuilder, GraphNode, TreeView, render_tree};
pub use rule::{Augmentation, GrammarDefinition, ProductionRule, ProductionSet, Sentence};
pub use symbol::{
    MacroSymbol, NonTerminal, Notation, NotationStyle, Symbol, SymbolError, Terminal,
};
pub use token::{Token, TokenKind, Tokenizer};
pub use transform::{
    DuplicateRemoval, GrammarTransform, LeftFactoring, LeftRecursionRemoval, MacroExpansion,
    SetOperation, SetTransformation, TransformError, TransformationBuilder, UnitExpansion,
    UnreachableRemoval,
};
