//! # Error Types
//!
//! The umbrella [`Error`] plus re-exports of the per-layer enums.
//!
//! Each layer of the crate raises its own error type: symbol construction
//! raises [`SymbolError`], transformations raise [`TransformError`], the
//! LR(1) engine raises [`Lr1Error`], and the parse driver raises
//! [`ParseError`]. [`Error`] folds them together for callers composing the
//! whole pipeline. Every error is fatal; nothing is recovered locally.

use thiserror::Error as ThisError;

pub use crate::lr::{Lr1Error, ParseError};
pub use crate::symbol::SymbolError;
pub use crate::transform::TransformError;

use crate::token::TokenKind;

/// Any error the grammar pipeline can raise.
#[derive(Debug, ThisError)]
pub enum Error<K: TokenKind> {
    /// Malformed symbol construction.
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// A grammar transformation failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// LR(1) state or table construction failed.
    #[error(transparent)]
    Lr1(#[from] Lr1Error<K>),

    /// The parse driver rejected its input.
    #[error(transparent)]
    Parse(#[from] ParseError<K>),
}
