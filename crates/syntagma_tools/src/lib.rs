//! Syntagma Tools - inspection utilities for syntagma grammars
//!
//! This crate renders grammars and their LR(1) artifacts for debugging:
//! ASCII production trees, DOT derivation graphs, DOT state graphs, and
//! parsing-table summaries.

pub mod cli;
pub mod demos;
pub mod dot;
pub mod summary;
