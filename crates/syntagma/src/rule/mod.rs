//! # Production Model
//!
//! Sentences, production rules, and the mutable [`ProductionSet`] that the
//! transformation engine and the LR(1) construction operate on.

mod production;
mod sentence;
mod set;

pub use production::ProductionRule;
pub use sentence::Sentence;
pub use set::{Augmentation, GrammarDefinition, ProductionSet};
