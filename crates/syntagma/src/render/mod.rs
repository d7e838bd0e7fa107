//! # Rendering
//!
//! Debugging views of grammars and parse results.
//!
//! ## Overview
//!
//! - [`GraphBuilder`] unfolds a [`ProductionSet`] into a [`GraphNode`] tree
//!   rooted at the start symbol, cutting repetition on each path
//! - [`TreeView`] is the small label-plus-children trait the ASCII renderer
//!   consumes; [`GraphNode`] and [`ParseTree`](crate::lr::ParseTree)
//!   implement it
//! - [`render_tree`] lays a [`TreeView`] out with box-drawing connectors
//!
//! None of this carries correctness: the views exist so a grammar author can
//! look at what the transformations and the parser actually produced.
//!
//! [`ProductionSet`]: crate::rule::ProductionSet

mod ascii;
mod graph;

pub use ascii::{TreeView, render_tree};
pub use graph::{GraphBuilder, GraphNode};
