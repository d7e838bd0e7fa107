//! Derivation graphs.

use compact_str::{CompactString, format_compact};

use crate::render::ascii::TreeView;
use crate::rule::{ProductionRule, ProductionSet};
use crate::symbol::{NonTerminal, Notation, NotationStyle, Symbol};
use crate::token::TokenKind;
use crate::transform::TransformError;

/// One node of the derivation graph.
///
/// Non-terminal nodes expand to one production node per rule of that head;
/// production nodes expand to their body symbols. A non-terminal already on
/// the path from the root is not expanded again and becomes a
/// [`Reference`](Self::Reference) leaf instead, which is what keeps the view
/// finite on recursive grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphNode<K> {
    NonTerminal {
        non_terminal: NonTerminal,
        productions: Vec<GraphNode<K>>,
    },
    Production {
        rule: ProductionRule<K>,
        symbols: Vec<GraphNode<K>>,
    },
    Symbol(Symbol<K>),
    Reference(NonTerminal),
}

impl<K: TokenKind> GraphNode<K> {
    /// True for a reference leaf cutting a repeated path.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// The node's non-terminal, for non-terminal and reference nodes.
    #[must_use]
    pub const fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Self::NonTerminal { non_terminal, .. } | Self::Reference(non_terminal) => {
                Some(non_terminal)
            }
            Self::Production { .. } | Self::Symbol(_) => None,
        }
    }

    /// The expanded rule, for production nodes.
    #[must_use]
    pub const fn rule(&self) -> Option<&ProductionRule<K>> {
        match self {
            Self::Production { rule, .. } => Some(rule),
            _ => None,
        }
    }

    /// Child nodes, empty for leaves.
    #[must_use]
    pub fn child_nodes(&self) -> &[GraphNode<K>] {
        match self {
            Self::NonTerminal { productions, .. } => productions,
            Self::Production { symbols, .. } => symbols,
            Self::Symbol(_) | Self::Reference(_) => &[],
        }
    }
}

impl<K: TokenKind> TreeView for GraphNode<K> {
    fn label(&self) -> CompactString {
        match self {
            Self::NonTerminal { non_terminal, .. } => non_terminal.name().into(),
            Self::Production { rule, .. } => {
                format_compact!("{}", rule.render(NotationStyle::Sentential))
            }
            Self::Symbol(symbol) => {
                format_compact!("{}", symbol.render(NotationStyle::Sentential))
            }
            Self::Reference(non_terminal) => format_compact!("{} (ref)", non_terminal.name()),
        }
    }

    fn children(&self) -> Vec<&dyn TreeView> {
        self.child_nodes()
            .iter()
            .map(|child| child as &dyn TreeView)
            .collect()
    }
}

/// Unfolds a production set into a [`GraphNode`] tree rooted at its start
/// symbol.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'set, K> {
    set: &'set ProductionSet<K>,
}

impl<'set, K: TokenKind> GraphBuilder<'set, K> {
    /// A builder over `set`.
    #[must_use]
    pub const fn new(set: &'set ProductionSet<K>) -> Self {
        Self { set }
    }

    /// Build the tree rooted at the set's start symbol.
    pub fn build(&self) -> Result<GraphNode<K>, TransformError> {
        let start = self.set.start().ok_or(TransformError::MissingStart)?;
        let mut path = Vec::new();
        Ok(self.non_terminal_node(start, &mut path))
    }

    /// Build the tree rooted at an arbitrary non-terminal.
    #[must_use]
    pub fn build_from(&self, root: &NonTerminal) -> GraphNode<K> {
        let mut path = Vec::new();
        self.non_terminal_node(root, &mut path)
    }

    fn non_terminal_node(
        &self,
        non_terminal: &NonTerminal,
        path: &mut Vec<NonTerminal>,
    ) -> GraphNode<K> {
        if path.contains(non_terminal) {
            return GraphNode::Reference(non_terminal.clone());
        }
        path.push(non_terminal.clone());
        let productions = self
            .set
            .productions_of(non_terminal)
            .map(|rule| self.production_node(rule, path))
            .collect();
        path.pop();
        GraphNode::NonTerminal {
            non_terminal: non_terminal.clone(),
            productions,
        }
    }

    fn production_node(
        &self,
        rule: &ProductionRule<K>,
        path: &mut Vec<NonTerminal>,
    ) -> GraphNode<K> {
        let symbols = rule
            .body()
            .symbols()
            .iter()
            .map(|symbol| match symbol {
                Symbol::NonTerminal(inner) => self.non_terminal_node(inner, path),
                other => GraphNode::Symbol(other.clone()),
            })
            .collect();
        GraphNode::Production {
            rule: rule.clone(),
            symbols,
        }
    }
}
