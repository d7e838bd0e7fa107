//! Table-driven LR(1) parsing.

use compact_str::{CompactString, format_compact};
use thiserror::Error;

use crate::lr::table::{Lr1Action, Lr1ParsingTable};
use crate::render::TreeView;
use crate::symbol::NonTerminal;
use crate::token::{Token, TokenKind};

/// A parse tree produced by [`parse`].
///
/// Leaves carry the shifted tokens; nodes carry the head of the reduced
/// production, children in body order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree<K> {
    Leaf(Token<K>),
    Node {
        non_terminal: NonTerminal,
        children: Vec<ParseTree<K>>,
    },
}

impl<K: TokenKind> ParseTree<K> {
    /// The node's non-terminal, `None` for leaves.
    #[must_use]
    pub const fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Self::Node { non_terminal, .. } => Some(non_terminal),
            Self::Leaf(_) => None,
        }
    }

    /// The shifted token, `None` for nodes.
    #[must_use]
    pub const fn token(&self) -> Option<&Token<K>> {
        match self {
            Self::Leaf(token) => Some(token),
            Self::Node { .. } => None,
        }
    }

    /// Child trees, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[ParseTree<K>] {
        match self {
            Self::Leaf(_) => &[],
            Self::Node { children, .. } => children,
        }
    }
}

impl<K: TokenKind> TreeView for ParseTree<K> {
    fn label(&self) -> CompactString {
        match self {
            Self::Leaf(token) => format_compact!("{token}"),
            Self::Node { non_terminal, .. } => non_terminal.name().into(),
        }
    }

    fn children(&self) -> Vec<&dyn TreeView> {
        match self {
            Self::Leaf(_) => Vec::new(),
            Self::Node { children, .. } => children
                .iter()
                .map(|child| child as &dyn TreeView)
                .collect(),
        }
    }
}

/// Errors raised by the parse driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError<K: TokenKind> {
    /// The current state has no action for the current token.
    #[error("unexpected token `{token}` at position {position} in state {state}")]
    UnexpectedToken {
        position: usize,
        token: Token<K>,
        state: usize,
    },

    /// Input ran out while the state still expected more.
    #[error("unexpected end of input in state {state}")]
    UnexpectedEndOfInput { state: usize },

    /// A reduce action referenced a production index the table lacks.
    #[error("reduce action references unknown production {index}")]
    UnknownProduction { index: usize },

    /// No goto column for a freshly reduced non-terminal.
    #[error("no goto from state {state} over `{non_terminal}`")]
    MissingGoto {
        state: usize,
        non_terminal: NonTerminal,
    },

    /// The table produced an action that cannot apply at this point.
    #[error("state {state} produced unusable action {action}")]
    UnexpectedAction { state: usize, action: Lr1Action },

    /// A reduction asked for more frames than the stack holds.
    #[error("parse stack underflow in state {state}")]
    StackUnderflow { state: usize },
}

/// The driver's stack: state ids interleaved with the trees built so far.
///
/// The bottom frame pins state 0 and carries no tree; every later frame
/// holds the state entered and the leaf or node that moved the automaton
/// there.
#[derive(Debug, Clone)]
pub struct Lr1Stack<K> {
    frames: Vec<(usize, Option<ParseTree<K>>)>,
}

impl<K: TokenKind> Lr1Stack<K> {
    /// A stack sitting in state 0 with no trees.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![(0, None)],
        }
    }

    /// The state on top.
    #[must_use]
    pub fn current_state(&self) -> usize {
        self.frames.last().map_or(0, |frame| frame.0)
    }

    /// Number of frames above the bottom.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Enter `state`, carrying the tree that moved the automaton there.
    pub fn push(&mut self, state: usize, tree: ParseTree<K>) {
        self.frames.push((state, Some(tree)));
    }

    /// Pop one frame per body symbol, returning the trees in body order.
    fn pop_children(
        &mut self,
        count: usize,
        state: usize,
    ) -> Result<Vec<ParseTree<K>>, ParseError<K>> {
        let mut children = Vec::with_capacity(count);
        for _ in 0..count {
            match self.frames.pop() {
                Some((_, Some(tree))) => children.push(tree),
                Some(bottom) => {
                    self.frames.push(bottom);
                    return Err(ParseError::StackUnderflow { state });
                }
                None => return Err(ParseError::StackUnderflow { state }),
            }
        }
        children.reverse();
        Ok(children)
    }
}

impl<K: TokenKind> Default for Lr1Stack<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `tokens` with `table`, producing the tree for the start symbol.
///
/// The classic driver loop: shift on terminals, reduce by popping one frame
/// per body symbol, goto on the reduced head, accept when the augmented
/// production completes on end of input. A synthetic augmentation wraps the
/// real start symbol in one extra node; that wrapper is unwrapped before the
/// tree is returned.
pub fn parse<K: TokenKind>(
    table: &Lr1ParsingTable<K>,
    tokens: &[Token<K>],
) -> Result<ParseTree<K>, ParseError<K>> {
    let mut stack = Lr1Stack::new();
    let mut position = 0;

    loop {
        let state = stack.current_state();
        let action = match tokens.get(position) {
            Some(token) => table.action_for_token(state, token).ok_or_else(|| {
                ParseError::UnexpectedToken {
                    position,
                    token: token.clone(),
                    state,
                }
            })?,
            None => table
                .action_for_eoi(state)
                .ok_or(ParseError::UnexpectedEndOfInput { state })?,
        };

        match action {
            Lr1Action::Shift(next) => {
                let Some(token) = tokens.get(position) else {
                    return Err(ParseError::UnexpectedAction { state, action });
                };
                stack.push(next, ParseTree::Leaf(token.clone()));
                position += 1;
            }
            Lr1Action::Reduce(index) => {
                let production = table
                    .production(index)
                    .ok_or(ParseError::UnknownProduction { index })?;
                let children = stack.pop_children(production.body().len(), state)?;
                let head = production.head().clone();
                let node = ParseTree::Node {
                    non_terminal: head.clone(),
                    children,
                };
                let landing = stack.current_state();
                match table.action_for_non_terminal(landing, &head) {
                    Some(Lr1Action::Goto(next)) => stack.push(next, node),
                    Some(other) => {
                        return Err(ParseError::UnexpectedAction {
                            state: landing,
                            action: other,
                        });
                    }
                    None => {
                        return Err(ParseError::MissingGoto {
                            state: landing,
                            non_terminal: head,
                        });
                    }
                }
            }
            Lr1Action::Accept => {
                let augmentation = table.augmentation();
                let rule = augmentation.rule();
                let mut children = stack.pop_children(rule.body().len(), state)?;
                if augmentation.is_synthetic()
                    && children.len() == 1
                    && let Some(child) = children.pop()
                {
                    return Ok(child);
                }
                return Ok(ParseTree::Node {
                    non_terminal: rule.head().clone(),
                    children,
                });
            }
            Lr1Action::Goto(_) => {
                return Err(ParseError::UnexpectedAction { state, action });
            }
        }
    }
}
