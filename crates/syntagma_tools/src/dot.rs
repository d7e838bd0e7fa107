//! DOT/Graphviz emission.

use std::fmt::Write;

use syntagma::testing::DemoKind;
use syntagma::{Lr1Action, Lr1ParsingTable, Notation, NotationStyle, ProductionSet, Symbol};

/// DOT rendering of a grammar's derivation structure: one ellipse per
/// non-terminal, one filled box per terminal, an edge per body occurrence.
#[must_use]
pub fn derivation_dot(set: &ProductionSet<DemoKind>) -> String {
    let mut out = String::new();
    writeln!(out, "digraph Grammar {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out, "  node [shape=box];").unwrap();
    writeln!(out).unwrap();

    for non_terminal in set.non_terminals() {
        let shape = if set.start() == Some(&non_terminal) {
            "doubleoctagon"
        } else {
            "ellipse"
        };
        writeln!(
            out,
            "  \"{}\" [shape={shape}];",
            escape(non_terminal.name())
        )
        .unwrap();
    }
    writeln!(out).unwrap();

    let mut terminals = std::collections::BTreeSet::new();
    for rule in set.rules() {
        let head = escape(rule.head().name());
        for symbol in rule.body().symbols() {
            match symbol {
                Symbol::NonTerminal(inner) => {
                    writeln!(out, "  \"{head}\" -> \"{}\";", escape(inner.name())).unwrap();
                }
                Symbol::Terminal(terminal) => {
                    let label = terminal.render(NotationStyle::Sentential);
                    writeln!(
                        out,
                        "  \"{head}\" -> \"{}\" [style=dashed];",
                        escape(&label)
                    )
                    .unwrap();
                    terminals.insert(label);
                }
                _ => {}
            }
        }
    }

    writeln!(out).unwrap();
    writeln!(out, "  // Terminals").unwrap();
    for terminal in terminals {
        writeln!(
            out,
            "  \"{}\" [style=filled, fillcolor=lightblue];",
            escape(&terminal)
        )
        .unwrap();
    }
    writeln!(out, "}}").unwrap();
    out
}

/// DOT rendering of the LR(1) automaton behind a parsing table: one node per
/// state, one labelled edge per shift or goto, the accepting state doubled.
#[must_use]
pub fn state_graph_dot(table: &Lr1ParsingTable<DemoKind>) -> String {
    let mut out = String::new();
    writeln!(out, "digraph Automaton {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out, "  node [shape=circle];").unwrap();
    writeln!(out).unwrap();

    for state in 0..table.state_count() {
        let accepting = table.action_for_eoi(state) == Some(Lr1Action::Accept);
        let shape = if accepting { "doublecircle" } else { "circle" };
        writeln!(out, "  {state} [shape={shape}];").unwrap();
    }
    writeln!(out).unwrap();

    for state in 0..table.state_count() {
        let mut edges: Vec<(String, usize, bool)> = table
            .actions(state)
            .filter_map(|(key, action)| match action {
                Lr1Action::Shift(next) => Some((format!("{key}"), next, false)),
                Lr1Action::Goto(next) => Some((format!("{key}"), next, true)),
                Lr1Action::Reduce(_) | Lr1Action::Accept => None,
            })
            .collect();
        edges.sort();
        for (label, next, is_goto) in edges {
            let style = if is_goto { " style=dashed" } else { "" };
            writeln!(
                out,
                "  {state} -> {next} [label=\"{}\"{style}];",
                escape(&label)
            )
            .unwrap();
        }
    }
    writeln!(out, "}}").unwrap();
    out
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::Demo;
    use syntagma::Pipeline;

    #[test]
    fn test_derivation_dot_names_every_head() {
        let set = Demo::Arithmetic.build();
        let dot = derivation_dot(&set);
        assert!(dot.starts_with("digraph Grammar {"));
        for name in ["E", "T", "F"] {
            assert!(dot.contains(&format!("\"{name}\"")), "missing {name}");
        }
        assert!(dot.contains("\"E\" -> \"T\";"));
    }

    #[test]
    fn test_state_graph_dot_marks_the_accepting_state() {
        let mut set = Demo::Tiny.build();
        let table = Pipeline::standard().build_table(&mut set).expect("table");
        let dot = state_graph_dot(&table);
        assert!(dot.contains("doublecircle"));
        assert!(dot.contains("0 -> 1"));
    }
}
