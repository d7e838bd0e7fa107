//! Parsing-table summaries.

use std::fmt::Write;

use syntagma::testing::DemoKind;
use syntagma::{Lr1ParsingTable, Notation, NotationStyle, PipelineReport};

/// A plain-text summary of one table: the production array, then every
/// populated cell per state, sorted by key.
#[must_use]
pub fn table_summary(table: &Lr1ParsingTable<DemoKind>) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{} state(s), {} production(s)",
        table.state_count(),
        table.productions().len()
    )
    .unwrap();

    writeln!(out).unwrap();
    for (index, production) in table.productions().iter().enumerate() {
        writeln!(
            out,
            "  [{index}] {}",
            production.render(NotationStyle::Sentential)
        )
        .unwrap();
    }

    for state in 0..table.state_count() {
        writeln!(out).unwrap();
        writeln!(out, "state {state}").unwrap();
        let mut cells: Vec<(String, String)> = table
            .actions(state)
            .map(|(key, action)| (format!("{key}"), format!("{action}")))
            .collect();
        cells.sort();
        for (key, action) in cells {
            writeln!(out, "  {key:>12}  {action}").unwrap();
        }
    }
    out
}

/// A plain-text rendering of a pipeline run: one line per stage, the staged
/// operations indented under it.
#[must_use]
pub fn report_summary(report: &PipelineReport<DemoKind>) -> String {
    format!("{report}\n")
}
