//! Syntagma Tools CLI
//!
//! Renders the built-in demo grammars as production trees, derivation and
//! LR(1) state graphs (DOT), and parsing-table summaries.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use syntagma::{GraphBuilder, Pipeline, render_tree};
use syntagma_tools::cli::{Cli, Commands};
use syntagma_tools::dot::{derivation_dot, state_graph_dot};
use syntagma_tools::summary::{report_summary, table_summary};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tree {
            grammar,
            pipeline,
            output,
        } => {
            let mut set = grammar.build();
            if pipeline {
                Pipeline::standard().run(&mut set)?;
            }
            let root = GraphBuilder::new(&set).build()?;
            emit(output, &format!("{}\n", render_tree(&root)))
        }
        Commands::Graph {
            grammar,
            pipeline,
            output,
        } => {
            let mut set = grammar.build();
            if pipeline {
                Pipeline::standard().run(&mut set)?;
            }
            emit(output, &derivation_dot(&set))
        }
        Commands::States { grammar, output } => {
            let mut set = grammar.build();
            let table = Pipeline::standard().build_table(&mut set)?;
            emit(output, &state_graph_dot(&table))
        }
        Commands::Table {
            grammar,
            report,
            output,
        } => {
            let mut set = grammar.build();
            let pipeline = Pipeline::standard();
            let run = pipeline.run(&mut set)?;
            set.augment()?;
            let table = syntagma::Lr1ParsingTable::build(&set)?;

            let mut content = String::new();
            if report {
                content.push_str(&report_summary(&run));
                content.push('\n');
            }
            content.push_str(&table_summary(&table));
            emit(output, &content)
        }
    }
}

fn emit(output: Option<PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(&path, content)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
