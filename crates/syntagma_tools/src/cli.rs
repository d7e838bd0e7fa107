//! CLI interface for syntagma-tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::demos::Demo;

#[derive(Parser)]
#[command(name = "syntagma-viz")]
#[command(about = "Grammar inspection tool for syntagma")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a demo grammar as an ASCII production tree
    Tree {
        /// Demo grammar to render
        #[arg(short, long, value_enum)]
        grammar: Demo,

        /// Run the standard pipeline before rendering
        #[arg(short, long)]
        pipeline: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Emit the derivation graph as DOT
    Graph {
        #[arg(short, long, value_enum)]
        grammar: Demo,

        #[arg(short, long)]
        pipeline: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Emit the LR(1) state graph as DOT
    States {
        #[arg(short, long, value_enum)]
        grammar: Demo,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a parsing-table summary
    Table {
        #[arg(short, long, value_enum)]
        grammar: Demo,

        /// Also print the pipeline's transformation trail
        #[arg(short, long)]
        report: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
