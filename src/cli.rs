use std::path::PathBuf;

use clap::{Parser, Subcommand};

use di_graph::output::OutputFormat;

/// Captive-dependency analyzer for DI-container codebases.
///
/// di-graph builds a project-scoped registration graph from an extracted
/// code model and reports lifetime mismatches without running the app.
#[derive(Parser, Debug)]
#[command(
    name = "di-graph",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dependency graph from a model file and print run statistics.
    Analyze {
        /// Path to the extracted model file (JSON).
        model: PathBuf,

        /// Output the summary as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },

    /// Report captive dependencies: longer-lived consumers holding
    /// shorter-lived dependencies.
    Mismatches {
        /// Path to the extracted model file (JSON).
        model: PathBuf,

        /// Restrict the report to one project.
        #[arg(long)]
        project: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Render the dependency tree (or, with --consumers, the consumer tree)
    /// of a class. Cycles are marked and terminated; unregistered requests
    /// appear as warning leaves.
    Tree {
        /// Class name, canonical or simple (e.g. "OrderProcessor").
        class: String,

        /// Path to the extracted model file (JSON).
        model: PathBuf,

        /// Restrict the lookup to one project.
        #[arg(long)]
        project: Option<String>,

        /// Walk DependedOnBy instead of DependsOn.
        #[arg(long)]
        consumers: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },
}
