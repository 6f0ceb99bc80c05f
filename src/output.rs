use clap::ValueEnum;
use petgraph::visit::IntoEdgeReferences;
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::graph::node::EdgeKind;
use crate::query::mismatch::MismatchRecord;
use crate::query::tree::TreeNode;

/// Output format for query results.
#[derive(Clone, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Compact one-line-per-result format (default).
    #[default]
    Compact,
    /// Structured JSON suitable for programmatic consumption.
    Json,
}

/// Aggregate statistics produced by an analysis run.
#[derive(Debug, Serialize)]
pub struct AnalysisStats {
    /// Registration facts supplied by the extraction layer.
    pub registrations: usize,
    /// Deduplicated graph nodes.
    pub nodes: usize,
    /// Edges wired from raw dependency requests.
    pub direct_edges: usize,
    /// Edges inserted by interface fan-out.
    pub fan_out_edges: usize,
    /// Requests with no in-project supplier (feed the unregistered report).
    pub unsatisfied_requests: usize,
    pub duplicate_registrations: usize,
    pub dropped_controllers: usize,
    pub mismatches: usize,
    /// Wall-clock time for the run in seconds.
    pub elapsed_secs: f64,
}

/// Compute run statistics from a finished analysis.
pub fn collect_stats(result: &AnalysisResult, registrations: usize, elapsed_secs: f64) -> AnalysisStats {
    let mut direct_edges = 0;
    let mut fan_out_edges = 0;
    for edge_ref in result.graph.graph.edge_references() {
        match edge_ref.weight() {
            EdgeKind::Direct { .. } => direct_edges += 1,
            EdgeKind::Implementer { .. } => fan_out_edges += 1,
        }
    }
    let unsatisfied_requests = result
        .graph
        .sorted_indices()
        .iter()
        .map(|&idx| result.graph.node(idx).unsatisfied.len())
        .sum();
    let count_kind = |kind: DiagnosticKind| {
        result
            .diagnostics
            .iter()
            .filter(|d| d.kind == kind)
            .count()
    };
    AnalysisStats {
        registrations,
        nodes: result.graph.node_count(),
        direct_edges,
        fan_out_edges,
        unsatisfied_requests,
        duplicate_registrations: count_kind(DiagnosticKind::DuplicateRegistration),
        dropped_controllers: count_kind(DiagnosticKind::SkippedControllerWithoutProject),
        mismatches: result.mismatches.len(),
        elapsed_secs,
    }
}

/// Print a summary of the analysis run.
///
/// - `json = true`: emit a pretty-printed JSON object to stdout.
/// - `json = false`: emit a cargo-style human-readable summary to stdout.
pub fn print_summary(stats: &AnalysisStats, json: bool) {
    if json {
        match serde_json::to_string_pretty(stats) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error serialising stats: {}", e),
        }
        return;
    }

    println!(
        "Analyzed {} registrations in {:.2}s",
        stats.registrations, stats.elapsed_secs
    );
    println!(
        "  {} nodes, {} direct edges, {} fan-out edges",
        stats.nodes, stats.direct_edges, stats.fan_out_edges
    );
    println!(
        "  {} unsatisfied requests, {} duplicate registrations, {} dropped controllers",
        stats.unsatisfied_requests, stats.duplicate_registrations, stats.dropped_controllers
    );
    println!("  {} lifetime mismatches", stats.mismatches);
}

/// Write construction diagnostics to stderr, keeping stdout clean for
/// downstream JSON consumers.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("warning: {}", d.message);
    }
}

/// Print the captive-dependency report in the selected format.
pub fn print_mismatches(records: &[MismatchRecord], format: &OutputFormat) {
    match format {
        OutputFormat::Compact => {
            for r in records {
                println!("mismatch {} {}", r.project, r.message);
            }
            println!("{} mismatches found", records.len());
        }
        OutputFormat::Json => match serde_json::to_string_pretty(records) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error serialising mismatches: {}", e),
        },
    }
}

/// Print rendered trees in the selected format.
pub fn print_trees(trees: &[TreeNode], format: &OutputFormat) {
    match format {
        OutputFormat::Compact => {
            for tree in trees {
                print!("{}", crate::query::tree::render_text(tree));
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(trees) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error serialising trees: {}", e),
        },
    }
}
