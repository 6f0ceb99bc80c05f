mod cli;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use di_graph::analysis;
use di_graph::config::DiGraphConfig;
use di_graph::model::InMemoryModel;
use di_graph::model::json::load_model;
use di_graph::output;
use di_graph::query;
use di_graph::registry::RegistrationInfo;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { model, json } => {
            let started = Instant::now();
            let (code_model, registrations) = load(&model)?;
            let result = analysis::build(&code_model, &registrations);
            output::print_diagnostics(&result.diagnostics);
            let stats = output::collect_stats(
                &result,
                registrations.len(),
                started.elapsed().as_secs_f64(),
            );
            output::print_summary(&stats, json);
        }

        Commands::Mismatches {
            model,
            project,
            format,
        } => {
            let (code_model, registrations) = load(&model)?;
            let result = analysis::build(&code_model, &registrations);
            output::print_diagnostics(&result.diagnostics);
            let records: Vec<_> = result
                .mismatches
                .into_iter()
                .filter(|m| project.as_deref().is_none_or(|p| m.project == p))
                .collect();
            output::print_mismatches(&records, &format);
        }

        Commands::Tree {
            class,
            model,
            project,
            consumers,
            format,
        } => {
            let (code_model, registrations) = load(&model)?;
            let result = analysis::build(&code_model, &registrations);
            output::print_diagnostics(&result.diagnostics);
            let nodes = query::find_nodes(&result.graph, &class, project.as_deref());
            if nodes.is_empty() {
                println!("No node found for '{class}'");
                return Ok(());
            }
            let trees: Vec<_> = nodes
                .into_iter()
                .map(|idx| {
                    if consumers {
                        query::tree::consumer_tree(&result.graph, idx)
                    } else {
                        query::tree::dependency_tree(&result.graph, idx)
                    }
                })
                .collect();
            output::print_trees(&trees, &format);
        }
    }

    Ok(())
}

/// Load the model file with `di-graph.toml` (if present next to it) applied.
fn load(model_path: &Path) -> Result<(InMemoryModel, Vec<RegistrationInfo>)> {
    let root = model_path.parent().unwrap_or(Path::new("."));
    let config = DiGraphConfig::load(root);
    load_model(model_path, Some(config.controller_regex()))
}
