pub mod expand;
pub mod materialize;
pub mod registrations;
pub mod satisfy;
pub mod wire;

use crate::diagnostics::Diagnostic;
use crate::graph::DependencyGraph;
use crate::model::CodeModel;
use crate::query::mismatch::{self, MismatchRecord};
use crate::registry::RegistrationInfo;

/// Everything one analysis run produces. The graph is frozen once this
/// struct exists; queries and rendering take it read-only.
pub struct AnalysisResult {
    pub graph: DependencyGraph,
    /// Data-quality findings collected during construction (duplicate
    /// registrations, dropped controllers). Never fatal.
    pub diagnostics: Vec<Diagnostic>,
    /// Captive-dependency report, grouped by project, sorted by dependant.
    pub mismatches: Vec<MismatchRecord>,
}

/// Run the full construction pipeline: materialize -> wire -> expand ->
/// detect, as one deterministic pass.
///
/// Inputs are re-sorted by canonical names up front, so node keys and edge
/// sets come out identical under any permutation of the type and
/// registration lists.
pub fn build(model: &dyn CodeModel, registrations: &[RegistrationInfo]) -> AnalysisResult {
    let mut sorted_regs: Vec<RegistrationInfo> = registrations.to_vec();
    sorted_regs.sort_by_cached_key(|r| {
        (
            r.implementation.map(|t| model.display_name(t).to_owned()),
            r.service.map(|t| model.display_name(t).to_owned()),
            r.project.clone(),
            r.lifetime,
        )
    });

    let mut graph = DependencyGraph::new();
    let mut diagnostics = Vec::new();

    for symbol in model.class_ids() {
        let resolved = registrations::resolve(model, &sorted_regs, symbol, &mut diagnostics);
        materialize::materialize(model, symbol, &resolved, &mut graph, &mut diagnostics);
    }

    wire::wire(model, &mut graph);
    expand::expand(model, &mut graph);
    let mismatches = mismatch::detect(&graph);

    AnalysisResult {
        graph,
        diagnostics,
        mismatches,
    }
}
