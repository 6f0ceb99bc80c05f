use rayon::prelude::*;

use crate::graph::DependencyGraph;

/// One captive-dependency finding: a longer-lived consumer holds a reference
/// to a shorter-lived dependency, so the dependency outlives its intended
/// scope inside the consumer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct MismatchRecord {
    pub project: String,
    /// Display name of the consuming class.
    pub dependant: String,
    /// Display name of the captured dependency class.
    pub dependency: String,
    pub message: String,
}

/// Walk the finished graph and emit every captive-dependency mismatch.
///
/// For every node N and every distinct dependant D in N's DependedOnBy set
/// (direct edges and interface fan-out alike), a record is emitted when D is
/// registered in the same project and D's lifetime sorts strictly longer
/// than N's. Output is grouped by project and sorted by dependant class
/// name; parallel edges between one (D, N) pair collapse to one record.
pub fn detect(graph: &DependencyGraph) -> Vec<MismatchRecord> {
    let indices = graph.sorted_indices();
    let mut records: Vec<MismatchRecord> = indices
        .par_iter()
        .flat_map_iter(|&n_idx| {
            let n = graph.node(n_idx);
            graph
                .depended_on_by(n_idx)
                .into_iter()
                .filter_map(move |d_idx| {
                    let d = graph.node(d_idx);
                    if d.project != n.project || d.lifetime <= n.lifetime {
                        return None;
                    }
                    Some(MismatchRecord {
                        project: n.project.clone(),
                        dependant: d.class_name.clone(),
                        dependency: n.class_name.clone(),
                        message: format!(
                            "{} ({}) captures {} ({})",
                            d.class_name,
                            d.lifetime.label(),
                            n.class_name,
                            n.lifetime.label(),
                        ),
                    })
                })
        })
        .collect();

    records.sort();
    records.dedup();
    records
}
