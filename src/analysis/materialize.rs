use std::collections::BTreeMap;

use petgraph::stable_graph::NodeIndex;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::graph::DependencyGraph;
use crate::graph::node::{DependencyNode, NodeKey};
use crate::model::{CodeModel, TypeId, TypeKind};
use crate::registry::RegistrationInfo;

/// Turn a class's resolved registrations into deduplicated graph nodes.
///
/// Interfaces never materialize. Registrations group by node key
/// (implementation, service, project, lifetime); each group yields exactly
/// one node. A group with several members is a duplicate registration in the
/// container setup, recorded as a non-fatal diagnostic, with the first
/// member (in the caller's sorted registration order) as representative.
pub fn materialize(
    model: &dyn CodeModel,
    symbol: TypeId,
    resolved: &[RegistrationInfo],
    graph: &mut DependencyGraph,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<NodeIndex> {
    let is_class = model
        .descriptor(symbol)
        .is_some_and(|d| d.kind == TypeKind::Class);
    if !is_class {
        return Vec::new();
    }

    // BTreeMap keeps group order independent of registration input order.
    let mut groups: BTreeMap<NodeKey, Vec<&RegistrationInfo>> = BTreeMap::new();
    for reg in resolved {
        let key = NodeKey {
            implementation: reg.implementation.unwrap_or(symbol),
            service: reg.service,
            project: reg.project.clone(),
            lifetime: reg.lifetime,
        };
        groups.entry(key).or_default().push(reg);
    }

    let mut indices = Vec::with_capacity(groups.len());
    for (key, members) in groups {
        if members.len() > 1 {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::DuplicateRegistration,
                format!(
                    "{} registered {} times as ({}, {}, {}); using one representative",
                    model.display_name(key.implementation),
                    members.len(),
                    key.service
                        .map_or("no service", |s| model.display_name(s)),
                    key.project,
                    key.lifetime.label(),
                ),
            ));
        }
        let representative = members[0];
        let node = DependencyNode {
            implementation: key.implementation,
            service: key.service,
            class_name: model.display_name(key.implementation).to_owned(),
            service_name: key.service.map(|s| model.display_name(s).to_owned()),
            project: key.project,
            lifetime: key.lifetime,
            unresolvable_implementation: representative.unresolvable_implementation,
            dependencies: model.raw_dependencies(symbol).to_vec(),
            unsatisfied: Vec::new(),
        };
        let (idx, _) = graph.add_node(node);
        indices.push(idx);
    }
    indices
}
