use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::NodeIndex;

use crate::graph::DependencyGraph;
use crate::graph::node::EdgeKind;
use crate::model::{CodeModel, TypeId};

/// Rewrite interface edges to include concrete implementers.
///
/// Downstream: wherever a node depends on an interface-service supplier, each
/// same-project node of each class implementing that interface is inserted
/// into the dependant's DependsOn set, deduplicated by implementation type
/// identity. The interface-service node stays visible next to the inserted
/// implementers. Upstream: the inserted dependant -> implementer edges make
/// consumers that reached an implementer only through its interface visible
/// in the implementer's DependedOnBy set, so lifetime checks at the
/// implementer see them.
///
/// When several implementers share one interface in a project this conflates
/// "declares the interface" with "is selected at runtime", an
/// over-approximation carried into the mismatch report.
pub fn expand(model: &dyn CodeModel, graph: &mut DependencyGraph) {
    // Work from a snapshot of the wired edges; fan-out edges inserted here
    // must not themselves fan out.
    let snapshot: Vec<(NodeIndex, Vec<NodeIndex>)> = graph
        .sorted_indices()
        .into_iter()
        .map(|idx| (idx, graph.depends_on(idx)))
        .collect();

    // Implementation types already visible per dependant, for identity dedup.
    let mut visible: HashMap<NodeIndex, HashSet<TypeId>> = snapshot
        .iter()
        .map(|(idx, suppliers)| {
            let types = suppliers
                .iter()
                .map(|&s| graph.node(s).implementation)
                .collect();
            (*idx, types)
        })
        .collect();

    let mut insertions: Vec<(NodeIndex, NodeIndex, TypeId)> = Vec::new();
    for (dependant, suppliers) in &snapshot {
        for &supplier in suppliers {
            let Some(interface) = graph.node(supplier).service else {
                continue;
            };
            let project = graph.node(*dependant).project.clone();
            for &implementer in model.implementers(interface) {
                for &impl_node in graph.nodes_of_implementation(implementer) {
                    if graph.node(impl_node).project != project {
                        continue;
                    }
                    let seen = visible.entry(*dependant).or_default();
                    if seen.contains(&graph.node(impl_node).implementation) {
                        continue;
                    }
                    seen.insert(graph.node(impl_node).implementation);
                    insertions.push((*dependant, impl_node, interface));
                }
            }
        }
    }

    for (dependant, implementer, interface) in insertions {
        graph.add_edge(dependant, implementer, EdgeKind::Implementer { interface });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::DependencyNode;
    use crate::model::{ModelBuilder, TypeKind};
    use crate::registry::LifetimeKind;

    fn node(
        implementation: TypeId,
        service: Option<TypeId>,
        project: &str,
        name: &str,
    ) -> DependencyNode {
        DependencyNode {
            implementation,
            service,
            project: project.to_owned(),
            lifetime: LifetimeKind::Transient,
            class_name: name.to_owned(),
            service_name: None,
            unresolvable_implementation: false,
            dependencies: Vec::new(),
            unsatisfied: Vec::new(),
        }
    }

    #[test]
    fn test_implementer_inserted_and_visible_both_directions() {
        let mut b = ModelBuilder::new();
        let iface = b.declare("P.IFoo", TypeKind::Interface, "P");
        let foo = b.declare("P.Foo", TypeKind::Class, "P");
        b.implements(foo, iface);
        let consumer = b.declare("P.Consumer", TypeKind::Class, "P");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        // Foo registered behind IFoo and also standalone (the concrete node).
        let (iface_node, _) = graph.add_node(node(foo, Some(iface), "P", "P.Foo"));
        let mut standalone = node(foo, None, "P", "P.Foo");
        standalone.lifetime = LifetimeKind::Singleton;
        let (concrete, _) = graph.add_node(standalone);
        let (c, _) = graph.add_node(node(consumer, None, "P", "P.Consumer"));
        graph.add_edge(
            c,
            iface_node,
            EdgeKind::Direct {
                source: crate::model::SourceKind::Constructor,
            },
        );

        expand(&model, &mut graph);

        let suppliers = graph.depends_on(c);
        assert!(
            suppliers.contains(&iface_node),
            "interface-service node must stay visible"
        );
        // The directly wired iface_node already carries Foo's implementation
        // type, so identity dedup keeps the standalone Foo node out.
        assert!(!suppliers.contains(&concrete));
        assert!(graph.depended_on_by(iface_node).contains(&c));
    }

    #[test]
    fn test_distinct_implementers_all_inserted() {
        let mut b = ModelBuilder::new();
        let iface = b.declare("P.IFoo", TypeKind::Interface, "P");
        let foo_a = b.declare("P.FooA", TypeKind::Class, "P");
        let foo_b = b.declare("P.FooB", TypeKind::Class, "P");
        b.implements(foo_a, iface);
        b.implements(foo_b, iface);
        let consumer = b.declare("P.Consumer", TypeKind::Class, "P");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (a, _) = graph.add_node(node(foo_a, Some(iface), "P", "P.FooA"));
        let (bn, _) = graph.add_node(node(foo_b, None, "P", "P.FooB"));
        let (c, _) = graph.add_node(node(consumer, None, "P", "P.Consumer"));
        graph.add_edge(
            c,
            a,
            EdgeKind::Direct {
                source: crate::model::SourceKind::Constructor,
            },
        );

        expand(&model, &mut graph);

        let suppliers = graph.depends_on(c);
        assert!(suppliers.contains(&a));
        assert!(
            suppliers.contains(&bn),
            "every implementer of the requested interface must be inserted"
        );
        assert!(
            graph.depended_on_by(bn).contains(&c),
            "upstream: the implementer must see the consumer that arrived via the interface"
        );
    }

    #[test]
    fn test_fan_out_stays_in_project() {
        let mut b = ModelBuilder::new();
        let iface = b.declare("IFoo", TypeKind::Interface, "P1");
        let foo_a = b.declare("FooA", TypeKind::Class, "P1");
        let foo_b = b.declare("FooB", TypeKind::Class, "P2");
        b.implements(foo_a, iface);
        b.implements(foo_b, iface);
        let consumer = b.declare("Consumer", TypeKind::Class, "P1");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (a, _) = graph.add_node(node(foo_a, Some(iface), "P1", "FooA"));
        let (other, _) = graph.add_node(node(foo_b, None, "P2", "FooB"));
        let (c, _) = graph.add_node(node(consumer, None, "P1", "Consumer"));
        graph.add_edge(
            c,
            a,
            EdgeKind::Direct {
                source: crate::model::SourceKind::Constructor,
            },
        );

        expand(&model, &mut graph);

        assert!(
            !graph.depends_on(c).contains(&other),
            "fan-out must not insert implementers from another project"
        );
    }

    #[test]
    fn test_non_interface_suppliers_do_not_fan_out() {
        let mut b = ModelBuilder::new();
        let repo = b.declare("P.Repo", TypeKind::Class, "P");
        let consumer = b.declare("P.Consumer", TypeKind::Class, "P");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (r, _) = graph.add_node(node(repo, None, "P", "P.Repo"));
        let (c, _) = graph.add_node(node(consumer, None, "P", "P.Consumer"));
        graph.add_edge(
            c,
            r,
            EdgeKind::Direct {
                source: crate::model::SourceKind::Constructor,
            },
        );
        let before = graph.edge_count();

        expand(&model, &mut graph);

        assert_eq!(graph.edge_count(), before, "plain class edges are left alone");
    }
}
