use crate::graph::DependencyGraph;
use crate::graph::node::{EdgeKind, UnsatisfiedDependency};
use crate::model::CodeModel;

use super::satisfy::satisfies;

/// Link every raw dependency request to its candidate supplier nodes.
///
/// For each dependant node (an implementation may own several, one per
/// registration) and each request it declares, candidates are all nodes in
/// the dependant's own project that satisfy the request. Every candidate
/// becomes an edge, so an exact closed match and an open-generic fallback
/// can both be wired. No edge ever crosses a project boundary.
///
/// A request with no candidate joins the node's unsatisfied list; that is
/// expected state feeding the unregistered report entries, not a fault.
pub fn wire(model: &dyn CodeModel, graph: &mut DependencyGraph) {
    for dependant in graph.sorted_indices() {
        let requests = graph.node(dependant).dependencies.clone();
        if requests.is_empty() {
            continue;
        }
        let in_project = graph
            .nodes_in_project(&graph.node(dependant).project)
            .to_vec();

        for request in requests {
            let candidates: Vec<_> = in_project
                .iter()
                .copied()
                .filter(|&supplier| satisfies(model, graph.node(supplier), request.requested))
                .collect();

            if candidates.is_empty() {
                let display = model.display_name(request.requested).to_owned();
                graph.node_mut(dependant).unsatisfied.push(UnsatisfiedDependency {
                    requested: request.requested,
                    display,
                    source: request.source,
                });
                continue;
            }
            for supplier in candidates {
                graph.add_edge(
                    dependant,
                    supplier,
                    EdgeKind::Direct {
                        source: request.source,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::DependencyNode;
    use crate::model::{ModelBuilder, RawDependency, SourceKind, TypeId, TypeKind};
    use crate::registry::LifetimeKind;
    use petgraph::stable_graph::NodeIndex;

    fn node(
        implementation: TypeId,
        service: Option<TypeId>,
        project: &str,
        name: &str,
        deps: Vec<RawDependency>,
    ) -> DependencyNode {
        DependencyNode {
            implementation,
            service,
            project: project.to_owned(),
            lifetime: LifetimeKind::Transient,
            class_name: name.to_owned(),
            service_name: None,
            unresolvable_implementation: false,
            dependencies: deps,
            unsatisfied: Vec::new(),
        }
    }

    fn ctor(requested: TypeId) -> RawDependency {
        RawDependency {
            requested,
            source: SourceKind::Constructor,
        }
    }

    #[test]
    fn test_edges_never_cross_projects() {
        let mut b = ModelBuilder::new();
        let iface = b.declare("IFoo", TypeKind::Interface, "P1");
        let foo_a = b.declare("FooA", TypeKind::Class, "P1");
        let foo_b = b.declare("FooB", TypeKind::Class, "P2");
        let consumer = b.declare("Consumer", TypeKind::Class, "P1");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (a, _) = graph.add_node(node(foo_a, Some(iface), "P1", "FooA", vec![]));
        let (other, _) = graph.add_node(node(foo_b, Some(iface), "P2", "FooB", vec![]));
        let (c, _) = graph.add_node(node(consumer, None, "P1", "Consumer", vec![ctor(iface)]));

        wire(&model, &mut graph);

        assert_eq!(
            graph.depends_on(c),
            vec![a],
            "consumer in P1 must wire only to FooA's node, never FooB in P2"
        );
        assert!(graph.depended_on_by(other).is_empty());
        for idx in graph.sorted_indices() {
            for dep in graph.depends_on(idx) {
                assert_eq!(
                    graph.node(idx).project,
                    graph.node(dep).project,
                    "wired edge crossed a project boundary"
                );
            }
        }
    }

    #[test]
    fn test_multiple_candidates_all_wired() {
        let mut b = ModelBuilder::new();
        let open = b.declare_open("IRepo<>", TypeKind::Interface, "P");
        let closed = b.declare_closed("IRepo<Order>", TypeKind::Interface, "P", open);
        let open_impl = b.declare_open("Repo<>", TypeKind::Class, "P");
        let closed_impl = b.declare("OrderRepo", TypeKind::Class, "P");
        let consumer = b.declare("OrderService", TypeKind::Class, "P");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (fallback, _) = graph.add_node(node(open_impl, Some(open), "P", "Repo<>", vec![]));
        let (exact, _) = graph.add_node(node(closed_impl, Some(closed), "P", "OrderRepo", vec![]));
        let (c, _) = graph.add_node(node(consumer, None, "P", "OrderService", vec![ctor(closed)]));

        wire(&model, &mut graph);

        let suppliers = graph.depends_on(c);
        assert!(suppliers.contains(&exact), "exact closed match must be wired");
        assert!(
            suppliers.contains(&fallback),
            "open-generic fallback must be wired alongside the exact match"
        );
        assert_eq!(suppliers.len(), 2);
    }

    #[test]
    fn test_open_generic_registration_satisfies_closed_request() {
        // Scenario: IRepository<> -> Repository<> singleton; OrderService
        // requests IRepository<Order> with no closed registration existing.
        let mut b = ModelBuilder::new();
        let open = b.declare_open("IRepository<>", TypeKind::Interface, "P");
        let closed = b.declare_closed("IRepository<Order>", TypeKind::Interface, "P", open);
        let repo = b.declare_open("Repository<>", TypeKind::Class, "P");
        let consumer = b.declare("OrderService", TypeKind::Class, "P");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (r, _) = graph.add_node(node(repo, Some(open), "P", "Repository<>", vec![]));
        let (c, _) = graph.add_node(node(consumer, None, "P", "OrderService", vec![ctor(closed)]));

        wire(&model, &mut graph);

        assert_eq!(graph.depends_on(c), vec![r]);
        assert!(graph.node(c).unsatisfied.is_empty());
    }

    #[test]
    fn test_unsatisfied_request_recorded_not_edged() {
        let mut b = ModelBuilder::new();
        let missing = b.declare("IMissing", TypeKind::Interface, "P");
        let consumer = b.declare("Consumer", TypeKind::Class, "P");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (c, _) = graph.add_node(node(consumer, None, "P", "Consumer", vec![ctor(missing)]));

        wire(&model, &mut graph);

        assert!(graph.depends_on(c).is_empty());
        let unsatisfied = &graph.node(c).unsatisfied;
        assert_eq!(unsatisfied.len(), 1);
        assert_eq!(unsatisfied[0].display, "IMissing");
        assert_eq!(unsatisfied[0].source, SourceKind::Constructor);
    }

    #[test]
    fn test_every_dependant_node_of_a_class_gets_wired() {
        // One class registered twice (different lifetimes) => two dependant
        // nodes, each with its own edge to the supplier.
        let mut b = ModelBuilder::new();
        let repo = b.declare("Repo", TypeKind::Class, "P");
        let consumer = b.declare("Consumer", TypeKind::Class, "P");
        let model = b.build();

        let mut graph = DependencyGraph::new();
        let (supplier, _) = graph.add_node(node(repo, None, "P", "Repo", vec![]));
        let (c1, _) = graph.add_node(node(consumer, None, "P", "Consumer", vec![ctor(repo)]));
        let mut singleton = node(consumer, None, "P", "Consumer", vec![ctor(repo)]);
        singleton.lifetime = LifetimeKind::Singleton;
        let (c2, _) = graph.add_node(singleton);

        wire(&model, &mut graph);

        assert_eq!(graph.depends_on(c1), vec![supplier]);
        assert_eq!(graph.depends_on(c2), vec![supplier]);
        let mut dependants = graph.depended_on_by(supplier);
        dependants.sort();
        let mut expected: Vec<NodeIndex> = vec![c1, c2];
        expected.sort();
        assert_eq!(dependants, expected);
    }
}
