pub mod mismatch;
pub mod tree;

use petgraph::stable_graph::NodeIndex;

use crate::graph::DependencyGraph;

/// True when `class_name` matches `query` exactly or by trailing simple name
/// (`OrderProcessor` matches `Acme.Orders.OrderProcessor`).
fn name_matches(class_name: &str, query: &str) -> bool {
    class_name == query || class_name.ends_with(&format!(".{query}"))
}

/// Look up all nodes for a class, optionally scoped to one project. One
/// class may own several nodes (one per registration); results follow the
/// graph's deterministic key order.
pub fn find_nodes(
    graph: &DependencyGraph,
    class_name: &str,
    project: Option<&str>,
) -> Vec<NodeIndex> {
    graph
        .sorted_indices()
        .into_iter()
        .filter(|&idx| {
            let node = graph.node(idx);
            name_matches(&node.class_name, class_name)
                && project.is_none_or(|p| node.project == p)
        })
        .collect()
}

/// First node for (class name, project), if any.
pub fn find_node(graph: &DependencyGraph, class_name: &str, project: &str) -> Option<NodeIndex> {
    find_nodes(graph, class_name, Some(project)).into_iter().next()
}
