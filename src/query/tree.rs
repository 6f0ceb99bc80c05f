use std::fmt::Write;

use petgraph::stable_graph::NodeIndex;

use crate::graph::DependencyGraph;
use crate::model::TypeId;
use crate::registry::LifetimeKind;

/// Marker on a rendered tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeMark {
    /// This type already occurs on the current root-to-node path; descent
    /// stops here.
    Cycle,
    /// A raw request no in-project registration satisfies.
    Unregistered,
}

/// One rendered node of a dependency or consumer tree.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<LifetimeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<TreeMark>,
    pub children: Vec<TreeNode>,
}

/// Walk direction for tree rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Children are the node's suppliers (DependsOn).
    Dependencies,
    /// Children are the node's consumers (DependedOnBy).
    Consumers,
}

/// Render the dependency tree rooted at `root`.
///
/// Cycle handling keeps an explicit path stack of implementation-type
/// identities for the current root-to-node path only: a type revisited via a
/// *different* path is re-expanded, a type revisited on the *same* path is
/// marked as a cycle and descent stops. Children are sorted by display name.
///
/// Requests without an in-project supplier become warning leaves, unless the
/// path already crossed a registration whose concrete implementation could
/// not be statically determined; past such a registration the missing
/// branch is treated as runtime-conditional and terminates silently.
pub fn dependency_tree(graph: &DependencyGraph, root: NodeIndex) -> TreeNode {
    let mut path: Vec<TypeId> = Vec::new();
    walk(graph, root, Walk::Dependencies, &mut path, false)
}

/// Render the consumer tree rooted at `root` (who depends on it,
/// transitively). Same cycle and ordering rules as [`dependency_tree`].
pub fn consumer_tree(graph: &DependencyGraph, root: NodeIndex) -> TreeNode {
    let mut path: Vec<TypeId> = Vec::new();
    walk(graph, root, Walk::Consumers, &mut path, false)
}

fn walk(
    graph: &DependencyGraph,
    idx: NodeIndex,
    direction: Walk,
    path: &mut Vec<TypeId>,
    conditional: bool,
) -> TreeNode {
    let node = graph.node(idx);

    if path.contains(&node.implementation) {
        return TreeNode {
            name: node.class_name.clone(),
            lifetime: Some(node.lifetime),
            mark: Some(TreeMark::Cycle),
            children: Vec::new(),
        };
    }

    path.push(node.implementation);
    let conditional = conditional || node.unresolvable_implementation;

    let next = match direction {
        Walk::Dependencies => graph.depends_on(idx),
        Walk::Consumers => graph.depended_on_by(idx),
    };
    let mut children: Vec<TreeNode> = Vec::with_capacity(next.len());
    for child in next {
        children.push(walk(graph, child, direction, path, conditional));
    }

    if direction == Walk::Dependencies && !conditional {
        for missing in &node.unsatisfied {
            children.push(TreeNode {
                name: missing.display.clone(),
                lifetime: None,
                mark: Some(TreeMark::Unregistered),
                children: Vec::new(),
            });
        }
    }
    children.sort_by(|a, b| a.name.cmp(&b.name));
    path.pop();

    TreeNode {
        name: node.class_name.clone(),
        lifetime: Some(node.lifetime),
        mark: None,
        children,
    }
}

/// Indented text form of a rendered tree.
pub fn render_text(tree: &TreeNode) -> String {
    let mut out = String::new();
    render_into(tree, 0, &mut out);
    out
}

fn render_into(node: &TreeNode, depth: usize, out: &mut String) {
    let detail = match node.mark {
        Some(TreeMark::Cycle) => "cycle".to_owned(),
        Some(TreeMark::Unregistered) => "unregistered".to_owned(),
        None => node
            .lifetime
            .map_or_else(String::new, |l| l.label().to_owned()),
    };
    let _ = writeln!(out, "{}{} ({})", "  ".repeat(depth), node.name, detail);
    for child in &node.children {
        render_into(child, depth + 1, out);
    }
}
