pub mod node;

use std::collections::HashMap;

use petgraph::Directed;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;

use crate::model::TypeId;

use node::{DependencyNode, EdgeKind, NodeKey};

/// The frozen result of one analysis run: a directed petgraph StableGraph of
/// registration nodes with O(1) lookup indexes. Mutated only by the
/// construction pipeline (materialize -> wire -> expand); afterwards all
/// queries take `&DependencyGraph` and the structure is safe to share.
pub struct DependencyGraph {
    /// The underlying directed graph; edges run dependant -> supplier.
    pub graph: StableGraph<DependencyNode, EdgeKind, Directed>,
    /// Maps node keys to indices; the dedup invariant lives here.
    key_index: HashMap<NodeKey, NodeIndex>,
    /// Maps an implementation type to all its nodes (one per registration).
    impl_index: HashMap<TypeId, Vec<NodeIndex>>,
    /// Maps a project name to all nodes registered in it.
    project_index: HashMap<String, Vec<NodeIndex>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            key_index: HashMap::new(),
            impl_index: HashMap::new(),
            project_index: HashMap::new(),
        }
    }

    /// Add a node, deduplicating by key. Returns the index and whether the
    /// node was newly inserted.
    pub fn add_node(&mut self, node: DependencyNode) -> (NodeIndex, bool) {
        let key = node.key();
        if let Some(&existing) = self.key_index.get(&key) {
            return (existing, false);
        }
        let implementation = node.implementation;
        let project = node.project.clone();
        let idx = self.graph.add_node(node);
        self.key_index.insert(key, idx);
        self.impl_index.entry(implementation).or_default().push(idx);
        self.project_index.entry(project).or_default().push(idx);
        (idx, true)
    }

    /// Add a dependant -> supplier edge unless an identical (from, to, kind)
    /// edge already exists. Returns true if the edge was inserted.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: EdgeKind) -> bool {
        let duplicate = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .any(|e| e.target() == to && *e.weight() == kind);
        if duplicate {
            return false;
        }
        self.graph.add_edge(from, to, kind);
        true
    }

    pub fn node(&self, idx: NodeIndex) -> &DependencyNode {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut DependencyNode {
        &mut self.graph[idx]
    }

    /// All nodes whose implementation type is `class`.
    pub fn nodes_of_implementation(&self, class: TypeId) -> &[NodeIndex] {
        self.impl_index.get(&class).map_or(&[], Vec::as_slice)
    }

    /// All nodes registered in `project`.
    pub fn nodes_in_project(&self, project: &str) -> &[NodeIndex] {
        self.project_index.get(project).map_or(&[], Vec::as_slice)
    }

    /// Suppliers of `idx` (its DependsOn set), deduplicated.
    pub fn depends_on(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Dependants of `idx` (its DependedOnBy set), deduplicated.
    pub fn depended_on_by(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// All node indices sorted by node key, the deterministic iteration
    /// order for passes and reports.
    pub fn sorted_indices(&self) -> Vec<NodeIndex> {
        let mut keys: Vec<(&NodeKey, NodeIndex)> =
            self.key_index.iter().map(|(k, &i)| (k, i)).collect();
        keys.sort_by(|a, b| a.0.cmp(b.0));
        keys.into_iter().map(|(_, i)| i).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
