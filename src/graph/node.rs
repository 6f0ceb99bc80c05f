use crate::model::{RawDependency, SourceKind, TypeId};
use crate::registry::LifetimeKind;

/// Identity of a graph node: one registration of one implementation, under
/// one service, in one project, at one lifetime. After dedup no two nodes in
/// a finished graph share a key; one implementation type may own several
/// nodes, one per distinct service registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub implementation: TypeId,
    pub service: Option<TypeId>,
    pub project: String,
    pub lifetime: LifetimeKind,
}

/// A raw request that no in-project node satisfies. Expected state, not a
/// fault: it feeds the unregistered entries in reports and tree leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsatisfiedDependency {
    pub requested: TypeId,
    /// Canonical display name, captured so frozen-graph queries need no model.
    pub display: String,
    pub source: SourceKind,
}

/// Atomic graph vertex. DependsOn / DependedOnBy are the node's outgoing /
/// incoming edges in the owning [`super::DependencyGraph`], not fields here;
/// the petgraph arena holds the shared many-to-many associations.
#[derive(Debug, Clone)]
pub struct DependencyNode {
    pub implementation: TypeId,
    pub service: Option<TypeId>,
    pub project: String,
    pub lifetime: LifetimeKind,
    /// Display name of the implementation type.
    pub class_name: String,
    /// Display name of the service interface, if registered behind one.
    pub service_name: Option<String>,
    /// Carried over from the registration: the concrete target of a
    /// factory/convention registration could not be statically determined.
    pub unresolvable_implementation: bool,
    /// All raw dependency requests of the implementation type.
    pub dependencies: Vec<RawDependency>,
    /// Requests with no satisfying node in this node's project (set during
    /// wiring).
    pub unsatisfied: Vec<UnsatisfiedDependency>,
}

impl DependencyNode {
    pub fn key(&self) -> NodeKey {
        NodeKey {
            implementation: self.implementation,
            service: self.service,
            project: self.project.clone(),
            lifetime: self.lifetime,
        }
    }
}

/// The kind of directed edge between two nodes. Direction is always
/// dependant -> supplier; the reverse view (DependedOnBy) is the incoming
/// edge set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    /// Wired from a raw dependency request; carries how the dependant
    /// obtains the dependency.
    Direct { source: SourceKind },
    /// Inserted by interface fan-out: the supplier concretely implements
    /// `interface`, which the dependant actually requested.
    Implementer { interface: TypeId },
}
