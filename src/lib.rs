//! Static analyzer for dependency-injection container graphs.
//!
//! Given a code model (declared types with their constructor requests) and a
//! flat list of container registration facts, di-graph builds a
//! deterministic, project-scoped dependency graph and reports captive
//! dependencies: longer-lived consumers holding shorter-lived dependencies.
//!
//! The pipeline is a single pass over frozen inputs: materialize nodes from
//! resolved registrations, wire raw requests to in-project suppliers, expand
//! interface edges with their concrete implementers, then detect lifetime
//! mismatches. The finished [`graph::DependencyGraph`] is immutable and safe
//! for concurrent read-only queries.

pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod graph;
pub mod model;
pub mod output;
pub mod query;
pub mod registry;
