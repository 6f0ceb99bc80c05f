use crate::graph::node::DependencyNode;
use crate::model::{CodeModel, TypeId, TypeKind};

/// The open definition a type reduces to for open/closed matching: its
/// generic definition when it has one, otherwise the type itself. Types
/// without a descriptor reduce to themselves.
fn definition_of(model: &dyn CodeModel, id: TypeId) -> TypeId {
    model.descriptor(id).map_or(id, |d| d.definition())
}

fn is_open(model: &dyn CodeModel, id: TypeId) -> bool {
    model.descriptor(id).is_some_and(|d| d.is_open_generic)
}

/// Decide whether `node` can satisfy a request for `requested`.
///
/// Interface requests match the node's service side, class requests its
/// implementation side, both under canonical identity:
/// - a closed or non-generic request matches an identical candidate, or an
///   open candidate sharing the request's original definition (the
///   open-generic fallback: `IRepo<>` satisfies `IRepo<Customer>`);
/// - an open request matches any candidate sharing its original definition;
/// - a request for a type the model never declared satisfies nothing.
///
/// Pure predicate, no side effects.
pub fn satisfies(model: &dyn CodeModel, node: &DependencyNode, requested: TypeId) -> bool {
    let Some(desc) = model.descriptor(requested) else {
        return false;
    };

    let candidate = match desc.kind {
        TypeKind::Interface => match node.service {
            Some(service) => service,
            None => return false,
        },
        TypeKind::Class => node.implementation,
    };

    if desc.is_open_generic {
        return definition_of(model, candidate) == definition_of(model, requested);
    }

    candidate == requested
        || (is_open(model, candidate)
            && definition_of(model, candidate) == definition_of(model, requested))
}
