pub mod builder;
pub mod json;
pub mod types;

use std::collections::HashMap;

pub use builder::{InMemoryModel, ModelBuilder};
pub use types::{RawDependency, SourceKind, TypeDescriptor, TypeKind};

/// Interned canonical type name. All identity comparisons across the analyzer
/// are `TypeId` equality; display strings never act as map keys past the
/// frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Canonical-name interner: maps fully-qualified type names to stable ids and
/// back. Never forgets a name, so types referenced only by registrations or
/// dependency requests (no descriptor) still have a display name.
#[derive(Debug, Default)]
pub struct TypeInterner {
    names: Vec<String>,
    ids: HashMap<String, TypeId>,
}

impl TypeInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a canonical name, returning its id. Idempotent.
    pub fn intern(&mut self, name: &str) -> TypeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = TypeId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        id
    }

    /// Look up an already-interned name without creating an id.
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.ids.get(name).copied()
    }

    /// The canonical name behind an id.
    pub fn name(&self, id: TypeId) -> &str {
        &self.names[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Capability interface over a code model frontend.
///
/// The analyzer depends on canonical-name identity, interface/base
/// enumeration, open/closed generic queries, a controller predicate, and raw
/// dependency requests, never on any concrete compiler type. One adapter per
/// source-language frontend; [`InMemoryModel`] is the reference adapter.
pub trait CodeModel {
    /// Descriptor for a type, if the frontend declared one. Types known only
    /// by name (external references) return `None`.
    fn descriptor(&self, id: TypeId) -> Option<&TypeDescriptor>;

    /// Canonical display name for any interned id.
    fn display_name(&self, id: TypeId) -> &str;

    /// Controller classification predicate.
    fn is_controller(&self, id: TypeId) -> bool;

    /// Concrete classes implementing the given interface. Answers for both
    /// the closed interface id and its open generic definition.
    fn implementers(&self, interface: TypeId) -> &[TypeId];

    /// Raw dependency requests declared by the given type, deduplicated by
    /// (requested, source).
    fn raw_dependencies(&self, id: TypeId) -> &[RawDependency];

    /// All declared class ids, sorted by canonical name. The sort makes graph
    /// construction independent of frontend enumeration order.
    fn class_ids(&self) -> Vec<TypeId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut interner = TypeInterner::new();
        let a = interner.intern("Acme.IFoo");
        let b = interner.intern("Acme.IFoo");
        assert_eq!(a, b, "same name must intern to the same id");
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_distinct_names_get_distinct_ids() {
        let mut interner = TypeInterner::new();
        let a = interner.intern("Acme.IFoo");
        let b = interner.intern("Acme.IBar");
        assert_ne!(a, b);
        assert_eq!(interner.name(a), "Acme.IFoo");
        assert_eq!(interner.name(b), "Acme.IBar");
    }

    #[test]
    fn test_get_does_not_intern() {
        let mut interner = TypeInterner::new();
        assert!(interner.get("Acme.IFoo").is_none());
        let id = interner.intern("Acme.IFoo");
        assert_eq!(interner.get("Acme.IFoo"), Some(id));
    }
}
