use std::collections::{HashMap, HashSet};

use regex::Regex;

use super::types::{RawDependency, SourceKind, TypeDescriptor, TypeKind};
use super::{CodeModel, TypeId, TypeInterner};

/// Programmatic [`CodeModel`] adapter. Frontends (and tests) declare types,
/// relations, and dependency requests, then `build()` an immutable
/// [`InMemoryModel`]. The JSON adapter in [`super::json`] drives this builder.
pub struct ModelBuilder {
    interner: TypeInterner,
    descriptors: HashMap<TypeId, TypeDescriptor>,
    dependencies: HashMap<TypeId, Vec<RawDependency>>,
    controller_pattern: Option<Regex>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            interner: TypeInterner::new(),
            descriptors: HashMap::new(),
            dependencies: HashMap::new(),
            controller_pattern: None,
        }
    }

    /// Set the fallback controller-classification pattern, applied to a
    /// class's canonical name and its base-class chain at build time.
    /// Types explicitly flagged by the frontend stay controllers regardless.
    pub fn controller_pattern(&mut self, pattern: Regex) -> &mut Self {
        self.controller_pattern = Some(pattern);
        self
    }

    /// Intern a canonical name without declaring a descriptor. Used for
    /// external references (registration targets, dependency requests on
    /// types outside the model).
    pub fn intern(&mut self, name: &str) -> TypeId {
        self.interner.intern(name)
    }

    /// Declare a non-generic type. Re-declaring a name keeps the first
    /// descriptor.
    pub fn declare(&mut self, name: &str, kind: TypeKind, project: &str) -> TypeId {
        let id = self.interner.intern(name);
        self.descriptors.entry(id).or_insert_with(|| TypeDescriptor {
            id,
            kind,
            project: project.to_owned(),
            is_open_generic: false,
            generic_definition: None,
            interfaces: Vec::new(),
            base_types: Vec::new(),
            is_controller: false,
        });
        id
    }

    /// Declare an open generic type (`IRepository<>`).
    pub fn declare_open(&mut self, name: &str, kind: TypeKind, project: &str) -> TypeId {
        let id = self.declare(name, kind, project);
        if let Some(desc) = self.descriptors.get_mut(&id) {
            desc.is_open_generic = true;
        }
        id
    }

    /// Declare a closed generic type constructed from `definition`.
    pub fn declare_closed(
        &mut self,
        name: &str,
        kind: TypeKind,
        project: &str,
        definition: TypeId,
    ) -> TypeId {
        let id = self.declare(name, kind, project);
        if let Some(desc) = self.descriptors.get_mut(&id) {
            desc.generic_definition = Some(definition);
        }
        id
    }

    /// Flag a declared type as a controller, bypassing the pattern fallback.
    pub fn mark_controller(&mut self, id: TypeId) {
        if let Some(desc) = self.descriptors.get_mut(&id) {
            desc.is_controller = true;
        }
    }

    /// Record that `class` declares `interface` in its interface list.
    pub fn implements(&mut self, class: TypeId, interface: TypeId) {
        if let Some(desc) = self.descriptors.get_mut(&class) {
            if !desc.interfaces.contains(&interface) {
                desc.interfaces.push(interface);
            }
        }
    }

    /// Append `base` to `class`'s base-class chain (call nearest-first).
    pub fn extends(&mut self, class: TypeId, base: TypeId) {
        if let Some(desc) = self.descriptors.get_mut(&class) {
            if !desc.base_types.contains(&base) {
                desc.base_types.push(base);
            }
        }
    }

    /// Record a raw dependency request. Duplicated (requested, source) pairs
    /// for the same declaring type collapse at build time.
    pub fn depends_on(&mut self, class: TypeId, requested: TypeId, source: SourceKind) {
        self.dependencies
            .entry(class)
            .or_default()
            .push(RawDependency { requested, source });
    }

    /// Freeze into an immutable model: applies the controller pattern,
    /// deduplicates dependency requests, and derives the implementers
    /// relation (interface -> concrete classes, keyed by both the closed
    /// interface id and its open definition).
    pub fn build(mut self) -> InMemoryModel {
        if let Some(pattern) = &self.controller_pattern {
            let controller_hits: Vec<(TypeId, bool)> = self
                .descriptors
                .values()
                .filter(|d| d.kind == TypeKind::Class && !d.is_controller)
                .map(|d| {
                    let hit = pattern.is_match(self.interner.name(d.id))
                        || d.base_types
                            .iter()
                            .any(|&b| pattern.is_match(self.interner.name(b)));
                    (d.id, hit)
                })
                .collect();
            for (id, hit) in controller_hits {
                if hit {
                    if let Some(desc) = self.descriptors.get_mut(&id) {
                        desc.is_controller = true;
                    }
                }
            }
        }

        // Dedup raw dependencies by (requested, source), first occurrence wins.
        let mut dependencies: HashMap<TypeId, Vec<RawDependency>> = HashMap::new();
        for (class, deps) in self.dependencies {
            let mut seen: HashSet<RawDependency> = HashSet::new();
            let deduped: Vec<RawDependency> =
                deps.into_iter().filter(|d| seen.insert(*d)).collect();
            dependencies.insert(class, deduped);
        }

        // Implementers relation: a class implements each declared interface
        // and, transitively through identity, that interface's open definition.
        let mut implementers: HashMap<TypeId, Vec<TypeId>> = HashMap::new();
        for desc in self.descriptors.values() {
            if desc.kind != TypeKind::Class {
                continue;
            }
            for &iface in &desc.interfaces {
                implementers.entry(iface).or_default().push(desc.id);
                let def = self
                    .descriptors
                    .get(&iface)
                    .map(|d| d.definition())
                    .unwrap_or(iface);
                if def != iface {
                    implementers.entry(def).or_default().push(desc.id);
                }
            }
        }
        for list in implementers.values_mut() {
            list.sort_by(|&a, &b| self.interner.name(a).cmp(self.interner.name(b)));
            list.dedup();
        }

        let mut classes: Vec<TypeId> = self
            .descriptors
            .values()
            .filter(|d| d.kind == TypeKind::Class)
            .map(|d| d.id)
            .collect();
        classes.sort_by(|&a, &b| self.interner.name(a).cmp(self.interner.name(b)));

        InMemoryModel {
            interner: self.interner,
            descriptors: self.descriptors,
            dependencies,
            implementers,
            classes,
        }
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable in-memory [`CodeModel`], the reference adapter.
pub struct InMemoryModel {
    interner: TypeInterner,
    descriptors: HashMap<TypeId, TypeDescriptor>,
    dependencies: HashMap<TypeId, Vec<RawDependency>>,
    implementers: HashMap<TypeId, Vec<TypeId>>,
    classes: Vec<TypeId>,
}

impl InMemoryModel {
    /// Interner access for frontends that need to resolve names after build.
    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }
}

impl CodeModel for InMemoryModel {
    fn descriptor(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.descriptors.get(&id)
    }

    fn display_name(&self, id: TypeId) -> &str {
        self.interner.name(id)
    }

    fn is_controller(&self, id: TypeId) -> bool {
        self.descriptors.get(&id).is_some_and(|d| d.is_controller)
    }

    fn implementers(&self, interface: TypeId) -> &[TypeId] {
        self.implementers.get(&interface).map_or(&[], Vec::as_slice)
    }

    fn raw_dependencies(&self, id: TypeId) -> &[RawDependency] {
        self.dependencies.get(&id).map_or(&[], Vec::as_slice)
    }

    fn class_ids(&self) -> Vec<TypeId> {
        self.classes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependencies_dedup_by_requested_and_source() {
        let mut b = ModelBuilder::new();
        let repo = b.declare("Acme.Repo", TypeKind::Class, "Acme");
        let svc = b.declare("Acme.Svc", TypeKind::Class, "Acme");
        b.depends_on(svc, repo, SourceKind::Constructor);
        b.depends_on(svc, repo, SourceKind::Constructor);
        b.depends_on(svc, repo, SourceKind::ManualLocal);
        let model = b.build();
        assert_eq!(
            model.raw_dependencies(svc).len(),
            2,
            "same (requested, source) pair must collapse; distinct sources stay"
        );
    }

    #[test]
    fn test_implementers_keyed_by_closed_and_open_definition() {
        let mut b = ModelBuilder::new();
        let open = b.declare_open("Acme.IRepo<>", TypeKind::Interface, "Acme");
        let closed = b.declare_closed("Acme.IRepo<Order>", TypeKind::Interface, "Acme", open);
        let class = b.declare("Acme.OrderRepo", TypeKind::Class, "Acme");
        b.implements(class, closed);
        let model = b.build();
        assert_eq!(model.implementers(closed), &[class]);
        assert_eq!(
            model.implementers(open),
            &[class],
            "implementer must answer for the open definition too"
        );
    }

    #[test]
    fn test_controller_pattern_matches_name_and_base_chain() {
        let mut b = ModelBuilder::new();
        b.controller_pattern(Regex::new("Controller$").unwrap());
        let by_name = b.declare("Acme.Web.OrdersController", TypeKind::Class, "Acme.Web");
        let base = b.declare("Acme.Web.ApiController", TypeKind::Class, "Acme.Web");
        let by_base = b.declare("Acme.Web.Orders", TypeKind::Class, "Acme.Web");
        b.extends(by_base, base);
        let plain = b.declare("Acme.Web.OrderService", TypeKind::Class, "Acme.Web");
        let model = b.build();
        assert!(model.is_controller(by_name));
        assert!(model.is_controller(by_base), "base-chain match must classify");
        assert!(!model.is_controller(plain));
    }

    #[test]
    fn test_class_ids_sorted_by_canonical_name() {
        let mut b = ModelBuilder::new();
        let z = b.declare("Z.Last", TypeKind::Class, "P");
        let a = b.declare("A.First", TypeKind::Class, "P");
        let model = b.build();
        assert_eq!(model.class_ids(), vec![a, z]);
    }

    #[test]
    fn test_interfaces_do_not_appear_in_class_ids() {
        let mut b = ModelBuilder::new();
        b.declare("P.IFoo", TypeKind::Interface, "P");
        let c = b.declare("P.Foo", TypeKind::Class, "P");
        let model = b.build();
        assert_eq!(model.class_ids(), vec![c]);
    }
}
