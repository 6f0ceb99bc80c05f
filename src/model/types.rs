use super::TypeId;

/// Whether a declared type is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A concrete (instantiable) class.
    Class,
    /// An interface. Interfaces never materialize graph nodes themselves.
    Interface,
}

/// Identity and shape of a declared type, supplied by a code model frontend.
///
/// Two descriptors denote the same type iff their canonical names are equal;
/// canonical names are interned into [`TypeId`]s so equality is id equality
/// everywhere past the frontend.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Interned canonical (fully-qualified) name.
    pub id: TypeId,
    pub kind: TypeKind,
    /// Name of the project (deployable unit) declaring this type. May be empty
    /// when the frontend could not attribute the type to a project.
    pub project: String,
    /// True for an open generic (`IRepository<>`), false for closed or
    /// non-generic types.
    pub is_open_generic: bool,
    /// The open generic definition this closed generic was constructed from.
    /// `None` for non-generic types and for open generics themselves.
    pub generic_definition: Option<TypeId>,
    /// Closed interface set as declared on the type (includes inherited ones
    /// when the frontend flattens them).
    pub interfaces: Vec<TypeId>,
    /// Base-class chain, nearest ancestor first.
    pub base_types: Vec<TypeId>,
    /// Frontend's controller classification for this type.
    pub is_controller: bool,
}

impl TypeDescriptor {
    /// The open definition this type reduces to for open/closed matching:
    /// its generic definition if it has one, otherwise the type itself.
    pub fn definition(&self) -> TypeId {
        self.generic_definition.unwrap_or(self.id)
    }
}

/// How a declaring type obtains a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Constructor-injected parameter.
    Constructor,
    /// Resolved from the container into a local variable.
    ManualLocal,
    /// Resolved from the container and stored in a field.
    ManualStored,
    /// Resolved via a dynamically computed type expression; the concrete
    /// target could not be statically determined.
    ManualAmbiguous,
}

/// One dependency request made by a declaring type.
///
/// Requests are deduplicated per declaring type by (requested, source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawDependency {
    /// The requested service or class type.
    pub requested: TypeId,
    pub source: SourceKind,
}
