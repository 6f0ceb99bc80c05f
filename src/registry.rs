use crate::model::TypeId;

/// Container lifetime of a registration, totally ordered shortest-lived to
/// longest-lived. The derived `Ord` follows variant order, so a comparison
/// `consumer.lifetime > dependency.lifetime` reads "consumer outlives
/// dependency": the captive-dependency condition.
///
/// `Unregistered` sorts as the longest-lived kind, so any consumer compared
/// against a missing registration reads as a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifetimeKind {
    /// Synthesized for controller classes resolved per request by the host.
    Controller,
    /// A fresh instance per resolution.
    Transient,
    /// One instance per web request.
    PerWebRequest,
    /// One instance for the container's whole life.
    Singleton,
    /// No registration found; sorts longest-lived by convention.
    Unregistered,
}

impl LifetimeKind {
    /// Short lowercase label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            LifetimeKind::Controller => "controller",
            LifetimeKind::Transient => "transient",
            LifetimeKind::PerWebRequest => "per-web-request",
            LifetimeKind::Singleton => "singleton",
            LifetimeKind::Unregistered => "unregistered",
        }
    }
}

/// One registration fact extracted from container setup code: the container
/// will produce `implementation` (optionally behind `service`) at `lifetime`,
/// within `project`.
///
/// Factory registrations often only reveal the service side statically; such
/// registrations arrive with `implementation: None` and are later *completed*
/// (a copy with the implementation bound) when resolution reaches the
/// concrete class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationInfo {
    /// The concrete class the container instantiates, when statically known.
    pub implementation: Option<TypeId>,
    /// The service type the registration is exposed under, if any.
    pub service: Option<TypeId>,
    /// Project (deployable unit) owning the registration.
    pub project: String,
    pub lifetime: LifetimeKind,
    /// True when the registration goes through a factory delegate.
    pub factory_resolved: bool,
    /// True when the concrete target of a factory/convention registration
    /// could not be statically determined. Such registrations match any class
    /// exposing the registered service.
    pub unresolvable_implementation: bool,
}

impl RegistrationInfo {
    /// A completed copy with the implementation side bound to `class`.
    pub fn completed_with(&self, class: TypeId) -> Self {
        Self {
            implementation: Some(class),
            ..self.clone()
        }
    }
}
