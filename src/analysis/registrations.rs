use std::collections::HashSet;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::model::{CodeModel, TypeId, TypeKind};
use crate::registry::{LifetimeKind, RegistrationInfo};

/// Map a declared type to every applicable registration.
///
/// Rule order, first hit short-circuiting the rest:
/// 1. Controllers get exactly one synthesized registration: the host
///    framework resolves them per request, never the container. A controller
///    without a declaring project resolves to nothing (recorded as a
///    diagnostic, not an error).
/// 2. An interface matches every registration exposed under it as a service.
/// 3. A class matches registrations naming it as the implementation, plus
///    unresolvable-implementation registrations (factory/convention
///    registrations whose concrete target could not be statically
///    determined) whose service appears anywhere in the class's closed or
///    open interface sets or closed or open base-class chain. Matches whose
///    implementation side is still unknown are completed with the class.
///
/// Pure function of the symbol and the global registration list.
pub fn resolve(
    model: &dyn CodeModel,
    registrations: &[RegistrationInfo],
    symbol: TypeId,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<RegistrationInfo> {
    let Some(desc) = model.descriptor(symbol) else {
        return Vec::new();
    };

    if model.is_controller(symbol) {
        if desc.project.is_empty() {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::SkippedControllerWithoutProject,
                format!(
                    "controller {} has no declaring project; dropped from project-scoped graphs",
                    model.display_name(symbol)
                ),
            ));
            return Vec::new();
        }
        return vec![RegistrationInfo {
            implementation: Some(symbol),
            service: None,
            project: desc.project.clone(),
            lifetime: LifetimeKind::Controller,
            factory_resolved: false,
            unresolvable_implementation: false,
        }];
    }

    if desc.kind == TypeKind::Interface {
        return registrations
            .iter()
            .filter(|r| r.service == Some(symbol))
            .cloned()
            .collect();
    }

    // Class: service types an unresolvable-implementation registration may
    // reach this class through: closed interfaces, their open definitions,
    // the base chain, and its open definitions.
    let mut reachable_services: HashSet<TypeId> = HashSet::new();
    for &iface in desc.interfaces.iter().chain(desc.base_types.iter()) {
        reachable_services.insert(iface);
        let def = model.descriptor(iface).map_or(iface, |d| d.definition());
        reachable_services.insert(def);
    }

    registrations
        .iter()
        .filter(|r| {
            r.implementation == Some(symbol)
                || (r.unresolvable_implementation
                    && r.service.is_some_and(|s| reachable_services.contains(&s)))
        })
        .map(|r| {
            if r.implementation.is_none() && r.service.is_some() {
                r.completed_with(symbol)
            } else {
                r.clone()
            }
        })
        .collect()
}
