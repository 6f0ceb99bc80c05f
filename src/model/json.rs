use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::registry::{LifetimeKind, RegistrationInfo};

use super::builder::{InMemoryModel, ModelBuilder};
use super::types::{SourceKind, TypeKind};

/// On-disk model format produced by an extraction frontend: declared types
/// with their shape and dependency requests, plus the flat registration list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ModelFile {
    types: Vec<TypeEntry>,
    #[serde(default)]
    registrations: Vec<RegistrationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TypeEntry {
    /// Canonical (fully-qualified) name.
    name: String,
    kind: TypeKind,
    #[serde(default)]
    project: String,
    #[serde(default)]
    is_open_generic: bool,
    #[serde(default)]
    generic_definition: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    /// Base-class chain, nearest ancestor first.
    #[serde(default)]
    base_types: Vec<String>,
    #[serde(default)]
    is_controller: bool,
    #[serde(default)]
    dependencies: Vec<DependencyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DependencyEntry {
    #[serde(rename = "type")]
    type_name: String,
    source: SourceKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RegistrationEntry {
    #[serde(default)]
    implementation: Option<String>,
    #[serde(default)]
    service: Option<String>,
    #[serde(default)]
    project: String,
    lifetime: LifetimeKind,
    #[serde(default)]
    factory_resolved: bool,
    #[serde(default)]
    unresolvable_implementation: bool,
}

/// Load a model file from disk.
///
/// `controller_pattern` is the fallback classification applied to class names
/// and base chains; explicit `isController` flags in the file always win.
/// Names referenced by registrations or dependencies but never declared are
/// interned without descriptors: they resolve to nothing and satisfy nothing,
/// so malformed input degrades instead of crashing.
pub fn load_model(
    path: &Path,
    controller_pattern: Option<Regex>,
) -> Result<(InMemoryModel, Vec<RegistrationInfo>)> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model file {}", path.display()))?;
    let file: ModelFile = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse model file {}", path.display()))?;

    let mut builder = ModelBuilder::new();
    if let Some(pattern) = controller_pattern {
        builder.controller_pattern(pattern);
    }

    // Pass 1: declare every type so cross-references land on descriptors.
    for entry in &file.types {
        let id = if entry.is_open_generic {
            builder.declare_open(&entry.name, entry.kind, &entry.project)
        } else {
            builder.declare(&entry.name, entry.kind, &entry.project)
        };
        if entry.is_controller {
            builder.mark_controller(id);
        }
    }

    // Pass 2: relations and dependency requests; targets may be external.
    for entry in &file.types {
        let id = builder.intern(&entry.name);
        if let Some(def_name) = &entry.generic_definition {
            let def = builder.intern(def_name);
            builder.declare_closed(&entry.name, entry.kind, &entry.project, def);
        }
        for iface in &entry.interfaces {
            let iface_id = builder.intern(iface);
            builder.implements(id, iface_id);
        }
        for base in &entry.base_types {
            let base_id = builder.intern(base);
            builder.extends(id, base_id);
        }
        for dep in &entry.dependencies {
            let requested = builder.intern(&dep.type_name);
            builder.depends_on(id, requested, dep.source);
        }
    }

    let registrations: Vec<RegistrationInfo> = file
        .registrations
        .iter()
        .map(|r| RegistrationInfo {
            implementation: r.implementation.as_deref().map(|n| builder.intern(n)),
            service: r.service.as_deref().map(|n| builder.intern(n)),
            project: r.project.clone(),
            lifetime: r.lifetime,
            factory_resolved: r.factory_resolved,
            unresolvable_implementation: r.unresolvable_implementation,
        })
        .collect();

    Ok((builder.build(), registrations))
}
