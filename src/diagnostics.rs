/// Category of a non-fatal data-quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Several registrations share one (implementation, service, project,
    /// lifetime) key; an arbitrary representative was used.
    DuplicateRegistration,
    /// A controller class has no declaring project and was dropped from
    /// project-scoped resolution.
    SkippedControllerWithoutProject,
}

/// One structured diagnostic. The analysis never logs mid-computation;
/// findings are collected here and returned with the graph so presentation
/// decides how they surface.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
