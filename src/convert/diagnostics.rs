//! Warnings and errors collected during a conversion run
//!
//! Nothing inside a run returns early on a bad unit or a broken link; each
//! problem is recorded here and the run carries on.

use serde::{Deserialize, Serialize};

use crate::core::error::MusterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The unit could not be read; it was skipped
    Structural,
    /// A cross-reference pointed nowhere; the run degraded gracefully
    Link,
    /// The army breaks a points or stat rule; the caller decides
    Validation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Selection id of the unit concerned, when there is one
    pub unit: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A unit that had to be skipped
    pub fn structural(&mut self, error: &MusterError) {
        tracing::error!("Skipping unit: {}", error);
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::Structural,
            unit: None,
            message: error.to_string(),
        });
    }

    /// A broken cross-reference that was worked around
    pub fn link(&mut self, unit: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(unit, "{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            kind: DiagnosticKind::Link,
            unit: Some(unit.to_string()),
            message,
        });
    }

    /// A soft notice the player should acknowledge
    pub fn notice(&mut self, unit: Option<&str>, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(unit, "{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            kind: DiagnosticKind::Validation,
            unit: unit.map(str::to_string),
            message,
        });
    }

    /// A validation failure the caller may reject the import for
    pub fn invalid(&mut self, unit: Option<&str>, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(unit, "{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::Validation,
            unit: unit.map(str::to_string),
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn has_structural_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.kind == DiagnosticKind::Structural)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_split() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.link("s1", "dangling dependency");
        diagnostics.invalid(None, "over the points limit");
        diagnostics.notice(Some("s2"), "balance invalid");

        assert_eq!(diagnostics.warnings().len(), 2);
        assert_eq!(diagnostics.errors(), vec!["over the points limit".to_string()]);
        assert!(!diagnostics.has_structural_errors());
    }

    #[test]
    fn test_structural_marks_failure() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.structural(&MusterError::InvalidSize {
            unit: "Squad".into(),
            size: 0,
        });

        assert!(diagnostics.has_structural_errors());
        assert_eq!(diagnostics.count(DiagnosticKind::Structural), 1);
        assert!(diagnostics.errors()[0].contains("invalid size"));
    }
}
