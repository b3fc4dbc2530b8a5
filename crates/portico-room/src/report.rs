//! Validation report types

/// Severity level for validation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single validation finding, tied to the document section it came from
/// (e.g. `"item 47, Trigger"`, `"settings"`, `"quest mlh..."`)
#[derive(Debug, Clone)]
pub struct Violation {
    pub section: String,
    pub message: String,
    pub severity: Severity,
}

/// A complete validation report
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, section: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            section: section.into(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    pub fn warning(&mut self, section: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            section: section.into(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }

    pub fn info(&mut self, section: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            section: section.into(),
            message: message.into(),
            severity: Severity::Info,
        });
    }

    /// Valid means no error-level findings; warnings don't fail a snapshot
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Info)
            .count()
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        let total = self.violations.len();
        if total == 0 {
            return "No problems found.".to_string();
        }
        format!(
            "{} finding(s): {} error(s), {} warning(s), {} info",
            total,
            self.error_count(),
            self.warning_count(),
            self.info_count(),
        )
    }
}
