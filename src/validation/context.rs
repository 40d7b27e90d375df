//! The validation context: the per-run diagnostic sink every check appends
//! to, and the report handed back to the caller.
//!
//! The context is an explicit value threaded through the pipeline — there is
//! no ambient error list. Independent documents validated concurrently simply
//! use independent contexts.

use std::fmt;

use serde::Serialize;

use crate::error::{RuleCode, Severity};
use crate::model::Uri;

/// One rule violation: a stable code, the offending entity, and enough detail
/// to locate the problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub rule: RuleCode,
    pub severity: Severity,
    pub entity: Uri,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.rule.code(), self.detail, self.entity)
    }
}

/// Mutable diagnostic sink scoped to one validation run.
#[derive(Debug, Default)]
pub struct ValidationContext {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the sink; the pipeline calls this at the start of every run.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Appends a diagnostic at the given severity.
    pub fn report(
        &mut self,
        rule: RuleCode,
        severity: Severity,
        entity: &Uri,
        detail: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic {
            rule,
            severity,
            entity: entity.clone(),
            detail: detail.into(),
        });
    }

    /// Appends an error-severity diagnostic.
    pub fn error(&mut self, rule: RuleCode, entity: &Uri, detail: impl Into<String>) {
        self.report(rule, Severity::Error, entity, detail);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_report(self) -> ValidationReport {
        ValidationReport {
            diagnostics: self.diagnostics,
        }
    }
}

/// Outcome of one validation run: the ordered diagnostics, in the order the
/// checks appended them. Running the pipeline twice over an unchanged
/// document yields an identical report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// No error-severity diagnostics. Warnings alone leave a report valid.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Rendered messages, one per diagnostic, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }

    /// Diagnostics tagged with the given rule.
    pub fn with_rule(&self, rule: RuleCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.rule == rule)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        writeln!(
            f,
            "{} diagnostics ({} errors, {} warnings)",
            self.diagnostics.len(),
            errors,
            self.diagnostics.len() - errors
        )?;
        for (i, d) in self.diagnostics.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, d)?;
        }
        Ok(())
    }
}
