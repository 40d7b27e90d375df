//! The rule pipeline.
//!
//! [`DocumentValidator`] orchestrates independent checks over one
//! [`Document`]: the always-on integrity rules, then the optional compliance,
//! completeness and best-practice groups per [`ValidationOptions`]. Checks
//! append diagnostics to a per-run [`ValidationContext`] and never stop
//! early; an empty report means the document is valid.
//!
//! ```rust,ignore
//! use biodesign_validate::{DocumentValidator, ValidationOptions};
//!
//! let validator = DocumentValidator::new(ValidationOptions::default());
//! let report = validator.validate(&document);
//! if !report.is_valid() {
//!     eprintln!("{report}");
//! }
//! ```

pub mod best_practice;
pub mod compliance;
pub mod completeness;
pub mod context;
pub mod cycles;
pub mod derivation;
pub mod mapsto;

pub use context::{Diagnostic, ValidationContext, ValidationReport};

use serde::{Deserialize, Serialize};

use crate::error::Severity;
use crate::model::Document;
use crate::ontology::{BuiltinNotation, BuiltinTermHierarchy, ChemicalNotation, TermHierarchy};

/// Which optional rule groups run, and how notation failures are reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Referential completeness and template/derivation structural
    /// consistency.
    pub complete: bool,
    /// Compliant identity shape.
    pub compliant: bool,
    /// Ontology, sequence and provenance best practices.
    pub best_practice: bool,
    /// Severity of malformed chemical notation.
    pub notation_policy: NotationPolicy,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            complete: true,
            compliant: true,
            best_practice: true,
            notation_policy: NotationPolicy::Error,
        }
    }
}

/// Whether malformed chemical notation is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationPolicy {
    Error,
    Warning,
}

impl NotationPolicy {
    pub fn severity(self) -> Severity {
        match self {
            NotationPolicy::Error => Severity::Error,
            NotationPolicy::Warning => Severity::Warning,
        }
    }
}

/// Runs the rule pipeline over documents. Built-in ontology and notation
/// capabilities are used unless the caller supplies their own.
pub struct DocumentValidator {
    options: ValidationOptions,
    hierarchy: Box<dyn TermHierarchy>,
    notation: Box<dyn ChemicalNotation>,
}

impl DocumentValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            options,
            hierarchy: Box::new(BuiltinTermHierarchy),
            notation: Box::new(BuiltinNotation),
        }
    }

    /// Replaces the term-hierarchy capability.
    pub fn with_term_hierarchy(mut self, hierarchy: impl TermHierarchy + 'static) -> Self {
        self.hierarchy = Box::new(hierarchy);
        self
    }

    /// Replaces the chemical-notation capability.
    pub fn with_notation(mut self, notation: impl ChemicalNotation + 'static) -> Self {
        self.notation = Box::new(notation);
        self
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validates one document and returns the accumulated diagnostics. Every
    /// run starts from a cleared context; running twice over an unchanged
    /// document yields identical reports.
    pub fn validate(&self, doc: &Document) -> ValidationReport {
        let mut ctx = ValidationContext::new();
        ctx.clear();

        compliance::check_derivation_versions(doc, &mut ctx);
        cycles::check_circular_references(doc, &mut ctx);
        compliance::check_identity_uniqueness(doc, &mut ctx);
        compliance::check_persistent_identity_kinds(doc, &mut ctx);
        mapsto::check_mapping_refinements(doc, &mut ctx);
        tracing::debug!(diagnostics = ctx.len(), "integrity checks finished");

        if self.options.compliant {
            compliance::check_identity_shapes(doc, &mut ctx);
            tracing::debug!(diagnostics = ctx.len(), "compliance checks finished");
        }
        if self.options.complete {
            completeness::check_references(doc, &mut ctx);
            derivation::check_derived_definitions(doc, &mut ctx);
            tracing::debug!(diagnostics = ctx.len(), "completeness checks finished");
        }
        if self.options.best_practice {
            best_practice::check_ontology_usage(doc, self.hierarchy.as_ref(), &mut ctx);
            best_practice::check_sequence_encodings(
                doc,
                self.notation.as_ref(),
                self.options.notation_policy.severity(),
                &mut ctx,
            );
            best_practice::check_annotation_overlap(doc, &mut ctx);
            best_practice::check_definition_sequences(doc, &mut ctx);
            best_practice::check_sequence_constraints(doc, &mut ctx);
            best_practice::check_activity_roles(doc, &mut ctx);
            derivation::check_derivation_hygiene(doc, &mut ctx);
            tracing::debug!(diagnostics = ctx.len(), "best-practice checks finished");
        }

        ctx.into_report()
    }
}

/// One-shot convenience over [`DocumentValidator`] with the built-in
/// capabilities.
pub fn validate_document(doc: &Document, options: &ValidationOptions) -> ValidationReport {
    DocumentValidator::new(options.clone()).validate(doc)
}
