//! Compliance and integrity validator for graph-shaped genetic design
//! interchange documents.
//!
//! A document holds uniquely-identified, versioned entities connected by URI
//! references: containment hierarchies (definitions instantiating other
//! definitions) and cross-cutting provenance and derivation links. This crate
//! decides whether an in-memory document satisfies the format's structural
//! and semantic integrity rules — and explains every violation found, not
//! just the first.
//!
//! # Components
//!
//! - [`model`] — the entity graph and the identity-keyed [`Document`] store
//! - [`validation`] — the rule pipeline: cycle detection, referential
//!   completeness, identity compliance, mapping refinements, structural
//!   consistency of combinatorial derivations, best practices
//! - [`compare`] — recursive structural diff between two documents
//! - [`ontology`] — term-hierarchy and chemical-notation capabilities the
//!   best-practice checks consume
//!
//! # Example
//!
//! ```rust,ignore
//! use biodesign_validate::{DocumentValidator, ValidationOptions};
//!
//! let validator = DocumentValidator::new(ValidationOptions::default());
//! let report = validator.validate(&document);
//! for message in report.messages() {
//!     eprintln!("{message}");
//! }
//! assert!(report.is_valid());
//! ```

pub mod compare;
pub mod error;
pub mod model;
pub mod ontology;
pub mod validation;

pub use compare::{ComparisonReport, compare_documents};
pub use error::{DocumentError, RuleCategory, RuleCode, Severity};
pub use model::{Document, EntityKind, Identified, Uri};
pub use ontology::{BuiltinNotation, BuiltinTermHierarchy, ChemicalNotation, TermHierarchy};
pub use validation::{
    Diagnostic, DocumentValidator, NotationPolicy, ValidationContext, ValidationOptions,
    ValidationReport, validate_document,
};
