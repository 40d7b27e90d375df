//! Remaining top-level entity kinds: sequences, external models, collections,
//! implementations, attachments and generic top-levels.

use super::identity::{Identified, Uri};

/// Raw sequence data under a declared encoding vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub ident: Identified,
    pub elements: String,
    pub encoding: Uri,
}

impl Sequence {
    pub fn new(ident: Identified, elements: impl Into<String>, encoding: impl Into<Uri>) -> Self {
        Self {
            ident,
            elements: elements.into(),
            encoding: encoding.into(),
        }
    }
}

/// Reference to an external computational model of a design.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub ident: Identified,
    pub source: Uri,
    pub language: Uri,
    pub framework: Uri,
}

impl Model {
    pub fn new(
        ident: Identified,
        source: impl Into<Uri>,
        language: impl Into<Uri>,
        framework: impl Into<Uri>,
    ) -> Self {
        Self {
            ident,
            source: source.into(),
            language: language.into(),
            framework: framework.into(),
        }
    }
}

/// An unordered grouping of top-level entities of any kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub ident: Identified,
    pub members: Vec<Uri>,
}

impl Collection {
    pub fn new(ident: Identified) -> Self {
        Self {
            ident,
            members: Vec::new(),
        }
    }
}

/// A physical build of a component or module definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Implementation {
    pub ident: Identified,
    /// The definition this implementation realizes, once known.
    pub built: Option<Uri>,
}

impl Implementation {
    pub fn new(ident: Identified) -> Self {
        Self { ident, built: None }
    }
}

/// A file attached to the design record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub ident: Identified,
    pub source: Uri,
    pub format: Option<Uri>,
}

impl Attachment {
    pub fn new(ident: Identified, source: impl Into<Uri>) -> Self {
        Self {
            ident,
            source: source.into(),
            format: None,
        }
    }
}

/// Escape hatch for top-level data the core vocabulary does not cover.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericTopLevel {
    pub ident: Identified,
    pub rdf_type: Uri,
}

impl GenericTopLevel {
    pub fn new(ident: Identified, rdf_type: impl Into<Uri>) -> Self {
        Self {
            ident,
            rdf_type: rdf_type.into(),
        }
    }
}
