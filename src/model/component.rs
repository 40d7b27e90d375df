//! Structural design entities: component definitions and the nested entities
//! they own (components, sequence annotations, locations, sequence
//! constraints and mappings).

use indexmap::IndexSet;
use strum::{Display, EnumString};

use super::EntityKind;
use super::identity::{Identified, Uri};

/// Visibility of a component for cross-definition mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Access {
    Public,
    Private,
}

/// How a mapping reconciles its local and remote components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Refinement {
    UseRemote,
    UseLocal,
    VerifyIdentical,
    Merge,
}

/// Ordering/orientation restriction between two components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Restriction {
    Precedes,
    SameOrientationAs,
    OppositeOrientationAs,
    DifferentFrom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Orientation {
    Inline,
    ReverseComplement,
}

/// An independently addressable definition of a design part.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefinition {
    pub ident: Identified,
    /// Biochemical types (DNA, RNA, protein, ...); open vocabulary.
    pub types: IndexSet<Uri>,
    /// Functional roles (promoter, CDS, ...); open vocabulary.
    pub roles: IndexSet<Uri>,
    pub sequences: Vec<Uri>,
    pub components: Vec<Component>,
    pub sequence_annotations: Vec<SequenceAnnotation>,
    pub sequence_constraints: Vec<SequenceConstraint>,
}

impl ComponentDefinition {
    pub fn new(ident: Identified) -> Self {
        Self {
            ident,
            types: IndexSet::new(),
            roles: IndexSet::new(),
            sequences: Vec::new(),
            components: Vec::new(),
            sequence_annotations: Vec::new(),
            sequence_constraints: Vec::new(),
        }
    }

    pub fn component(&self, identity: &Uri) -> Option<&Component> {
        self.components.iter().find(|c| &c.ident.identity == identity)
    }

    pub fn sequence_annotation(&self, identity: &Uri) -> Option<&SequenceAnnotation> {
        self.sequence_annotations
            .iter()
            .find(|sa| &sa.ident.identity == identity)
    }

    /// The annotation placing the given nested component, if any.
    pub fn annotation_for_component(&self, component: &Uri) -> Option<&SequenceAnnotation> {
        self.sequence_annotations
            .iter()
            .find(|sa| sa.component.as_ref() == Some(component))
    }

    pub fn sequence_constraint(&self, identity: &Uri) -> Option<&SequenceConstraint> {
        self.sequence_constraints
            .iter()
            .find(|sc| &sc.ident.identity == identity)
    }
}

/// Instantiation of another component definition inside a parent definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub ident: Identified,
    pub access: Access,
    pub definition: Uri,
    pub roles: IndexSet<Uri>,
    pub maps_tos: Vec<MapsTo>,
}

impl Component {
    pub fn new(ident: Identified, definition: impl Into<Uri>) -> Self {
        Self {
            ident,
            access: Access::Public,
            definition: definition.into(),
            roles: IndexSet::new(),
            maps_tos: Vec::new(),
        }
    }

    pub fn maps_to(&self, identity: &Uri) -> Option<&MapsTo> {
        self.maps_tos.iter().find(|m| &m.ident.identity == identity)
    }
}

/// Identifies a local component with a component of a referenced definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MapsTo {
    pub ident: Identified,
    pub refinement: Refinement,
    pub local: Uri,
    pub remote: Uri,
}

impl MapsTo {
    pub fn new(
        ident: Identified,
        refinement: Refinement,
        local: impl Into<Uri>,
        remote: impl Into<Uri>,
    ) -> Self {
        Self {
            ident,
            refinement,
            local: local.into(),
            remote: remote.into(),
        }
    }
}

/// Places a feature (optionally a nested component) on a definition's
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceAnnotation {
    pub ident: Identified,
    pub component: Option<Uri>,
    pub roles: IndexSet<Uri>,
    pub locations: Vec<Location>,
}

impl SequenceAnnotation {
    pub fn new(ident: Identified) -> Self {
        Self {
            ident,
            component: None,
            roles: IndexSet::new(),
            locations: Vec::new(),
        }
    }

    pub fn location(&self, identity: &Uri) -> Option<&Location> {
        self.locations.iter().find(|l| &l.ident().identity == identity)
    }

    /// Leftmost coordinate over all locations, when one exists.
    pub fn min_start(&self) -> Option<u64> {
        self.locations
            .iter()
            .map(|l| match l {
                Location::Range(r) => r.start,
                Location::Cut(c) => c.at,
            })
            .min()
    }
}

/// A contiguous span on a sequence, 1-based and inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub ident: Identified,
    pub start: u64,
    pub end: u64,
    pub orientation: Option<Orientation>,
}

/// A point between two sequence positions; `at` counts positions before the
/// cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Cut {
    pub ident: Identified,
    pub at: u64,
    pub orientation: Option<Orientation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Range(Range),
    Cut(Cut),
}

impl Location {
    pub fn ident(&self) -> &Identified {
        match self {
            Location::Range(r) => &r.ident,
            Location::Cut(c) => &c.ident,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Location::Range(r) => r.orientation,
            Location::Cut(c) => c.orientation,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Location::Range(_) => EntityKind::Range,
            Location::Cut(_) => EntityKind::Cut,
        }
    }
}

/// Declares a restriction between two nested components of one definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceConstraint {
    pub ident: Identified,
    pub restriction: Restriction,
    pub subject: Uri,
    pub object: Uri,
}

impl SequenceConstraint {
    pub fn new(
        ident: Identified,
        restriction: Restriction,
        subject: impl Into<Uri>,
        object: impl Into<Uri>,
    ) -> Self {
        Self {
            ident,
            restriction,
            subject: subject.into(),
            object: object.into(),
        }
    }
}
