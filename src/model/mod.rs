//! The design-interchange entity graph.
//!
//! Entities are uniquely identified, versioned values connected by URI
//! references. Ownership forms a tree (a nested entity has exactly one
//! parent); everything else — containment of definitions, derivation lineage,
//! generation — is a URI reference resolved through the [`Document`].
//!
//! Entity kinds are closed: runtime dispatch happens by pattern-matching the
//! kind-tagged reference enums ([`TopLevelRef`], [`EntityRef`]), not by
//! downcasting.

pub mod component;
pub mod derivation;
pub mod document;
pub mod identity;
pub mod module;
pub mod provenance;
pub mod toplevel;

pub use component::{
    Access, Component, ComponentDefinition, Cut, Location, MapsTo, Orientation, Range, Refinement,
    Restriction, SequenceAnnotation, SequenceConstraint,
};
pub use derivation::{Cardinality, CombinatorialDerivation, VariableComponent};
pub use document::Document;
pub use identity::{Identified, Uri, is_display_id, is_first_version_newer};
pub use module::{
    Direction, FunctionalComponent, Interaction, Module, ModuleDefinition, Participation,
};
pub use provenance::{Activity, Agent, Association, Plan, Usage};
pub use toplevel::{Attachment, Collection, GenericTopLevel, Implementation, Model, Sequence};

use serde::Serialize;
use strum::Display;

/// Every concrete entity kind, top-level and nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum EntityKind {
    ComponentDefinition,
    ModuleDefinition,
    Sequence,
    Model,
    Collection,
    Activity,
    Agent,
    Plan,
    Implementation,
    CombinatorialDerivation,
    GenericTopLevel,
    Attachment,
    Component,
    FunctionalComponent,
    Module,
    MapsTo,
    SequenceAnnotation,
    Range,
    Cut,
    SequenceConstraint,
    Interaction,
    Participation,
    VariableComponent,
    Association,
    Usage,
}

/// Reference to any top-level entity, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopLevelRef<'a> {
    ComponentDefinition(&'a ComponentDefinition),
    ModuleDefinition(&'a ModuleDefinition),
    Sequence(&'a Sequence),
    Model(&'a Model),
    Collection(&'a Collection),
    Activity(&'a Activity),
    Agent(&'a Agent),
    Plan(&'a Plan),
    Implementation(&'a Implementation),
    CombinatorialDerivation(&'a CombinatorialDerivation),
    GenericTopLevel(&'a GenericTopLevel),
    Attachment(&'a Attachment),
}

impl<'a> TopLevelRef<'a> {
    pub fn ident(&self) -> &'a Identified {
        match self {
            TopLevelRef::ComponentDefinition(e) => &e.ident,
            TopLevelRef::ModuleDefinition(e) => &e.ident,
            TopLevelRef::Sequence(e) => &e.ident,
            TopLevelRef::Model(e) => &e.ident,
            TopLevelRef::Collection(e) => &e.ident,
            TopLevelRef::Activity(e) => &e.ident,
            TopLevelRef::Agent(e) => &e.ident,
            TopLevelRef::Plan(e) => &e.ident,
            TopLevelRef::Implementation(e) => &e.ident,
            TopLevelRef::CombinatorialDerivation(e) => &e.ident,
            TopLevelRef::GenericTopLevel(e) => &e.ident,
            TopLevelRef::Attachment(e) => &e.ident,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            TopLevelRef::ComponentDefinition(_) => EntityKind::ComponentDefinition,
            TopLevelRef::ModuleDefinition(_) => EntityKind::ModuleDefinition,
            TopLevelRef::Sequence(_) => EntityKind::Sequence,
            TopLevelRef::Model(_) => EntityKind::Model,
            TopLevelRef::Collection(_) => EntityKind::Collection,
            TopLevelRef::Activity(_) => EntityKind::Activity,
            TopLevelRef::Agent(_) => EntityKind::Agent,
            TopLevelRef::Plan(_) => EntityKind::Plan,
            TopLevelRef::Implementation(_) => EntityKind::Implementation,
            TopLevelRef::CombinatorialDerivation(_) => EntityKind::CombinatorialDerivation,
            TopLevelRef::GenericTopLevel(_) => EntityKind::GenericTopLevel,
            TopLevelRef::Attachment(_) => EntityKind::Attachment,
        }
    }
}

/// Reference to any entity reachable from a top-level, nested entities and
/// locations included. Equality is deep structural equality of the referenced
/// entity; two references of different kinds are never equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    ComponentDefinition(&'a ComponentDefinition),
    ModuleDefinition(&'a ModuleDefinition),
    Sequence(&'a Sequence),
    Model(&'a Model),
    Collection(&'a Collection),
    Activity(&'a Activity),
    Agent(&'a Agent),
    Plan(&'a Plan),
    Implementation(&'a Implementation),
    CombinatorialDerivation(&'a CombinatorialDerivation),
    GenericTopLevel(&'a GenericTopLevel),
    Attachment(&'a Attachment),
    Component(&'a Component),
    FunctionalComponent(&'a FunctionalComponent),
    Module(&'a Module),
    MapsTo(&'a MapsTo),
    SequenceAnnotation(&'a SequenceAnnotation),
    Location(&'a Location),
    SequenceConstraint(&'a SequenceConstraint),
    Interaction(&'a Interaction),
    Participation(&'a Participation),
    VariableComponent(&'a VariableComponent),
    Association(&'a Association),
    Usage(&'a Usage),
}

impl<'a> EntityRef<'a> {
    pub fn ident(&self) -> &'a Identified {
        match self {
            EntityRef::ComponentDefinition(e) => &e.ident,
            EntityRef::ModuleDefinition(e) => &e.ident,
            EntityRef::Sequence(e) => &e.ident,
            EntityRef::Model(e) => &e.ident,
            EntityRef::Collection(e) => &e.ident,
            EntityRef::Activity(e) => &e.ident,
            EntityRef::Agent(e) => &e.ident,
            EntityRef::Plan(e) => &e.ident,
            EntityRef::Implementation(e) => &e.ident,
            EntityRef::CombinatorialDerivation(e) => &e.ident,
            EntityRef::GenericTopLevel(e) => &e.ident,
            EntityRef::Attachment(e) => &e.ident,
            EntityRef::Component(e) => &e.ident,
            EntityRef::FunctionalComponent(e) => &e.ident,
            EntityRef::Module(e) => &e.ident,
            EntityRef::MapsTo(e) => &e.ident,
            EntityRef::SequenceAnnotation(e) => &e.ident,
            EntityRef::Location(e) => e.ident(),
            EntityRef::SequenceConstraint(e) => &e.ident,
            EntityRef::Interaction(e) => &e.ident,
            EntityRef::Participation(e) => &e.ident,
            EntityRef::VariableComponent(e) => &e.ident,
            EntityRef::Association(e) => &e.ident,
            EntityRef::Usage(e) => &e.ident,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::ComponentDefinition(_) => EntityKind::ComponentDefinition,
            EntityRef::ModuleDefinition(_) => EntityKind::ModuleDefinition,
            EntityRef::Sequence(_) => EntityKind::Sequence,
            EntityRef::Model(_) => EntityKind::Model,
            EntityRef::Collection(_) => EntityKind::Collection,
            EntityRef::Activity(_) => EntityKind::Activity,
            EntityRef::Agent(_) => EntityKind::Agent,
            EntityRef::Plan(_) => EntityKind::Plan,
            EntityRef::Implementation(_) => EntityKind::Implementation,
            EntityRef::CombinatorialDerivation(_) => EntityKind::CombinatorialDerivation,
            EntityRef::GenericTopLevel(_) => EntityKind::GenericTopLevel,
            EntityRef::Attachment(_) => EntityKind::Attachment,
            EntityRef::Component(_) => EntityKind::Component,
            EntityRef::FunctionalComponent(_) => EntityKind::FunctionalComponent,
            EntityRef::Module(_) => EntityKind::Module,
            EntityRef::MapsTo(_) => EntityKind::MapsTo,
            EntityRef::SequenceAnnotation(_) => EntityKind::SequenceAnnotation,
            EntityRef::Location(l) => l.kind(),
            EntityRef::SequenceConstraint(_) => EntityKind::SequenceConstraint,
            EntityRef::Interaction(_) => EntityKind::Interaction,
            EntityRef::Participation(_) => EntityKind::Participation,
            EntityRef::VariableComponent(_) => EntityKind::VariableComponent,
            EntityRef::Association(_) => EntityKind::Association,
            EntityRef::Usage(_) => EntityKind::Usage,
        }
    }
}
