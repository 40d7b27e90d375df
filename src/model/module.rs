//! Functional design entities: module definitions and the nested entities
//! they own (functional components, module instances, interactions and
//! participations).

use indexmap::IndexSet;
use strum::{Display, EnumString};

use super::component::{Access, MapsTo};
use super::identity::{Identified, Uri};

/// Data-flow direction of a functional component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    In,
    Out,
    InOut,
    None,
}

/// An independently addressable definition of a functional context.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDefinition {
    pub ident: Identified,
    pub roles: IndexSet<Uri>,
    pub models: Vec<Uri>,
    pub functional_components: Vec<FunctionalComponent>,
    pub modules: Vec<Module>,
    pub interactions: Vec<Interaction>,
}

impl ModuleDefinition {
    pub fn new(ident: Identified) -> Self {
        Self {
            ident,
            roles: IndexSet::new(),
            models: Vec::new(),
            functional_components: Vec::new(),
            modules: Vec::new(),
            interactions: Vec::new(),
        }
    }

    pub fn functional_component(&self, identity: &Uri) -> Option<&FunctionalComponent> {
        self.functional_components
            .iter()
            .find(|fc| &fc.ident.identity == identity)
    }

    pub fn module(&self, identity: &Uri) -> Option<&Module> {
        self.modules.iter().find(|m| &m.ident.identity == identity)
    }

    pub fn interaction(&self, identity: &Uri) -> Option<&Interaction> {
        self.interactions
            .iter()
            .find(|i| &i.ident.identity == identity)
    }
}

/// Instantiation of a component definition in a functional context.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalComponent {
    pub ident: Identified,
    pub access: Access,
    pub direction: Direction,
    pub definition: Uri,
    pub maps_tos: Vec<MapsTo>,
}

impl FunctionalComponent {
    pub fn new(ident: Identified, definition: impl Into<Uri>) -> Self {
        Self {
            ident,
            access: Access::Public,
            direction: Direction::None,
            definition: definition.into(),
            maps_tos: Vec::new(),
        }
    }

    pub fn maps_to(&self, identity: &Uri) -> Option<&MapsTo> {
        self.maps_tos.iter().find(|m| &m.ident.identity == identity)
    }
}

/// Instantiation of another module definition inside a parent definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub ident: Identified,
    pub definition: Uri,
    pub maps_tos: Vec<MapsTo>,
}

impl Module {
    pub fn new(ident: Identified, definition: impl Into<Uri>) -> Self {
        Self {
            ident,
            definition: definition.into(),
            maps_tos: Vec::new(),
        }
    }

    pub fn maps_to(&self, identity: &Uri) -> Option<&MapsTo> {
        self.maps_tos.iter().find(|m| &m.ident.identity == identity)
    }
}

/// A typed relationship between functional components.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub ident: Identified,
    pub types: IndexSet<Uri>,
    pub participations: Vec<Participation>,
}

impl Interaction {
    pub fn new(ident: Identified) -> Self {
        Self {
            ident,
            types: IndexSet::new(),
            participations: Vec::new(),
        }
    }

    pub fn participation(&self, identity: &Uri) -> Option<&Participation> {
        self.participations
            .iter()
            .find(|p| &p.ident.identity == identity)
    }
}

/// One functional component's role in an interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Participation {
    pub ident: Identified,
    pub roles: IndexSet<Uri>,
    pub participant: Uri,
}

impl Participation {
    pub fn new(ident: Identified, participant: impl Into<Uri>) -> Self {
        Self {
            ident,
            roles: IndexSet::new(),
            participant: participant.into(),
        }
    }
}
