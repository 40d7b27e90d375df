//! Provenance entities: activities with their associations and usages, plus
//! the agents and plans they reference.

use indexmap::IndexSet;

use super::identity::{Identified, Uri};

/// A step in the history of a design: something that generated or consumed
/// top-level entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub ident: Identified,
    /// Other activities whose outcomes informed this one.
    pub informed_bys: Vec<Uri>,
    pub associations: Vec<Association>,
    pub usages: Vec<Usage>,
}

impl Activity {
    pub fn new(ident: Identified) -> Self {
        Self {
            ident,
            informed_bys: Vec::new(),
            associations: Vec::new(),
            usages: Vec::new(),
        }
    }

    pub fn association(&self, identity: &Uri) -> Option<&Association> {
        self.associations
            .iter()
            .find(|a| &a.ident.identity == identity)
    }

    pub fn usage(&self, identity: &Uri) -> Option<&Usage> {
        self.usages.iter().find(|u| &u.ident.identity == identity)
    }
}

/// Binds an agent (optionally following a plan) to the activity, with the
/// roles the agent played.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub ident: Identified,
    pub roles: IndexSet<Uri>,
    pub agent: Uri,
    pub plan: Option<Uri>,
}

impl Association {
    pub fn new(ident: Identified, agent: impl Into<Uri>) -> Self {
        Self {
            ident,
            roles: IndexSet::new(),
            agent: agent.into(),
            plan: None,
        }
    }
}

/// A top-level entity consumed by the activity, with the roles it served.
#[derive(Debug, Clone, PartialEq)]
pub struct Usage {
    pub ident: Identified,
    pub entity: Uri,
    pub roles: IndexSet<Uri>,
}

impl Usage {
    pub fn new(ident: Identified, entity: impl Into<Uri>) -> Self {
        Self {
            ident,
            entity: entity.into(),
            roles: IndexSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub ident: Identified,
}

impl Agent {
    pub fn new(ident: Identified) -> Self {
        Self { ident }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub ident: Identified,
}

impl Plan {
    pub fn new(ident: Identified) -> Self {
        Self { ident }
    }
}
